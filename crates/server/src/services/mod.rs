//! Business logic services.

pub mod identity;

pub use identity::IdentityGate;
