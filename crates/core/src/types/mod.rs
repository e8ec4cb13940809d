//! Core types for Maintained.
//!
//! Users own projects, projects own badges. The types here carry no
//! invariants of their own beyond what their constructors seed; ordering and
//! uniqueness rules are enforced by the project store in the server crate.

pub mod badge;
pub mod id;
pub mod project;

pub use badge::{Badge, BadgeAppearance, BadgeColor, BadgeStyle, ParseBadgeError};
pub use id::*;
pub use project::{Project, User};
