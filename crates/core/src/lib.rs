//! Maintained Core - Shared types library.
//!
//! This crate provides the domain types used across all Maintained components:
//! - `server` - Badge rendering, project store and the HTTP API
//! - `cli` - Command-line tooling for rendering badges offline
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no locking,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Badges, their colors and styles, projects and users

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
