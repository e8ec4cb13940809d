//! Maintained server: badge rendering, project storage and the HTTP API.
//!
//! # Architecture
//!
//! - [`store::ProjectStore`] owns every user's projects and badges in memory
//! - [`render::BadgeRenderer`] turns a badge into an SVG document, fetching
//!   live values over HTTP when the badge has a value source
//! - [`services::IdentityGate`] maps bearer tokens to user identities
//! - [`routes`] exposes all of the above through axum
//!
//! The binary in `main.rs` wires these together; integration tests drive
//! [`routes::app`] in-process.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod render;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
