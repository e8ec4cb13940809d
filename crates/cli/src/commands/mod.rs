//! Subcommand implementations.

pub mod palette;
pub mod render;
