//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`build`] - Build a shape into an in-memory grid
//! - [`config`] - Configuration management (init, show, path)

pub mod build;
pub mod config;
