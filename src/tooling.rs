//! Tooling & Integration Layer
//!
//! Command-line front end that drives the content loader against the REST API
//! and renders what it commits.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands};
