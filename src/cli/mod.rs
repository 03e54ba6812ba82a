//! Command line interface module
//!
//! Argument parsing, configuration validation and the runner that drives the
//! copy workflow.

pub mod args;
pub mod config;
pub mod runner;

pub use args::{Args, Command, OutputFormat};
pub use config::{AuthConfig, CopyConfig};
pub use runner::Runner;
