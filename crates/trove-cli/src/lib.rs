//! Trove CLI library.
//!
//! This library provides the pieces behind the `trove` command: configuration
//! loading, folder resolution, command execution, logging setup and output
//! formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;

pub use cli::{Cli, Command};
pub use config::{Config, ResolvedFolder};
pub use error::{CliError, Result};
pub use output::Formatter;
