//! Error types for the CLI application.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Versioner configuration error
    #[error(transparent)]
    Versioner(#[from] trove_versioner::ConfigError),

    /// Archive error
    #[error(transparent)]
    Archive(#[from] trove_versioner::ArchiveError),

    /// Version discovery error
    #[error(transparent)]
    Prune(#[from] trove_versioner::PruneError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// No configured folder contains the path
    #[error("No folder configured for {0}. Use --root or --folder.")]
    NoFolder(PathBuf),

    /// Some files could not be archived
    #[error("{failed} of {total} file(s) could not be archived")]
    ArchiveFailed {
        /// Files that failed
        failed: usize,
        /// Files requested
        total: usize,
    },
}
