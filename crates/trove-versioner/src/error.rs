//! Error types for versioner operations

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort an archive call
///
/// Every variant leaves the source file where it was.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The source could not be inspected (other than not existing)
    #[error("Cannot stat {path}: {source}")]
    Stat {
        /// Path that was inspected
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// An archive directory could not be created
    #[error("Cannot create archive directory {path}: {source}")]
    DirectoryProvision {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The source does not live under the protected root
    #[error("{path} is not inside {root}")]
    RelativePath {
        /// Path being archived
        path: PathBuf,
        /// Protected root
        root: PathBuf,
    },

    /// The path has no final component to tag (`/`, `..`)
    #[error("Invalid file name: {path}")]
    InvalidFileName {
        /// Path being archived
        path: PathBuf,
    },

    /// The rename into the archive failed
    #[error("Cannot move {from} to {to}: {source}")]
    Move {
        /// Source path
        from: PathBuf,
        /// Destination path
        to: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Archived copies could not be enumerated
    ///
    /// Only returned when listing; archiving reports it as a warning instead.
    #[error("Cannot list versions: {0}")]
    Discovery(#[from] PruneError),
}

/// Errors raised while enumerating archived versions
#[derive(Error, Debug)]
pub enum PruneError {
    /// The archive directory could not be read
    #[error("Cannot read archive directory {dir}: {source}")]
    ReadDir {
        /// Directory being listed
        dir: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Configuration error
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No versioner registered under this name
    #[error("Unknown versioner type: {0}")]
    UnknownVersioner(String),
}
