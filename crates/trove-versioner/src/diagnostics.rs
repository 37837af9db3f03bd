//! Diagnostics sink for versioner operations
//!
//! The versioner never logs directly; it reports [`VersionerEvent`]s to the
//! [`Diagnostics`] it was built with. [`TracingDiagnostics`] forwards them to
//! `tracing`.

use std::fmt;
use std::path::PathBuf;

/// Something worth reporting that does not fail the call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionerEvent {
    /// Archive was requested for a path that no longer exists
    SkippedMissing {
        /// Requested path
        path: PathBuf,
    },
    /// The archive root was created
    CreatedVersionsDir {
        /// Archive root
        path: PathBuf,
    },
    /// The archive root could not be marked hidden
    HideFailed {
        /// Archive root
        path: PathBuf,
        /// Error message
        error: String,
    },
    /// A file was moved into the archive
    Archived {
        /// Original path
        from: PathBuf,
        /// Archived path
        to: PathBuf,
    },
    /// Archived copies could not be enumerated; pruning skipped
    DiscoveryFailed {
        /// Archive directory
        dir: PathBuf,
        /// Error message
        error: String,
    },
    /// An old copy was removed
    Removed {
        /// Removed path
        path: PathBuf,
    },
    /// An old copy could not be removed
    RemoveFailed {
        /// Path that was kept
        path: PathBuf,
        /// Error message
        error: String,
    },
}

impl VersionerEvent {
    /// Whether the event signals a degraded outcome
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            VersionerEvent::HideFailed { .. }
                | VersionerEvent::DiscoveryFailed { .. }
                | VersionerEvent::RemoveFailed { .. }
        )
    }
}

impl fmt::Display for VersionerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionerEvent::SkippedMissing { path } => {
                write!(f, "not archiving nonexistent file {}", path.display())
            }
            VersionerEvent::CreatedVersionsDir { path } => {
                write!(f, "created versions dir {}", path.display())
            }
            VersionerEvent::HideFailed { path, error } => {
                write!(f, "hiding {}: {}", path.display(), error)
            }
            VersionerEvent::Archived { from, to } => {
                write!(f, "archived {} to {}", from.display(), to.display())
            }
            VersionerEvent::DiscoveryFailed { dir, error } => {
                write!(f, "listing versions in {}: {}", dir.display(), error)
            }
            VersionerEvent::Removed { path } => write!(f, "cleaned out {}", path.display()),
            VersionerEvent::RemoveFailed { path, error } => {
                write!(f, "removing old version {}: {}", path.display(), error)
            }
        }
    }
}

/// Receiver of versioner events
///
/// Implementations must be cheap; events are reported inline with the
/// filesystem operations.
pub trait Diagnostics: Send + Sync {
    /// Report one event
    fn report(&self, event: VersionerEvent);
}

/// Forwards events to `tracing`: warnings at WARN, everything else at DEBUG
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, event: VersionerEvent) {
        if event.is_warning() {
            tracing::warn!("{}", event);
        } else {
            tracing::debug!("{}", event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_classification() {
        let path = PathBuf::from("/data/a.txt");

        assert!(VersionerEvent::RemoveFailed {
            path: path.clone(),
            error: "denied".into()
        }
        .is_warning());
        assert!(VersionerEvent::HideFailed {
            path: path.clone(),
            error: "denied".into()
        }
        .is_warning());
        assert!(!VersionerEvent::Removed { path: path.clone() }.is_warning());
        assert!(!VersionerEvent::SkippedMissing { path }.is_warning());
    }

    #[test]
    fn test_display() {
        let event = VersionerEvent::RemoveFailed {
            path: PathBuf::from("old.txt"),
            error: "denied".into(),
        };
        assert_eq!(event.to_string(), "removing old version old.txt: denied");
    }

    #[test]
    fn test_tracing_diagnostics_without_subscriber() {
        TracingDiagnostics.report(VersionerEvent::Removed {
            path: PathBuf::from("old.txt"),
        });
    }
}
