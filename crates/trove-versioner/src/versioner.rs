//! Simple versioner: archive, then keep the newest N copies

use crate::config::VersionerConfig;
use crate::diagnostics::{Diagnostics, TracingDiagnostics, VersionerEvent};
use crate::error::{ArchiveError, ConfigError, PruneError};
use crate::fsutil::{ensure_dir, hide, normalize};
use crate::pruner::{discover_versions, ArchivedVersion, PruneReport, Pruner};
use crate::tag::{tagged_os_filename, timestamp_tag};
use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// What an archive call did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveOutcome {
    /// The file did not exist; nothing was touched
    Missing,
    /// The file was moved into the archive
    Archived {
        /// Where the file now lives
        destination: PathBuf,
        /// Retention result, `None` if archived copies could not be enumerated
        prune: Option<PruneReport>,
    },
}

/// Moves files out of the way before they are replaced
pub trait Versioner: Send + Sync {
    /// Archive `path`
    ///
    /// On `Ok`, the file no longer exists at `path`.
    fn archive(&self, path: &Path) -> Result<ArchiveOutcome, ArchiveError>;
}

/// Build a versioner from its type name and string parameters
///
/// Only `"simple"` is known.
pub fn versioner_for(
    kind: &str,
    root: impl Into<PathBuf>,
    params: &HashMap<String, String>,
) -> Result<Box<dyn Versioner>, ConfigError> {
    match kind {
        "simple" => Ok(Box::new(SimpleVersioner::new(VersionerConfig::from_params(
            root, params,
        )))),
        other => Err(ConfigError::UnknownVersioner(other.to_string())),
    }
}

/// Keeps the `keep` most recent archived copies of each file
///
/// Holds no state besides its configuration, so one instance can serve
/// concurrent callers.
///
/// # Examples
///
/// ```no_run
/// use trove_versioner::{ArchiveOutcome, SimpleVersioner, Versioner, VersionerConfig};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let versioner = SimpleVersioner::new(VersionerConfig::new("/srv/sync").with_keep(3));
///
/// match versioner.archive("/srv/sync/a/b.txt".as_ref())? {
///     ArchiveOutcome::Missing => println!("already gone"),
///     ArchiveOutcome::Archived { destination, .. } => {
///         println!("kept as {}", destination.display())
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct SimpleVersioner {
    config: VersionerConfig,
    diagnostics: Arc<dyn Diagnostics>,
}

impl SimpleVersioner {
    /// Create a versioner reporting through `tracing`
    pub fn new(config: VersionerConfig) -> Self {
        Self::with_diagnostics(config, Arc::new(TracingDiagnostics))
    }

    /// Create a versioner reporting to `diagnostics`
    pub fn with_diagnostics(config: VersionerConfig, diagnostics: Arc<dyn Diagnostics>) -> Self {
        tracing::debug!("instantiated simple versioner {:?}", config);
        Self {
            config,
            diagnostics,
        }
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &VersionerConfig {
        &self.config
    }

    /// Archive directory mirroring the parent of `path`
    ///
    /// `..` is resolved lexically first, so a path that climbs out of the root
    /// is rejected instead of escaping the archive tree.
    pub fn archive_dir_for(&self, path: &Path) -> Result<PathBuf, ArchiveError> {
        let path = self.resolve(path);
        let parent = path.parent().unwrap_or(Path::new(""));
        let relative = parent
            .strip_prefix(normalize(&self.config.root))
            .map_err(|_| ArchiveError::RelativePath {
                path: path.clone(),
                root: self.config.root.clone(),
            })?;
        Ok(self.config.versions_dir().join(relative))
    }

    /// List archived copies of `path`, oldest first
    pub fn versions(&self, path: &Path) -> Result<Vec<ArchivedVersion>, ArchiveError> {
        let dir = self.archive_dir_for(path)?;
        let name = file_name_of(&self.resolve(path))?;
        Ok(discover_versions(&dir, &name)?)
    }

    /// Apply the keep-count to the archived copies of `name` in `dir`
    pub fn prune(&self, dir: &Path, name: impl AsRef<OsStr>) -> Result<PruneReport, PruneError> {
        Pruner::new(self.config.keep, self.diagnostics.as_ref()).prune(dir, name)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            normalize(path)
        } else {
            normalize(&self.config.root.join(path))
        }
    }

    fn ensure_versions_dir(&self) -> Result<(), ArchiveError> {
        let versions_dir = self.config.versions_dir();
        let provision_err = |source: io::Error| ArchiveError::DirectoryProvision {
            path: versions_dir.clone(),
            source,
        };

        match fs::metadata(&versions_dir) {
            Ok(_) => return Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(provision_err(e)),
        }

        if let Some(parent) = versions_dir.parent() {
            ensure_dir(parent).map_err(provision_err)?;
        }
        match fs::create_dir(&versions_dir) {
            Ok(()) => {}
            // Created by a concurrent caller, who reports and hides it.
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && versions_dir.is_dir() => {
                return Ok(());
            }
            Err(e) => return Err(provision_err(e)),
        }
        self.diagnostics.report(VersionerEvent::CreatedVersionsDir {
            path: versions_dir.clone(),
        });

        if let Err(e) = hide(&versions_dir) {
            self.diagnostics.report(VersionerEvent::HideFailed {
                path: versions_dir,
                error: e.to_string(),
            });
        }
        Ok(())
    }
}

impl Versioner for SimpleVersioner {
    fn archive(&self, path: &Path) -> Result<ArchiveOutcome, ArchiveError> {
        let path = self.resolve(path);
        let metadata = match fs::symlink_metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.diagnostics.report(VersionerEvent::SkippedMissing { path });
                return Ok(ArchiveOutcome::Missing);
            }
            Err(source) => return Err(ArchiveError::Stat { path, source }),
        };

        let name = file_name_of(&path)?;
        let modified = metadata.modified().map_err(|source| ArchiveError::Stat {
            path: path.clone(),
            source,
        })?;
        let dir = self.archive_dir_for(&path)?;

        self.ensure_versions_dir()?;
        ensure_dir(&dir).map_err(|source| ArchiveError::DirectoryProvision {
            path: dir.clone(),
            source,
        })?;

        let destination = dir.join(tagged_os_filename(&name, &timestamp_tag(modified)));
        if let Err(source) = fs::rename(&path, &destination) {
            // Lost a race with another caller moving or deleting the same file.
            if source.kind() == io::ErrorKind::NotFound && fs::symlink_metadata(&path).is_err() {
                self.diagnostics.report(VersionerEvent::SkippedMissing { path });
                return Ok(ArchiveOutcome::Missing);
            }
            return Err(ArchiveError::Move {
                from: path,
                to: destination,
                source,
            });
        }
        self.diagnostics.report(VersionerEvent::Archived {
            from: path,
            to: destination.clone(),
        });

        let prune = match self.prune(&dir, &name) {
            Ok(report) => Some(report),
            Err(e) => {
                self.diagnostics.report(VersionerEvent::DiscoveryFailed {
                    dir,
                    error: e.to_string(),
                });
                None
            }
        };

        Ok(ArchiveOutcome::Archived { destination, prune })
    }
}

fn file_name_of(path: &Path) -> Result<OsString, ArchiveError> {
    path.file_name()
        .map(OsStr::to_os_string)
        .ok_or_else(|| ArchiveError::InvalidFileName {
            path: path.to_path_buf(),
        })
}
