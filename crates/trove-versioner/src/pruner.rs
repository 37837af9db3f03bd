//! Version discovery and retention

use crate::diagnostics::{Diagnostics, VersionerEvent};
use crate::error::PruneError;
use crate::tag::{parse_tagged, NamingScheme};
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One archived copy of a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedVersion {
    /// Location in the archive tree
    pub path: PathBuf,
    /// Naming scheme the copy was stored under
    pub scheme: NamingScheme,
    /// Timestamp tag (`YYYYMMDD-HHMMSS`)
    pub tag: String,
}

/// Find every archived copy of `name` in `dir`, oldest first
///
/// Both naming schemes are matched. The result is sorted by the bytes of the
/// file name, which is chronological with legacy names ahead of current ones.
/// A missing `dir` has no versions.
pub fn discover_versions(
    dir: &Path,
    name: impl AsRef<OsStr>,
) -> Result<Vec<ArchivedVersion>, PruneError> {
    let name = name.as_ref();
    let read_err = |source: io::Error| PruneError::ReadDir {
        dir: dir.to_path_buf(),
        source,
    };

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(read_err(e)),
    };

    let mut found = BTreeMap::new();
    for entry in entries {
        let archived = entry.map_err(read_err)?.file_name();
        if let Some(parsed) = parse_tagged(name, &archived) {
            found.insert(archived, parsed);
        }
    }

    Ok(found
        .into_iter()
        .map(|(archived, (scheme, tag))| ArchivedVersion {
            path: dir.join(archived),
            scheme,
            tag,
        })
        .collect())
}

/// Result of one retention pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneReport {
    /// Archived copies found
    pub matched: usize,

    /// Copies removed, oldest first
    pub removed: Vec<PathBuf>,

    /// Copies that should have been removed but could not be
    pub failed: Vec<(PathBuf, String)>,
}

impl PruneReport {
    /// Copies still on disk after the pass
    pub fn remaining(&self) -> usize {
        self.matched - self.removed.len()
    }

    /// Generate a one-line summary
    pub fn summary(&self) -> String {
        let mut line = format!(
            "{} version(s) found, {} removed, {} kept",
            self.matched,
            self.removed.len(),
            self.remaining()
        );
        if !self.failed.is_empty() {
            line.push_str(&format!(", {} could not be removed", self.failed.len()));
        }
        line
    }
}

/// Applies a keep-count to the archived copies of one file
pub struct Pruner<'a> {
    keep: usize,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> Pruner<'a> {
    /// Create a pruner keeping at most `keep` copies
    pub fn new(keep: usize, diagnostics: &'a dyn Diagnostics) -> Self {
        Self { keep, diagnostics }
    }

    /// Remove the oldest copies of `name` in `dir` beyond the keep-count
    ///
    /// Only enumeration failures are returned. Each removal is attempted
    /// independently; failures are reported and recorded in the report.
    pub fn prune(&self, dir: &Path, name: impl AsRef<OsStr>) -> Result<PruneReport, PruneError> {
        let versions = discover_versions(dir, name)?;
        let mut report = PruneReport {
            matched: versions.len(),
            ..Default::default()
        };

        if versions.len() <= self.keep {
            return Ok(report);
        }

        let excess = versions.len() - self.keep;
        for version in versions.into_iter().take(excess) {
            match fs::remove_file(&version.path) {
                Ok(()) => {
                    self.diagnostics.report(VersionerEvent::Removed {
                        path: version.path.clone(),
                    });
                    report.removed.push(version.path);
                }
                Err(e) => {
                    self.diagnostics.report(VersionerEvent::RemoveFailed {
                        path: version.path.clone(),
                        error: e.to_string(),
                    });
                    report.failed.push((version.path, e.to_string()));
                }
            }
        }

        Ok(report)
    }
}
