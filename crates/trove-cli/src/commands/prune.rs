//! Prune command implementation.

use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::{Path, PathBuf};
use trove_versioner::{ArchiveError, PruneReport, SimpleVersioner};

/// Apply retention to the archived copies of `file`.
pub fn prune_file(file: &Path, versioner: &SimpleVersioner) -> Result<(PathBuf, PruneReport)> {
    let dir = versioner.archive_dir_for(file)?;
    let name = file.file_name().ok_or_else(|| {
        CliError::from(ArchiveError::InvalidFileName {
            path: file.to_path_buf(),
        })
    })?;

    let report = versioner.prune(&dir, name)?;
    Ok((dir, report))
}

/// Execute the prune command.
pub fn execute_prune(
    file: &Path,
    versioner: &SimpleVersioner,
    formatter: &Formatter,
) -> Result<()> {
    let (dir, report) = prune_file(file, versioner)?;
    tracing::info!("Pruned {}: {}", file.display(), report.summary());
    println!("{}", formatter.format_prune(&dir, &report)?);
    Ok(())
}
