//! Archive command implementation.

use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::PathBuf;
use trove_versioner::{ArchiveOutcome, Versioner};

/// Archive every file, continuing past failures.
///
/// Returns the outcomes of the files that succeeded; failures are printed
/// as they happen and turned into [`CliError::ArchiveFailed`] at the end.
pub fn archive_all(
    files: &[PathBuf],
    versioner: &dyn Versioner,
    formatter: &Formatter,
) -> Result<Vec<(PathBuf, ArchiveOutcome)>> {
    let mut outcomes = Vec::with_capacity(files.len());
    let mut failed = 0;

    for file in files {
        match versioner.archive(file) {
            Ok(outcome) => outcomes.push((file.clone(), outcome)),
            Err(e) => {
                tracing::error!("Archiving {} failed: {}", file.display(), e);
                eprintln!("{}", formatter.error(&e.to_string()));
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(CliError::ArchiveFailed {
            failed,
            total: files.len(),
        });
    }
    Ok(outcomes)
}

/// Execute the archive command.
pub fn execute_archive(
    files: &[PathBuf],
    versioner: &dyn Versioner,
    formatter: &Formatter,
) -> Result<()> {
    let outcomes = archive_all(files, versioner, formatter)?;
    println!("{}", formatter.format_outcomes(&outcomes)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use std::fs;
    use tempfile::TempDir;
    use trove_versioner::{SimpleVersioner, VersionerConfig};

    #[test]
    fn test_archive_all_mixed() {
        let tmp = TempDir::new().unwrap();
        let present = tmp.path().join("present.txt");
        fs::write(&present, b"x").unwrap();
        let versioner = SimpleVersioner::new(VersionerConfig::new(tmp.path()));
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let outcomes = archive_all(
            &[present.clone(), tmp.path().join("absent.txt")],
            &versioner,
            &formatter,
        )
        .unwrap();

        assert_eq!(outcomes.len(), 2);
        assert!(matches!(outcomes[0].1, ArchiveOutcome::Archived { .. }));
        assert_eq!(outcomes[1].1, ArchiveOutcome::Missing);
        assert!(!present.exists());
    }

    #[test]
    fn test_archive_all_counts_failures() {
        let root = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        let outside = other.path().join("outside.txt");
        fs::write(&outside, b"x").unwrap();
        let versioner = SimpleVersioner::new(VersionerConfig::new(root.path()));
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let err = archive_all(&[outside.clone()], &versioner, &formatter).unwrap_err();

        assert!(matches!(err, CliError::ArchiveFailed { failed: 1, total: 1 }));
        assert!(outside.exists());
    }
}
