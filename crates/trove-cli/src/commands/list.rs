//! List command implementation.

use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;
use trove_versioner::SimpleVersioner;

/// Execute the list command.
pub fn execute_list(file: &Path, versioner: &SimpleVersioner, formatter: &Formatter) -> Result<()> {
    let versions = versioner.versions(file)?;
    tracing::debug!("{} version(s) of {}", versions.len(), file.display());
    println!("{}", formatter.format_versions(&versions)?);
    Ok(())
}
