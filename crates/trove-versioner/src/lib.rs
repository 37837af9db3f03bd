//! Trove Versioner
//!
//! Keeps prior versions of files that a synchronization process is about to
//! overwrite or remove.
//!
//! # Overview
//!
//! The versioner is responsible for:
//! - **Archiving**: Moving a file into a hidden archive tree under a name tagged
//!   with its modification time
//! - **Discovery**: Finding every archived copy of a file, under both the current
//!   and the legacy naming scheme
//! - **Retention**: Keeping only the newest `keep` copies and removing the rest
//!
//! # Layout
//!
//! | Item | Location |
//! |------|----------|
//! | **Archive root** | `{root}/.stfolder/.stversions` |
//! | **Archived copy** | `{archive root}/{dir relative to root}/{tagged name}` |
//! | **Tagged name** | `report~20240105-093000.txt` |
//! | **Legacy tagged name** | `report.txt~20240105-093000` |
//!
//! File names sort chronologically as plain text. Legacy names sort before
//! current names of the same file, so they are always pruned first.
//!
//! # Usage
//!
//! ```no_run
//! use trove_versioner::{SimpleVersioner, Versioner, VersionerConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = VersionerConfig::new("/srv/sync/docs").with_keep(10);
//! let versioner = SimpleVersioner::new(config);
//!
//! let outcome = versioner.archive("/srv/sync/docs/notes/report.txt".as_ref())?;
//! println!("{:?}", outcome);
//! # Ok(())
//! # }
//! ```
//!
//! ## From string parameters
//!
//! ```
//! use std::collections::HashMap;
//! use trove_versioner::versioner_for;
//!
//! let mut params = HashMap::new();
//! params.insert("keep".to_string(), "3".to_string());
//!
//! let versioner = versioner_for("simple", "/srv/sync/docs", &params).unwrap();
//! assert!(versioner_for("staggered", "/srv/sync/docs", &params).is_err());
//! # drop(versioner);
//! ```

#![warn(missing_docs)]

mod config;
mod diagnostics;
mod error;
mod fsutil;
mod pruner;
mod tag;
mod versioner;

pub use config::{VersionerConfig, DEFAULT_KEEP, MARKER_DIR, VERSIONS_DIR};
pub use diagnostics::{Diagnostics, TracingDiagnostics, VersionerEvent};
pub use error::{ArchiveError, ConfigError, PruneError};
pub use pruner::{discover_versions, ArchivedVersion, PruneReport, Pruner};
pub use tag::{tagged_filename, tagged_os_filename, timestamp_tag, NamingScheme, TIME_FORMAT};
pub use versioner::{versioner_for, ArchiveOutcome, SimpleVersioner, Versioner};
