//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use std::path::{Path, PathBuf};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use trove_versioner::{ArchiveOutcome, ArchivedVersion, PruneReport};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the results of an archive run.
    pub fn format_outcomes(&self, outcomes: &[(PathBuf, ArchiveOutcome)]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = outcomes
                    .iter()
                    .map(|(file, outcome)| match outcome {
                        ArchiveOutcome::Missing => serde_json::json!({
                            "file": file.display().to_string(),
                            "archived": false,
                        }),
                        ArchiveOutcome::Archived { destination, prune } => serde_json::json!({
                            "file": file.display().to_string(),
                            "archived": true,
                            "destination": destination.display().to_string(),
                            "prune": prune.as_ref().map(prune_json),
                        }),
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                if outcomes.is_empty() {
                    return Ok(self.colorize("Nothing archived.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["File", "Result", "Archived As", "Removed"]);
                for (file, outcome) in outcomes {
                    let file = file.display().to_string();
                    match outcome {
                        ArchiveOutcome::Missing => {
                            builder.push_record([file.as_str(), "missing", "-", "-"]);
                        }
                        ArchiveOutcome::Archived { destination, prune } => {
                            let name = file_name(destination);
                            let removed = match prune {
                                Some(report) => report.removed.len().to_string(),
                                None => "?".to_string(),
                            };
                            builder.push_record([
                                file.as_str(),
                                "archived",
                                name.as_str(),
                                removed.as_str(),
                            ]);
                        }
                    }
                }
                Ok(self.render(builder))
            }
            OutputFormat::Quiet => Ok(outcomes
                .iter()
                .filter_map(|(_, outcome)| match outcome {
                    ArchiveOutcome::Archived { destination, .. } => {
                        Some(destination.display().to_string())
                    }
                    ArchiveOutcome::Missing => None,
                })
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format archived versions of one file.
    pub fn format_versions(&self, versions: &[ArchivedVersion]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = versions
                    .iter()
                    .map(|v| {
                        serde_json::json!({
                            "path": v.path.display().to_string(),
                            "scheme": v.scheme.as_str(),
                            "tag": v.tag,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                if versions.is_empty() {
                    return Ok(self.colorize("No versions found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Tag", "Scheme", "Name"]);
                for version in versions {
                    let name = file_name(&version.path);
                    builder.push_record([
                        version.tag.as_str(),
                        version.scheme.as_str(),
                        name.as_str(),
                    ]);
                }
                Ok(self.render(builder))
            }
            OutputFormat::Quiet => Ok(versions
                .iter()
                .map(|v| v.path.display().to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format the result of a prune run.
    pub fn format_prune(&self, dir: &Path, report: &PruneReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let mut json = prune_json(report);
                json["dir"] = serde_json::json!(dir.display().to_string());
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                let mut lines = vec![self.success(&report.summary())];
                for path in &report.removed {
                    lines.push(format!("  - {}", file_name(path)));
                }
                for (path, error) in &report.failed {
                    lines.push(self.warning(&format!("{}: {}", file_name(path), error)));
                }
                Ok(lines.join("\n"))
            }
            OutputFormat::Quiet => Ok(report
                .removed
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn prune_json(report: &PruneReport) -> serde_json::Value {
    serde_json::json!({
        "matched": report.matched,
        "removed": report
            .removed
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>(),
        "failed": report
            .failed
            .iter()
            .map(|(path, error)| {
                serde_json::json!({ "path": path.display().to_string(), "error": error })
            })
            .collect::<Vec<_>>(),
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
