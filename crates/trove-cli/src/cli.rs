//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Trove - Keep prior versions of files before they are replaced.
#[derive(Debug, Parser)]
#[command(name = "trove")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "TROVE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Configured folder to use
    #[arg(short = 'F', long, global = true)]
    pub folder: Option<String>,

    /// Protected root directory (overrides the configured folders)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Number of archived copies to keep
    #[arg(short, long, global = true)]
    pub keep: Option<usize>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (paths only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Move files into the archive and apply retention
    Archive(ArchiveArgs),

    /// Apply retention to the archived copies of a file
    Prune(FileArgs),

    /// List archived copies of a file, oldest first
    List(FileArgs),
}

/// Arguments for the archive command.
#[derive(Debug, Parser)]
pub struct ArchiveArgs {
    /// Files to archive
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Arguments naming a single original file.
#[derive(Debug, Parser)]
pub struct FileArgs {
    /// Original path of the file (it does not need to exist)
    pub file: PathBuf,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => Self::Table,
            CliFormat::Json => Self::Json,
            CliFormat::Quiet => Self::Quiet,
        }
    }
}
