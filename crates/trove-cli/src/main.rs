//! Trove CLI - Keep prior versions of files before they are replaced.

use clap::Parser;
use std::path::{Path, PathBuf};
use trove_cli::commands;
use trove_cli::{logging, Cli, Command, Config, Formatter};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> trove_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load config (defaults when no file exists)
    let config = Config::load(cli.config.as_deref())?;

    logging::init(cli.verbose, &config.settings.log_level);

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    let root = cli.root.as_deref().map(std::path::absolute).transpose()?;
    let resolve = |file: &Path| {
        config.resolve(root.as_deref(), cli.folder.as_deref(), file, cli.keep)
    };

    match &cli.command {
        Command::Archive(args) => {
            let files = args
                .files
                .iter()
                .map(std::path::absolute)
                .collect::<std::io::Result<Vec<PathBuf>>>()?;
            let folder = resolve(&files[0])?;
            let versioner = folder.versioner()?;
            commands::execute_archive(&files, versioner.as_ref(), &formatter)?;
        }
        Command::Prune(args) => {
            let file = std::path::absolute(&args.file)?;
            let versioner = resolve(&file)?.simple()?;
            commands::execute_prune(&file, &versioner, &formatter)?;
        }
        Command::List(args) => {
            let file = std::path::absolute(&args.file)?;
            let versioner = resolve(&file)?.simple()?;
            commands::execute_list(&file, &versioner, &formatter)?;
        }
    }

    Ok(())
}
