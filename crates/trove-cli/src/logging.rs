//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Pick the log filter directive.
///
/// `-v` flags win over the configured level; `RUST_LOG` wins over both and
/// is applied by [`init`].
pub fn level_for(verbose: u8, configured: &str) -> String {
    match verbose {
        0 => configured.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Initialize tracing (log to stderr).
pub fn init(verbose: u8, configured: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose, configured)));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
