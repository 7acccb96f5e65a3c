//! Logging setup
//!
//! RUST_LOG takes precedence; otherwise `info`, or `debug` with --verbose.

use tracing_subscriber::{fmt, EnvFilter};

pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // Logs go to stderr so JSON output on stdout stays clean
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}
