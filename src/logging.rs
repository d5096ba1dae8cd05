//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never mix with chat output. The filter comes from
//! `BABEL_LOG` when set, otherwise from the `--verbose` flag.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "BABEL_LOG";

fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("babel_chat=debug,warn")
    } else {
        EnvFilter::new("warn")
    }
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| default_filter(verbose));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
