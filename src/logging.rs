//! Log output for the `catsync` binary
//!
//! Library code only emits `tracing` events. The binary installs a
//! subscriber writing to stderr so that `--json` output on stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a full filter directive, e.g. `catsync=debug`
pub const LOG_ENV: &str = "CATSYNC_LOG";

/// Default directive for a `-v` count.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "catsync=warn",
        1 => "catsync=debug",
        _ => "catsync=trace",
    }
}

/// `CATSYNC_LOG` when set and valid, otherwise the `-v` level.
pub fn filter(verbose: u8) -> EnvFilter {
    std::env::var(LOG_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive(verbose)))
}

pub fn init(verbose: u8) {
    // Logs go to stderr, never stdout
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
