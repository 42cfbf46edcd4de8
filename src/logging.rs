//! Diagnostic logging
//!
//! Everything goes to stderr so stdout carries only the diff.

use tracing_subscriber::EnvFilter;

/// Filter used without `-v`
pub const DEFAULT_FILTER: &str = "zone_diff=warn";

/// Filter used with `-v`
pub const VERBOSE_FILTER: &str = "zone_diff=debug";

/// Build the log filter. `RUST_LOG` takes precedence over `verbose`.
pub fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            VERBOSE_FILTER
        } else {
            DEFAULT_FILTER
        })
    })
}

/// Install the stderr subscriber. Later calls are no-ops.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
