//! Console logging.
//!
//! Logs go to stderr so that report and CSV output on stdout stay clean.
//! The filter defaults to `info` and follows `RUST_LOG` when set.

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. `verbose` lowers the default to `debug`.
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
