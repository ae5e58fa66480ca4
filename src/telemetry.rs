//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "SEQSUM_LOG";

/// Install the global subscriber, logging to stderr.
///
/// Reads per-module levels from `SEQSUM_LOG`
/// (e.g. `SEQSUM_LOG=seqsum::fetch=debug,seqsum=info`) and falls back to
/// `seqsum=warn`. `verbose` raises the fallback to `seqsum=debug`.
///
/// Idempotent: only the first call has any effect.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let fallback = if verbose { "seqsum=debug" } else { "seqsum=warn" };
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(filter)
            .init();
    });
}
