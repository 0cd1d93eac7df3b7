use std::io;
use std::sync::Once;

use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "TONIO_LOG";
const DEFAULT_FILTER: &str = "info";

static LOGGING_INIT: Once = Once::new();

/// Installs the stderr `tracing` subscriber. Later calls are no-ops.
pub fn init() {
    LOGGING_INIT.call_once(|| {
        let filter = resolve_filter(
            std::env::var(LOG_ENV).ok().as_deref(),
            std::env::var("RUST_LOG").ok().as_deref(),
        );
        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(io::stderr)
            .try_init();
        if installed.is_err() {
            tracing::debug!("global tracing subscriber already installed");
        }
    });
}

fn resolve_filter(tonio_log: Option<&str>, rust_log: Option<&str>) -> EnvFilter {
    [tonio_log, rust_log]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|directive| !directive.is_empty())
        .find_map(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
