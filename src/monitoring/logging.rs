// DANS : src/monitoring/logging.rs
use anyhow::{anyhow, Result};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// Filtre utilisé quand RUST_LOG n'est pas défini.
pub const DEFAULT_LOG_DIRECTIVE: &str = "info";

/// Installe un subscriber JSON global. Les spans `discover_pool` / `get_market_cap`
/// sont émises à leur fermeture, avec leur durée.
pub fn setup_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("Impossible d'installer le subscriber tracing: {}", e))
}
