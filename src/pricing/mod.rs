// src/pricing/mod.rs

// Le coeur : découverte du pool, réserves, cotation oracle et calcul de market cap.
// Aucun accès réseau direct ici, uniquement via les traits de `capabilities`.

pub mod capabilities;
pub mod discovery;
pub mod market_cap;
pub mod oracle;
pub mod reserves;
pub mod service;

pub use capabilities::{AccountEnumerator, BalanceReader, PriceOracle, RawPoolData, TokenBalance};
pub use discovery::select_best_pool;
pub use market_cap::{compute_market_cap, MarketCapResult};
pub use oracle::{fetch_reference_asset_usd_price, OracleQuote};
pub use reserves::{resolve, ReserveSnapshot};
pub use service::{MarketCapReport, MarketCapService, ServiceSettings};

use std::future::Future;
use std::time::Duration;

/// Exécute un appel externe unique sous `timeout`.
/// L'expiration devient une erreur, jamais une valeur par défaut.
pub(crate) async fn call_with_timeout<T, F>(timeout: Duration, call: F) -> Result<T, String>
where
    F: Future<Output = anyhow::Result<T>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(format!("{:#}", e)),
        Err(_) => Err(format!("call timed out after {} ms", timeout.as_millis())),
    }
}
