// src/pricing/oracle.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};

use crate::error::MarketCapError;
use crate::pricing::call_with_timeout;
use crate::pricing::capabilities::PriceOracle;

/// Prix USD de l'actif de référence, horodaté au moment de la lecture.
/// La politique de fraîcheur appartient au client oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleQuote {
    pub reference_asset_usd_price: Decimal,
    pub fetched_at: SystemTime,
}

impl OracleQuote {
    /// Valide une valeur brute : strictement positive. Aucune correction tentée.
    pub fn from_raw(raw: Decimal, fetched_at: SystemTime) -> Result<Self, MarketCapError> {
        if raw <= Decimal::ZERO {
            return Err(MarketCapError::OracleUnavailable(format!(
                "oracle returned a non-positive price: {}",
                raw
            )));
        }

        Ok(Self {
            reference_asset_usd_price: raw,
            fetched_at,
        })
    }
}

/// Lit le prix USD de l'actif de référence via l'oracle fourni, sous `timeout`.
pub async fn fetch_reference_asset_usd_price(
    oracle: &dyn PriceOracle,
    timeout: Duration,
) -> Result<OracleQuote, MarketCapError> {
    let raw = call_with_timeout(timeout, oracle.fetch_usd_price())
        .await
        .map_err(|e| {
            warn!(error = %e, "Oracle de prix indisponible");
            MarketCapError::OracleUnavailable(e)
        })?;

    let quote = OracleQuote::from_raw(raw, SystemTime::now())?;
    debug!(price = %quote.reference_asset_usd_price, "Cotation oracle reçue");
    Ok(quote)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    struct FixedOracle(Option<Decimal>);

    #[async_trait]
    impl PriceOracle for FixedOracle {
        async fn fetch_usd_price(&self) -> Result<Decimal> {
            self.0.ok_or_else(|| anyhow!("503 Service Unavailable"))
        }
    }

    #[tokio::test]
    async fn accepts_positive_quote() {
        let quote = fetch_reference_asset_usd_price(&FixedOracle(Some(dec!(148.371234567891))), Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(quote.reference_asset_usd_price, dec!(148.371234567891));
    }

    #[tokio::test]
    async fn rejects_zero_and_negative() {
        for raw in [Decimal::ZERO, dec!(-0.0), dec!(-12.5), dec!(0.0000)] {
            let err = fetch_reference_asset_usd_price(&FixedOracle(Some(raw)), Duration::from_secs(1))
                .await
                .unwrap_err();
            assert!(matches!(err, MarketCapError::OracleUnavailable(_)), "raw = {}", raw);
        }
    }

    #[tokio::test]
    async fn missing_quote_is_oracle_unavailable() {
        let err = fetch_reference_asset_usd_price(&FixedOracle(None), Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, MarketCapError::OracleUnavailable(msg) if msg.contains("503")));
    }
}
