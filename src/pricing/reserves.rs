// src/pricing/reserves.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::time::Duration;
use tracing::{debug, warn};

use crate::decoders::pump::amm::PoolDescriptor;
use crate::error::MarketCapError;
use crate::pricing::call_with_timeout;
use crate::pricing::capabilities::{BalanceReader, TokenBalance};
use crate::pricing::market_cap::normalize_amount;

/// Soldes des deux vaults d'un pool à un instant donné.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveSnapshot {
    pub pool: Pubkey,
    pub base_amount: u64,
    pub base_decimals: u8,
    pub quote_amount: u64,
    pub quote_decimals: u8,
}

impl ReserveSnapshot {
    pub fn new(pool: Pubkey, base: TokenBalance, quote: TokenBalance) -> Self {
        Self {
            pool,
            base_amount: base.amount,
            base_decimals: base.decimals,
            quote_amount: quote.amount,
            quote_decimals: quote.decimals,
        }
    }

    /// Réserve de token en unités "humaines".
    pub fn base_reserve(&self) -> Result<Decimal, MarketCapError> {
        normalize_amount(self.base_amount, self.base_decimals)
    }

    /// Réserve d'actif de référence en unités "humaines".
    pub fn quote_reserve(&self) -> Result<Decimal, MarketCapError> {
        normalize_amount(self.quote_amount, self.quote_decimals)
    }
}

/// Lit les soldes actuels des deux vaults d'un pool, en un seul appel.
/// Pas de ré-essai ici : un échec est propagé tel quel.
pub async fn resolve(
    pool: &PoolDescriptor,
    reader: &dyn BalanceReader,
    timeout: Duration,
) -> Result<ReserveSnapshot, MarketCapError> {
    let vaults = [pool.base_vault, pool.quote_vault];

    let balances = call_with_timeout(timeout, reader.read_balances(&vaults))
        .await
        .map_err(|e| {
            warn!(pool = %pool.address, error = %e, "Lecture des vaults impossible");
            MarketCapError::ReserveUnavailable(e)
        })?;

    let lookup = |index: usize, side: &str| {
        balances.get(index).copied().flatten().ok_or_else(|| {
            MarketCapError::ReserveUnavailable(format!(
                "{} vault {} of pool {} returned no data",
                side, vaults[index], pool.address
            ))
        })
    };
    let base = lookup(0, "base")?;
    let quote = lookup(1, "quote")?;

    let snapshot = ReserveSnapshot::new(pool.address, base, quote);
    // Valide les précisions dès maintenant plutôt qu'au calcul.
    snapshot.base_reserve()?;
    snapshot.quote_reserve()?;

    debug!(
        pool = %pool.address,
        base_amount = snapshot.base_amount,
        quote_amount = snapshot.quote_amount,
        "Réserves résolues"
    );
    Ok(snapshot)
}
