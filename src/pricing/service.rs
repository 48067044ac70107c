// src/pricing/service.rs

use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::decoders::pump::amm::PoolDescriptor;
use crate::error::MarketCapError;
use crate::pricing::call_with_timeout;
use crate::pricing::capabilities::{AccountEnumerator, BalanceReader, PriceOracle, TokenBalance};
use crate::pricing::discovery::{decode_candidates, rank_pools};
use crate::pricing::market_cap::{compute_market_cap, MarketCapResult};
use crate::pricing::oracle::{fetch_reference_asset_usd_price, OracleQuote};
use crate::pricing::reserves::{resolve, ReserveSnapshot};

/// Paramètres d'une exécution du service.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub reference_mint: Pubkey,
    /// Précision de l'actif de référence : échelle du classement par liquidité, et
    /// valeur attendue des décimales du vault de quote au moment du calcul.
    pub reference_decimals: u8,
    /// Supply brute (unités de base) à utiliser à la place de la supply on-chain.
    pub total_supply_override: Option<u64>,
    /// Borne de chaque appel externe.
    pub call_timeout: Duration,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            reference_mint: spl_token::native_mint::id(),
            reference_decimals: spl_token::native_mint::DECIMALS,
            total_supply_override: None,
            call_timeout: Duration::from_secs(10),
        }
    }
}

impl From<&Config> for ServiceSettings {
    fn from(config: &Config) -> Self {
        Self {
            reference_mint: spl_token::native_mint::id(),
            reference_decimals: config.quote_decimals,
            total_supply_override: config.total_supply,
            call_timeout: Duration::from_millis(config.call_timeout_ms),
        }
    }
}

/// Tout ce qui a servi à produire le résultat, pour l'affichage ou les logs.
#[derive(Debug, Clone, Serialize)]
pub struct MarketCapReport {
    pub pool: PoolDescriptor,
    pub reserves: ReserveSnapshot,
    pub quote: OracleQuote,
    pub total_supply: u64,
    pub token_decimals: u8,
    pub result: MarketCapResult,
}

/// Relie les trois capacités externes au coeur de calcul.
/// Sans état mutable : des appels concurrents pour des tokens différents sont indépendants.
#[derive(Clone)]
pub struct MarketCapService {
    enumerator: Arc<dyn AccountEnumerator>,
    balances: Arc<dyn BalanceReader>,
    oracle: Arc<dyn PriceOracle>,
    settings: ServiceSettings,
}

impl MarketCapService {
    pub fn new(
        enumerator: Arc<dyn AccountEnumerator>,
        balances: Arc<dyn BalanceReader>,
        oracle: Arc<dyn PriceOracle>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            enumerator,
            balances,
            oracle,
            settings,
        }
    }

    /// Énumère, décode et classe les pools du token ; retourne le plus liquide, orienté.
    #[instrument(name = "discover_pool", skip_all, fields(token_mint = %token_mint))]
    pub async fn discover_pool(&self, token_mint: &Pubkey) -> Result<PoolDescriptor, MarketCapError> {
        let reference_mint = self.settings.reference_mint;
        let timeout = self.settings.call_timeout;

        // --- 1. Énumération des comptes candidats ---
        let candidates = call_with_timeout(
            timeout,
            self.enumerator.find_candidate_pools(token_mint, &reference_mint),
        )
        .await
        .map_err(|e| {
            warn!(error = %e, "Scan des pools impossible");
            MarketCapError::EnumerationUnavailable(e)
        })?;

        // --- 2. Décodage et filtrage par paire ---
        let pools = decode_candidates(token_mint, &reference_mint, &candidates);
        info!(candidates = candidates.len(), eligible = pools.len(), "Candidats décodés");
        if pools.is_empty() {
            return Err(MarketCapError::NoPoolFound {
                token_mint: *token_mint,
                reference_mint,
            });
        }

        // --- 3. Soldes de tous les vaults, en un seul appel ---
        let vaults: Vec<Pubkey> = pools
            .iter()
            .flat_map(|pool| [pool.base_vault, pool.quote_vault])
            .collect();
        let balances = call_with_timeout(timeout, self.balances.read_balances(&vaults))
            .await
            .map_err(|e| {
                warn!(error = %e, "Lecture des vaults candidats impossible");
                MarketCapError::ReserveUnavailable(e)
            })?;
        let balances: HashMap<Pubkey, TokenBalance> = vaults
            .into_iter()
            .zip(balances)
            .filter_map(|(vault, balance)| balance.map(|b| (vault, b)))
            .collect();

        // --- 4. Classement ---
        rank_pools(
            token_mint,
            &reference_mint,
            self.settings.reference_decimals,
            &pools,
            &balances,
        )
    }

    /// Prix du token en actif de référence, en USD, et sa market cap.
    /// Réserves, cotation et supply sont lues en parallèle ; le moindre échec annule tout.
    #[instrument(name = "get_market_cap", skip_all, fields(token_mint = %token_mint))]
    pub async fn get_market_cap(&self, token_mint: &Pubkey) -> Result<MarketCapReport, MarketCapError> {
        let pool = self.discover_pool(token_mint).await?;
        let timeout = self.settings.call_timeout;

        let (reserves, quote, supply) = tokio::join!(
            resolve(&pool, self.balances.as_ref(), timeout),
            fetch_reference_asset_usd_price(self.oracle.as_ref(), timeout),
            self.read_supply(token_mint),
        );
        let reserves = reserves?;
        let quote = quote?;

        // La précision configurée de l'actif de référence doit être celle du vault lu.
        if reserves.quote_decimals != self.settings.reference_decimals {
            return Err(MarketCapError::InvalidInput(format!(
                "quote vault of pool {} reports {} decimals, configured reference precision is {}",
                pool.address, reserves.quote_decimals, self.settings.reference_decimals
            )));
        }

        let (total_supply, token_decimals) = match supply? {
            Some(onchain) => (onchain.amount, onchain.decimals),
            None => (
                self.settings.total_supply_override.unwrap_or_default(),
                reserves.base_decimals,
            ),
        };

        let result = compute_market_cap(&reserves, &quote, total_supply, token_decimals)?;

        info!(
            pool = %pool.address,
            price_in_reference = %result.token_price_in_reference_asset,
            price_usd = %result.token_price_in_usd,
            market_cap_usd = %result.market_cap_usd,
            "Market cap calculée"
        );

        Ok(MarketCapReport {
            pool,
            reserves,
            quote,
            total_supply,
            token_decimals,
            result,
        })
    }

    // `None` quand la supply est imposée par la configuration.
    async fn read_supply(&self, token_mint: &Pubkey) -> Result<Option<TokenBalance>, MarketCapError> {
        if self.settings.total_supply_override.is_some() {
            return Ok(None);
        }

        let supply = call_with_timeout(self.settings.call_timeout, self.balances.read_supply(token_mint))
            .await
            .map_err(MarketCapError::SupplyUnavailable)?;

        supply.map(Some).ok_or_else(|| {
            MarketCapError::SupplyUnavailable(format!("mint {} not found", token_mint))
        })
    }
}
