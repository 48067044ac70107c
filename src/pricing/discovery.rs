// src/pricing/discovery.rs

use rust_decimal::Decimal;
use solana_sdk::pubkey::Pubkey;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::decoders::pump::amm::{decode_pool, PoolDescriptor};
use crate::error::MarketCapError;
use crate::pricing::capabilities::{RawPoolData, TokenBalance};
use crate::pricing::market_cap::normalize_amount;

/// Décode les candidats et ne garde que ceux qui associent `token_mint` à `reference_mint`.
/// Les pools retournés sont orientés : base = token, quote = référence.
/// Un candidat indécodable est simplement écarté.
pub fn decode_candidates(
    token_mint: &Pubkey,
    reference_mint: &Pubkey,
    candidates: &[RawPoolData],
) -> Vec<PoolDescriptor> {
    candidates
        .iter()
        .filter_map(|raw| match decode_pool(&raw.address, &raw.data) {
            Ok(pool) if pool.pairs(token_mint, reference_mint) => pool.oriented_to(reference_mint),
            Ok(pool) => {
                debug!(pool = %pool.address, base = %pool.base_mint, quote = %pool.quote_mint, "Paire différente, candidat écarté");
                None
            }
            Err(e) => {
                debug!(pool = %raw.address, error = %e, "Candidat indécodable, écarté");
                None
            }
        })
        .collect()
}

// Clé de classement d'un candidat survivant.
struct Ranked {
    pool: PoolDescriptor,
    liquidity: Decimal,
    base_amount: u64,
}

// Liquidité d'abord, puis le plus gros vault de base, puis la plus petite adresse (octets).
fn rank_order(a: &Ranked, b: &Ranked) -> Ordering {
    a.liquidity
        .cmp(&b.liquidity)
        .then(a.base_amount.cmp(&b.base_amount))
        .then_with(|| b.pool.address.cmp(&a.pool.address))
}

/// Classe des pools déjà décodés et orientés selon leur liquidité (solde du vault de quote,
/// normalisé avec `reference_decimals`), et retourne le meilleur.
///
/// Un pool dont un vault est absent de `balances`, ou dont le vault de quote est vide,
/// ne participe pas au classement.
pub fn rank_pools(
    token_mint: &Pubkey,
    reference_mint: &Pubkey,
    reference_decimals: u8,
    pools: &[PoolDescriptor],
    balances: &HashMap<Pubkey, TokenBalance>,
) -> Result<PoolDescriptor, MarketCapError> {
    let mut ranked = Vec::with_capacity(pools.len());
    for pool in pools {
        let (Some(base), Some(quote)) = (balances.get(&pool.base_vault), balances.get(&pool.quote_vault)) else {
            debug!(pool = %pool.address, "Solde de vault indisponible, candidat écarté");
            continue;
        };
        if quote.amount == 0 {
            debug!(pool = %pool.address, "Vault de quote vide, candidat écarté");
            continue;
        }
        ranked.push(Ranked {
            pool: *pool,
            liquidity: normalize_amount(quote.amount, reference_decimals)?,
            base_amount: base.amount,
        });
    }

    let best = ranked
        .into_iter()
        .max_by(rank_order)
        .ok_or(MarketCapError::NoPoolFound {
            token_mint: *token_mint,
            reference_mint: *reference_mint,
        })?;

    info!(pool = %best.pool.address, liquidity = %best.liquidity, "Pool le plus liquide sélectionné");
    Ok(best.pool)
}

/// Sélectionne le pool le plus liquide parmi des comptes bruts.
/// `balances` associe chaque vault à son solde courant (fourni par un `BalanceReader`).
/// Aucun accès réseau ici.
pub fn select_best_pool(
    token_mint: &Pubkey,
    reference_mint: &Pubkey,
    reference_decimals: u8,
    candidates: &[RawPoolData],
    balances: &HashMap<Pubkey, TokenBalance>,
) -> Result<PoolDescriptor, MarketCapError> {
    let pools = decode_candidates(token_mint, reference_mint, candidates);
    rank_pools(token_mint, reference_mint, reference_decimals, &pools, balances)
}
