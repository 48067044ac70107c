// src/pricing/market_cap.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::MarketCapError;
use crate::pricing::oracle::OracleQuote;
use crate::pricing::reserves::ReserveSnapshot;

/// Prix et capitalisation, en décimal exact (sérialisés en chaînes par `rust_decimal`,
/// donc sans perte de précision).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketCapResult {
    pub token_price_in_reference_asset: Decimal,
    pub token_price_in_usd: Decimal,
    pub market_cap_usd: Decimal,
}

/// Convertit un montant brut en unités "humaines" : `amount / 10^decimals`.
pub fn normalize_amount(amount: u64, decimals: u8) -> Result<Decimal, MarketCapError> {
    Decimal::try_from_i128_with_scale(i128::from(amount), u32::from(decimals)).map_err(|_| {
        MarketCapError::InvalidInput(format!(
            "decimal precision {} exceeds the supported maximum of 28",
            decimals
        ))
    })
}

/// Combine réserves, cotation oracle et supply.
///
/// - prix en actif de référence = quote normalisée / base normalisée
/// - prix USD = prix en référence * prix USD de la référence
/// - market cap = prix USD * supply normalisée
pub fn compute_market_cap(
    reserves: &ReserveSnapshot,
    quote: &OracleQuote,
    total_supply: u64,
    base_decimals: u8,
) -> Result<MarketCapResult, MarketCapError> {
    // Les réserves peuvent avoir bougé depuis la sélection du pool.
    if reserves.base_amount == 0 {
        return Err(MarketCapError::InvalidInput(
            "base reserve is zero, price is undefined".to_string(),
        ));
    }
    if total_supply == 0 {
        return Err(MarketCapError::InvalidInput("total supply is zero".to_string()));
    }
    if quote.reference_asset_usd_price <= Decimal::ZERO {
        return Err(MarketCapError::OracleUnavailable(format!(
            "non-positive reference price {}",
            quote.reference_asset_usd_price
        )));
    }

    let overflow = |step: &str| MarketCapError::InvalidInput(format!("decimal overflow while computing {}", step));

    let token_amount = normalize_amount(reserves.base_amount, reserves.base_decimals)?;
    let reference_amount = normalize_amount(reserves.quote_amount, reserves.quote_decimals)?;
    let supply = normalize_amount(total_supply, base_decimals)?;

    let token_price_in_reference_asset = reference_amount
        .checked_div(token_amount)
        .ok_or_else(|| overflow("price in reference asset"))?;
    let token_price_in_usd = token_price_in_reference_asset
        .checked_mul(quote.reference_asset_usd_price)
        .ok_or_else(|| overflow("price in usd"))?;
    let market_cap_usd = token_price_in_usd
        .checked_mul(supply)
        .ok_or_else(|| overflow("market cap"))?;

    Ok(MarketCapResult {
        token_price_in_reference_asset,
        token_price_in_usd,
        market_cap_usd,
    })
}
