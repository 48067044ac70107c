// src/data_pipeline/api_connectors/dia.rs

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;
use std::str::FromStr;

use crate::pricing::capabilities::PriceOracle;

// Seul le champ `Price` nous intéresse dans la réponse DIA.
#[derive(Debug, Deserialize)]
pub struct AssetQuotation {
    #[serde(rename = "Price", deserialize_with = "exact_decimal")]
    pub price: Decimal,
    #[serde(rename = "Symbol", default)]
    pub symbol: Option<String>,
}

// Lit le nombre JSON depuis son texte, sans arrondi binaire. Accepte "1.5e2".
fn exact_decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let raw = Box::<RawValue>::deserialize(deserializer)?;
    let text = raw.get();
    if text.starts_with('"') || text == "null" {
        return Err(serde::de::Error::custom(format!("Price is not a number: {}", text)));
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|e| serde::de::Error::custom(format!("Price {} is not a decimal: {}", text, e)))
}

/// Parse le corps JSON d'une cotation DIA.
pub fn parse_quotation(body: &str) -> Result<AssetQuotation> {
    serde_json::from_str(body).context("Réponse DIA malformée")
}

/// Oracle SOL/USD basé sur l'API publique de DIA.
pub struct DiaOracle {
    client: reqwest::Client,
    url: String,
}

impl DiaOracle {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl PriceOracle for DiaOracle {
    async fn fetch_usd_price(&self) -> Result<Decimal> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await?;
            return Err(anyhow!("Erreur API DIA: {} - {}", status, error_body));
        }

        let body = response.text().await?;
        Ok(parse_quotation(&body)?.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_price_field() {
        let body = r#"{"Symbol":"SOL","Name":"Solana","Price":148.3712,"PriceYesterday":145.1,"Time":"2026-10-18T09:00:00Z","Source":"diadata.org"}"#;
        let quotation = parse_quotation(body).unwrap();
        assert_eq!(quotation.price, dec!(148.3712));
        assert_eq!(quotation.symbol.as_deref(), Some("SOL"));
    }

    #[test]
    fn price_digits_are_kept_exactly() {
        // Trop de chiffres pour un f64 : tous sont conservés.
        let quotation = parse_quotation(r#"{"Price":148.30000000000000000001}"#).unwrap();
        assert_eq!(quotation.price, dec!(148.30000000000000000001));

        let quotation = parse_quotation(r#"{"Price":1.4837e2}"#).unwrap();
        assert_eq!(quotation.price, dec!(148.37));
    }

    #[test]
    fn non_numeric_price_is_an_error() {
        assert!(parse_quotation(r#"{"Price":"148.37"}"#).is_err());
        assert!(parse_quotation(r#"{"Price":null}"#).is_err());
    }

    #[test]
    fn missing_price_is_an_error() {
        assert!(parse_quotation(r#"{"Symbol":"SOL"}"#).is_err());
        assert!(parse_quotation("<html>502</html>").is_err());
    }
}
