use serde::Deserialize;
use anyhow::Result;

pub const DEFAULT_ORACLE_URL: &str =
    "https://api.diadata.org/v1/assetQuotation/Solana/0x0000000000000000000000000000000000000000";

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub solana_rpc_url: String,
    /// Mint du token à évaluer (peut aussi être passé en argument au binaire).
    #[serde(default)]
    pub token_mint: Option<String>,
    /// Supply brute (unités de base) à utiliser à la place de la supply on-chain.
    #[serde(default)]
    pub total_supply: Option<u64>,
    #[serde(default = "default_quote_decimals")]
    pub quote_decimals: u8,
    #[serde(default = "default_rpc_max_retries")]
    pub rpc_max_retries: u8,
    #[serde(default = "default_rpc_retry_delay_ms")]
    pub rpc_retry_delay_ms: u64,
    #[serde(default = "default_call_timeout_ms")]
    pub call_timeout_ms: u64,
    #[serde(default = "default_oracle_url")]
    pub oracle_url: String,
}

fn default_quote_decimals() -> u8 { 9 }
fn default_rpc_max_retries() -> u8 { 3 }
fn default_rpc_retry_delay_ms() -> u64 { 500 }
fn default_call_timeout_ms() -> u64 { 10_000 }
fn default_oracle_url() -> String { DEFAULT_ORACLE_URL.to_string() }

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()?;
        Ok(config)
    }

    /// Variante testable : lit la configuration depuis des paires clé/valeur.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::from_iter::<_, Config>(pairs)?)
    }
}
