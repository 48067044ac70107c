// src/bin/market_cap.rs

use anyhow::{anyhow, Context, Result};
use solana_sdk::pubkey::Pubkey;
use std::env;
use std::str::FromStr;
use std::sync::Arc;

use pump_mcap::{
    config::Config,
    data_pipeline::{api_connectors::dia::DiaOracle, onchain_scanner::RpcPoolScanner, vault_balances::RpcBalanceReader},
    monitoring::logging,
    pricing::{MarketCapService, ServiceSettings},
    rpc::ResilientRpcClient,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    logging::setup_logging()?;

    // Le mint peut venir de l'argument 1 ou de TOKEN_MINT.
    let mint_str = env::args()
        .nth(1)
        .or_else(|| config.token_mint.clone())
        .ok_or_else(|| anyhow!("Aucun mint fourni (argument ou TOKEN_MINT)"))?;
    let token_mint = Pubkey::from_str(&mint_str).with_context(|| format!("Mint invalide: {}", mint_str))?;

    let rpc_client = ResilientRpcClient::new(
        config.solana_rpc_url.clone(),
        config.rpc_max_retries,
        config.rpc_retry_delay_ms,
    );

    let service = MarketCapService::new(
        Arc::new(RpcPoolScanner::new(rpc_client.clone())),
        Arc::new(RpcBalanceReader::new(rpc_client)),
        Arc::new(DiaOracle::new(config.oracle_url.clone())),
        ServiceSettings::from(&config),
    );

    let report = service.get_market_cap(&token_mint).await?;

    println!("Using pool: {}", report.pool.address);
    println!(
        "Token price (SOL): {:.10} SOL",
        report.result.token_price_in_reference_asset
    );
    println!("Token price (USD): ${:.10}", report.result.token_price_in_usd);
    println!("Market cap (USD):  ${:.2}", report.result.market_cap_usd);

    Ok(())
}
