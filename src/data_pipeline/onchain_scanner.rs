// src/data_pipeline/onchain_scanner.rs

use anyhow::Result;
use async_trait::async_trait;
use solana_account_decoder::UiAccountEncoding;
use solana_client::rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig};
use solana_client::rpc_filter::{Memcmp, RpcFilterType};
use solana_sdk::pubkey::Pubkey;
use tracing::info;

use crate::decoders::pump::amm::pool::{BASE_MINT_OFFSET, PUMP_PROGRAM_ID, QUOTE_MINT_OFFSET};
use crate::pricing::capabilities::{AccountEnumerator, RawPoolData};
use crate::rpc::ResilientRpcClient;

/// Filtres memcmp pour les deux orientations possibles d'une paire :
/// (base = token, quote = référence) puis (base = référence, quote = token).
pub fn pair_filters(token_mint: &Pubkey, reference_mint: &Pubkey) -> [Vec<RpcFilterType>; 2] {
    let pair = |base: &Pubkey, quote: &Pubkey| {
        vec![
            RpcFilterType::Memcmp(Memcmp::new_base58_encoded(BASE_MINT_OFFSET, base.as_ref())),
            RpcFilterType::Memcmp(Memcmp::new_base58_encoded(QUOTE_MINT_OFFSET, quote.as_ref())),
        ]
    };
    [pair(token_mint, reference_mint), pair(reference_mint, token_mint)]
}

pub async fn find_pools_by_program_id_with_filters(
    rpc_client: &ResilientRpcClient,
    program_id: &Pubkey,
    filters: Option<Vec<RpcFilterType>>,
) -> Result<Vec<RawPoolData>> {
    let account_config = RpcAccountInfoConfig {
        encoding: Some(UiAccountEncoding::Base64),
        data_slice: None,
        commitment: None,
        min_context_slot: None,
    };

    let config = RpcProgramAccountsConfig {
        filters,
        account_config,
        with_context: Some(false),
        sort_results: None,
    };

    let accounts = rpc_client.get_program_accounts_with_config(program_id, config).await?;

    Ok(accounts
        .into_iter()
        .map(|(address, account)| RawPoolData {
            address,
            data: account.data,
        })
        .collect())
}

/// Énumère les pools pump.fun AMM d'une paire via `getProgramAccounts`.
pub struct RpcPoolScanner {
    rpc_client: ResilientRpcClient,
    program_id: Pubkey,
}

impl RpcPoolScanner {
    pub fn new(rpc_client: ResilientRpcClient) -> Self {
        Self {
            rpc_client,
            program_id: PUMP_PROGRAM_ID,
        }
    }
}

#[async_trait]
impl AccountEnumerator for RpcPoolScanner {
    async fn find_candidate_pools(
        &self,
        token_mint: &Pubkey,
        reference_mint: &Pubkey,
    ) -> Result<Vec<RawPoolData>> {
        let mut candidates = Vec::new();
        // Une seule requête en échec fait échouer l'ensemble : pas de liste partielle.
        for filters in pair_filters(token_mint, reference_mint) {
            let found =
                find_pools_by_program_id_with_filters(&self.rpc_client, &self.program_id, Some(filters)).await?;
            candidates.extend(found);
        }

        info!(
            token_mint = %token_mint,
            program = %self.program_id,
            found = candidates.len(),
            "Scan on-chain terminé"
        );
        Ok(candidates)
    }
}
