// src/data_pipeline/vault_balances.rs

use anyhow::Result;
use async_trait::async_trait;
use solana_sdk::{account::Account, pubkey::Pubkey};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::decoders::spl_token_decoders::{account::decode_account, mint::decode_mint};
use crate::pricing::capabilities::{BalanceReader, TokenBalance};
use crate::rpc::ResilientRpcClient;

/// Lit les soldes de vaults et les supplies via `getMultipleAccounts`.
/// 1. les comptes de tokens donnent (mint, montant) ;
/// 2. les mints distincts donnent les décimales.
pub struct RpcBalanceReader {
    rpc_client: ResilientRpcClient,
}

impl RpcBalanceReader {
    pub fn new(rpc_client: ResilientRpcClient) -> Self {
        Self { rpc_client }
    }
}

/// Associe des comptes de tokens bruts aux décimales de leurs mints.
/// Un compte absent, indécodable, ou dont le mint est inconnu donne `None`.
pub fn balances_from_accounts(
    token_accounts: &[(Pubkey, Option<Account>)],
    mint_decimals: &HashMap<Pubkey, u8>,
) -> Vec<Option<TokenBalance>> {
    token_accounts
        .iter()
        .map(|(address, account)| {
            let decoded = account.as_ref().and_then(|a| decode_account(&a.data).ok());
            let balance = decoded.and_then(|d| {
                mint_decimals.get(&d.mint).map(|decimals| TokenBalance {
                    amount: d.amount,
                    decimals: *decimals,
                })
            });
            if balance.is_none() {
                debug!(account = %address, "Compte de token indisponible");
            }
            balance
        })
        .collect()
}

#[async_trait]
impl BalanceReader for RpcBalanceReader {
    async fn read_balances(&self, accounts: &[Pubkey]) -> Result<Vec<Option<TokenBalance>>> {
        let raw = self.rpc_client.get_multiple_accounts(accounts).await?;
        let token_accounts: Vec<(Pubkey, Option<Account>)> = accounts.iter().copied().zip(raw).collect();

        // Mints distincts, dans l'ordre de première apparition.
        let mut seen = HashSet::new();
        let mints: Vec<Pubkey> = token_accounts
            .iter()
            .filter_map(|(_, account)| account.as_ref())
            .filter_map(|account| decode_account(&account.data).ok())
            .map(|decoded| decoded.mint)
            .filter(|mint| seen.insert(*mint))
            .collect();

        let mint_accounts = self.rpc_client.get_multiple_accounts(&mints).await?;
        let mint_decimals: HashMap<Pubkey, u8> = mints
            .iter()
            .zip(mint_accounts)
            .filter_map(|(mint, account)| {
                let account = account?;
                decode_mint(mint, &account.data).ok().map(|m| (*mint, m.decimals))
            })
            .collect();

        Ok(balances_from_accounts(&token_accounts, &mint_decimals))
    }

    async fn read_supply(&self, mint: &Pubkey) -> Result<Option<TokenBalance>> {
        let accounts = self.rpc_client.get_multiple_accounts(std::slice::from_ref(mint)).await?;
        let Some(Some(account)) = accounts.into_iter().next() else {
            return Ok(None);
        };
        let decoded = decode_mint(mint, &account.data)?;
        Ok(Some(TokenBalance {
            amount: decoded.supply,
            decimals: decoded.decimals,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_account(mint: &Pubkey, amount: u64) -> Account {
        let mut data = vec![0u8; 165];
        data[0..32].copy_from_slice(mint.as_ref());
        data[32..64].copy_from_slice(Pubkey::new_unique().as_ref());
        data[64..72].copy_from_slice(&amount.to_le_bytes());
        data[108] = 1;
        Account {
            lamports: 2_039_280,
            data,
            owner: spl_token::id(),
            executable: false,
            rent_epoch: 0,
        }
    }

    #[test]
    fn joins_amounts_with_mint_decimals() {
        let token_mint = Pubkey::new_unique();
        let wsol = spl_token::native_mint::id();
        let base_vault = Pubkey::new_unique();
        let quote_vault = Pubkey::new_unique();
        let closed_vault = Pubkey::new_unique();

        let accounts = vec![
            (base_vault, Some(token_account(&token_mint, 1_000_000))),
            (quote_vault, Some(token_account(&wsol, 2_000_000_000))),
            (closed_vault, None),
        ];
        let decimals = HashMap::from([(token_mint, 6u8), (wsol, 9u8)]);

        let balances = balances_from_accounts(&accounts, &decimals);
        assert_eq!(
            balances,
            vec![
                Some(TokenBalance { amount: 1_000_000, decimals: 6 }),
                Some(TokenBalance { amount: 2_000_000_000, decimals: 9 }),
                None,
            ]
        );
    }

    #[test]
    fn unknown_mint_or_garbage_is_unavailable() {
        let mut garbage = token_account(&Pubkey::new_unique(), 5);
        garbage.data.truncate(40);
        let accounts = vec![
            (Pubkey::new_unique(), Some(token_account(&Pubkey::new_unique(), 5))),
            (Pubkey::new_unique(), Some(garbage)),
        ];
        assert_eq!(balances_from_accounts(&accounts, &HashMap::new()), vec![None, None]);
    }
}
