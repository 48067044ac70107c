use anyhow::Result;
use solana_sdk::pubkey::Pubkey;
use spl_token_2022::{extension::StateWithExtensions, state::Account as SplTokenAccount};

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSplAccount {
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}

/// Décode les données brutes d'un compte de jeton SPL (vault), extensions Token-2022 tolérées.
pub fn decode_account(data: &[u8]) -> Result<DecodedSplAccount> {
    let spl_account = StateWithExtensions::<SplTokenAccount>::unpack(data)?;
    Ok(DecodedSplAccount {
        mint: spl_account.base.mint,
        owner: spl_account.base.owner,
        amount: spl_account.base.amount,
    })
}
