// src/decoders/spl_token_decoders/mint.rs

use anyhow::Result;
use solana_sdk::pubkey::Pubkey;
use spl_token_2022::{extension::StateWithExtensions, state::Mint};

// --- STRUCTURE DE SORTIE PROPRE ---
// Ce qu'on extrait d'un compte de mint : la précision décimale et la supply brute.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMint {
    pub address: Pubkey,
    pub decimals: u8,
    pub supply: u64,
}

/// Décode les données brutes d'un compte de mint (SPL Token ou Token-2022).
pub fn decode_mint(address: &Pubkey, data: &[u8]) -> Result<DecodedMint> {
    // `StateWithExtensions` lit à la fois les anciens mints (sans extensions) et les nouveaux.
    let mint_state = StateWithExtensions::<Mint>::unpack(data)?;

    Ok(DecodedMint {
        address: *address,
        decimals: mint_state.base.decimals,
        supply: mint_state.base.supply,
    })
}
