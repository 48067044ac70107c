// DANS: src/decoders/pump/amm/pool.rs

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::error::{DecodeError, EncodeError};

// --- CONSTANTES DU PROTOCOLE ---
// Trouvées dans l'IDL
pub const PUMP_PROGRAM_ID: Pubkey = solana_sdk::pubkey!("pAMMBay6oceH9fJKBRHGP5D4bD4sWpmSwMn52FMfXEA");
pub const POOL_ACCOUNT_DISCRIMINATOR: [u8; 8] = [241, 154, 109, 4, 17, 177, 109, 188];

pub const DISCRIMINATOR_LEN: usize = POOL_ACCOUNT_DISCRIMINATOR.len();
/// Taille minimale d'un compte Pool lisible. Les comptes on-chain sont souvent plus grands,
/// les octets au-delà sont ignorés.
pub const POOL_ACCOUNT_LEN: usize = DISCRIMINATOR_LEN + std::mem::size_of::<onchain_layouts::Pool>();

// Offsets absolus (discriminateur inclus), utilisés par les filtres memcmp du scan RPC.
pub const BASE_MINT_OFFSET: usize = DISCRIMINATOR_LEN + std::mem::offset_of!(onchain_layouts::Pool, base_mint);
pub const QUOTE_MINT_OFFSET: usize = DISCRIMINATOR_LEN + std::mem::offset_of!(onchain_layouts::Pool, quote_mint);


// --- STRUCTURE DE SORTIE "PROPRE" ---
// Valeur immuable décodée depuis un seul compte. Aucune donnée hydratée ici :
// les réserves vivent dans `ReserveSnapshot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolDescriptor {
    pub address: Pubkey,
    pub pool_bump: u8,
    pub index: u16,
    pub creator: Pubkey,
    pub base_mint: Pubkey,  // Le token lancé (en général)
    pub quote_mint: Pubkey, // L'actif de référence (en général WSOL)
    /// `None` quand les 32 octets sont à zéro.
    pub lp_mint: Option<Pubkey>,
    pub base_vault: Pubkey,
    pub quote_vault: Pubkey,
    pub lp_supply: u64,
    pub coin_creator: Pubkey,
}

impl PoolDescriptor {
    /// Retourne les adresses des deux tokens du pool (base, quote).
    pub fn get_mints(&self) -> (Pubkey, Pubkey) {
        (self.base_mint, self.quote_mint)
    }

    /// Retourne les adresses des deux vaults du pool (base, quote).
    pub fn get_vaults(&self) -> (Pubkey, Pubkey) {
        (self.base_vault, self.quote_vault)
    }

    /// Vrai si le pool associe `a` et `b`, dans un sens ou dans l'autre.
    pub fn pairs(&self, a: &Pubkey, b: &Pubkey) -> bool {
        (self.base_mint == *a && self.quote_mint == *b)
            || (self.base_mint == *b && self.quote_mint == *a)
    }

    /// Retourne une vue du pool où `quote_mint == reference_mint`.
    /// Un pool "inversé" (référence en base) voit ses mints et vaults échangés.
    /// `None` si la référence n'est d'aucun côté.
    pub fn oriented_to(&self, reference_mint: &Pubkey) -> Option<PoolDescriptor> {
        if self.quote_mint == *reference_mint {
            Some(*self)
        } else if self.base_mint == *reference_mint {
            Some(PoolDescriptor {
                base_mint: self.quote_mint,
                quote_mint: self.base_mint,
                base_vault: self.quote_vault,
                quote_vault: self.base_vault,
                ..*self
            })
        } else {
            None
        }
    }
}


// --- MODULE POUR LES STRUCTURES ON-CHAIN ---
// Miroir exact du compte Pool, sans le discriminateur.
pub mod onchain_layouts {
    use super::*;

    #[repr(C, packed)]
    #[derive(Clone, Copy, Pod, Zeroable, Debug)]
    pub struct Pool {
        pub pool_bump: u8,
        pub index: u16,
        pub creator: Pubkey,
        pub base_mint: Pubkey,
        pub quote_mint: Pubkey,
        pub lp_mint: Pubkey,
        pub pool_base_token_account: Pubkey,
        pub pool_quote_token_account: Pubkey,
        pub lp_supply: u64,
        pub coin_creator: Pubkey,
    }
}


/// Décode les données brutes d'un compte Pool `pump.fun`.
/// Fonction pure : mêmes octets, même descripteur.
pub fn decode_pool(address: &Pubkey, data: &[u8]) -> Result<PoolDescriptor, DecodeError> {
    if data.len() < POOL_ACCOUNT_LEN {
        return Err(DecodeError::TooShort {
            expected: POOL_ACCOUNT_LEN,
            actual: data.len(),
        });
    }

    let (tag, body) = data.split_at(DISCRIMINATOR_LEN);
    if tag != POOL_ACCOUNT_DISCRIMINATOR {
        return Err(DecodeError::InvalidDiscriminator { found: hex::encode(tag) });
    }

    // Struct `packed` : lecture non alignée, puis copie champ par champ.
    let pool: onchain_layouts::Pool = bytemuck::pod_read_unaligned(
        &body[..std::mem::size_of::<onchain_layouts::Pool>()]
    );

    let base_mint = pool.base_mint;
    let quote_mint = pool.quote_mint;
    if base_mint == quote_mint {
        return Err(DecodeError::IdenticalMints(base_mint));
    }

    let lp_mint = pool.lp_mint;

    Ok(PoolDescriptor {
        address: *address,
        pool_bump: pool.pool_bump,
        index: pool.index,
        creator: pool.creator,
        base_mint,
        quote_mint,
        lp_mint: (lp_mint != Pubkey::default()).then_some(lp_mint),
        base_vault: pool.pool_base_token_account,
        quote_vault: pool.pool_quote_token_account,
        lp_supply: pool.lp_supply,
        coin_creator: pool.coin_creator,
    })
}

/// Ré-encode un descripteur dans le format on-chain (exactement `POOL_ACCOUNT_LEN` octets).
/// Sert surtout à fabriquer des fixtures de test.
///
/// `decode_pool(encode_pool(d)?) == d` pour tout descripteur accepté. La clé nulle
/// est réservée à `lp_mint: None` : `Some(Pubkey::default())` est refusé.
pub fn encode_pool(pool: &PoolDescriptor) -> Result<Vec<u8>, EncodeError> {
    if pool.lp_mint == Some(Pubkey::default()) {
        return Err(EncodeError::ZeroLpMint);
    }

    let layout = onchain_layouts::Pool {
        pool_bump: pool.pool_bump,
        index: pool.index,
        creator: pool.creator,
        base_mint: pool.base_mint,
        quote_mint: pool.quote_mint,
        lp_mint: pool.lp_mint.unwrap_or_default(),
        pool_base_token_account: pool.base_vault,
        pool_quote_token_account: pool.quote_vault,
        lp_supply: pool.lp_supply,
        coin_creator: pool.coin_creator,
    };

    let mut data = Vec::with_capacity(POOL_ACCOUNT_LEN);
    data.extend_from_slice(&POOL_ACCOUNT_DISCRIMINATOR);
    data.extend_from_slice(bytemuck::bytes_of(&layout));
    Ok(data)
}
