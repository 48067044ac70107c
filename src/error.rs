// src/error.rs

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Échecs de décodage d'un compte Pool brut.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("pool account too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },

    #[error("invalid pool discriminator: {found}")]
    InvalidDiscriminator { found: String },

    #[error("base and quote mint are identical ({0})")]
    IdenticalMints(Pubkey),
}

/// Descripteurs que le format on-chain ne sait pas représenter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("lp mint is the all-zero key, which the layout reserves for an absent lp mint")]
    ZeroLpMint,
}

/// Toutes les issues d'échec du calcul de market cap.
/// Aucune n'est avalée, aucune ne déclenche de ré-essai interne.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarketCapError {
    /// Octets de compte malformés.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Aucun candidat éligible après filtrage.
    #[error("no eligible pool found for mint {token_mint} against {reference_mint}")]
    NoPoolFound {
        token_mint: Pubkey,
        reference_mint: Pubkey,
    },

    /// Le scan des comptes candidats a échoué (ou a expiré).
    #[error("candidate enumeration unavailable: {0}")]
    EnumerationUnavailable(String),

    /// Lecture d'un vault impossible (compte fermé, erreur RPC, timeout).
    #[error("reserve unavailable: {0}")]
    ReserveUnavailable(String),

    /// Lecture de la supply du token impossible.
    #[error("supply unavailable: {0}")]
    SupplyUnavailable(String),

    /// Cotation oracle absente, malformée ou non strictement positive.
    #[error("oracle unavailable: {0}")]
    OracleUnavailable(String),

    /// Réserve nulle, supply nulle ou débordement arithmétique au moment du calcul.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
