// src/pricing/capabilities.rs

// Les trois "capacités" externes que le coeur consomme. Le transport (RPC, HTTP,
// ré-essais) vit derrière ces traits ; le coeur ne fait que les appeler, une fois,
// sous un timeout fourni par l'appelant.

use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use solana_sdk::pubkey::Pubkey;

/// Un compte candidat tel que renvoyé par le scan : adresse + octets bruts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPoolData {
    pub address: Pubkey,
    pub data: Vec<u8>,
}

/// Solde brut (plus petite unité) et précision décimale du mint correspondant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenBalance {
    pub amount: u64,
    pub decimals: u8,
}

/// Énumère les comptes pool candidats pour une paire (token, actif de référence).
#[async_trait]
pub trait AccountEnumerator: Send + Sync {
    /// Peut renvoyer une liste vide. Les doublons sont permis.
    async fn find_candidate_pools(
        &self,
        token_mint: &Pubkey,
        reference_mint: &Pubkey,
    ) -> Result<Vec<RawPoolData>>;
}

/// Lit les soldes des comptes de tokens et la supply des mints.
#[async_trait]
pub trait BalanceReader: Send + Sync {
    /// Un résultat par adresse, dans le même ordre.
    /// `None` quand le compte n'existe pas (fermé) ou n'est pas un compte de token.
    async fn read_balances(&self, accounts: &[Pubkey]) -> Result<Vec<Option<TokenBalance>>>;

    /// Supply totale brute et décimales d'un mint, `None` si le mint est introuvable.
    async fn read_supply(&self, mint: &Pubkey) -> Result<Option<TokenBalance>>;
}

/// Source du prix USD de l'actif de référence.
#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// Valeur décimale telle que livrée par le fournisseur, non validée.
    async fn fetch_usd_price(&self) -> Result<Decimal>;
}
