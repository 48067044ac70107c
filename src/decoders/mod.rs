// src/decoders/mod.rs

// Décodeurs de comptes on-chain : le pool pump.fun AMM (notre unique protocole cible)
// et les comptes SPL (vaults et mints).
pub mod pump;
pub mod spl_token_decoders;
