// src/data_pipeline/mod.rs

// Implémentations "réseau" des capacités du coeur : scan RPC des pools,
// lecture des vaults et des mints, oracle HTTP.
pub mod api_connectors;
pub mod onchain_scanner;
pub mod vault_balances;
