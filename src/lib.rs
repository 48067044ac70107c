// src/lib.rs

// Modules publics, utilisables par le binaire `market_cap` et par les tests d'intégration.
pub mod config;
pub mod data_pipeline;
pub mod decoders;
pub mod error;
pub mod monitoring;
pub mod pricing;
pub mod rpc;

pub use error::{DecodeError, EncodeError, MarketCapError};
