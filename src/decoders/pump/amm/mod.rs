// src/decoders/pump/amm/mod.rs

pub mod pool;

pub use pool::{decode_pool, encode_pool, PoolDescriptor, PUMP_PROGRAM_ID};

#[cfg(test)]
mod test;
