// DANS src/decoders/pump/amm/test.rs

use solana_sdk::pubkey::Pubkey;

use super::pool::*;
use crate::error::{DecodeError, EncodeError};

fn sample_pool() -> PoolDescriptor {
    PoolDescriptor {
        address: Pubkey::new_unique(),
        pool_bump: 254,
        index: 7,
        creator: Pubkey::new_unique(),
        base_mint: Pubkey::new_unique(),
        quote_mint: spl_token::native_mint::id(),
        lp_mint: Some(Pubkey::new_unique()),
        base_vault: Pubkey::new_unique(),
        quote_vault: Pubkey::new_unique(),
        lp_supply: 4_193_388_222_000,
        coin_creator: Pubkey::new_unique(),
    }
}

#[test]
fn layout_matches_onchain_offsets() {
    assert_eq!(POOL_ACCOUNT_LEN, 243);
    assert_eq!(BASE_MINT_OFFSET, 43);
    assert_eq!(QUOTE_MINT_OFFSET, 75);
}

#[test]
fn decode_encode_round_trip() {
    let base = sample_pool();
    let mut last_byte_set = [0u8; 32];
    last_byte_set[31] = 1;
    let almost_zero_key = Pubkey::new_from_array(last_byte_set);
    let variants = [
        base,
        PoolDescriptor { lp_mint: None, ..base },
        PoolDescriptor { lp_mint: Some(Pubkey::new_from_array([0xFF; 32])), ..base },
        PoolDescriptor { lp_mint: Some(almost_zero_key), ..base },
        PoolDescriptor { pool_bump: 0, index: 0, lp_supply: 0, ..base },
        PoolDescriptor { pool_bump: u8::MAX, index: u16::MAX, lp_supply: u64::MAX, ..base },
        PoolDescriptor {
            creator: Pubkey::default(),
            coin_creator: Pubkey::default(),
            ..base
        },
    ];

    for pool in variants {
        let data = encode_pool(&pool).unwrap();
        assert_eq!(data.len(), POOL_ACCOUNT_LEN);
        assert_eq!(decode_pool(&pool.address, &data).unwrap(), pool, "pool = {:?}", pool);
    }
}

#[test]
fn zero_lp_mint_key_cannot_be_encoded() {
    let pool = PoolDescriptor { lp_mint: Some(Pubkey::default()), ..sample_pool() };
    assert_eq!(encode_pool(&pool).unwrap_err(), EncodeError::ZeroLpMint);
}

#[test]
fn fields_sit_at_fixed_offsets() {
    let pool = sample_pool();
    let data = encode_pool(&pool).unwrap();

    assert_eq!(&data[..8], &POOL_ACCOUNT_DISCRIMINATOR);
    assert_eq!(data[8], 254);
    assert_eq!(u16::from_le_bytes([data[9], data[10]]), 7);
    assert_eq!(data[43..75], pool.base_mint.to_bytes());
    assert_eq!(data[75..107], pool.quote_mint.to_bytes());
    assert_eq!(data[139..171], pool.base_vault.to_bytes());
    assert_eq!(data[171..203], pool.quote_vault.to_bytes());
    assert_eq!(u64::from_le_bytes(data[203..211].try_into().unwrap()), 4_193_388_222_000);
    assert_eq!(data[211..243], pool.coin_creator.to_bytes());
}

#[test]
fn every_truncation_is_rejected() {
    let pool = sample_pool();
    let data = encode_pool(&pool).unwrap();
    for len in 0..POOL_ACCOUNT_LEN {
        let err = decode_pool(&pool.address, &data[..len]).unwrap_err();
        assert_eq!(err, DecodeError::TooShort { expected: POOL_ACCOUNT_LEN, actual: len });
    }
}

#[test]
fn trailing_bytes_are_ignored() {
    let pool = sample_pool();
    let mut data = encode_pool(&pool).unwrap();
    data.extend_from_slice(&[0xAB; 57]);
    assert_eq!(decode_pool(&pool.address, &data).unwrap(), pool);
}

#[test]
fn wrong_discriminator_is_rejected() {
    let pool = sample_pool();
    let mut data = encode_pool(&pool).unwrap();
    data[0] ^= 0xFF;
    match decode_pool(&pool.address, &data) {
        Err(DecodeError::InvalidDiscriminator { found }) => assert_eq!(found, hex::encode(&data[..8])),
        other => panic!("expected InvalidDiscriminator, got {:?}", other),
    }
}

#[test]
fn identical_mints_are_rejected() {
    let mut pool = sample_pool();
    pool.quote_mint = pool.base_mint;
    let data = encode_pool(&pool).unwrap();
    assert_eq!(
        decode_pool(&pool.address, &data).unwrap_err(),
        DecodeError::IdenticalMints(pool.base_mint)
    );
}

#[test]
fn zeroed_lp_mint_decodes_as_none() {
    let mut pool = sample_pool();
    pool.lp_mint = None;
    let data = encode_pool(&pool).unwrap();
    assert!(data[107..139].iter().all(|b| *b == 0));
    assert_eq!(decode_pool(&pool.address, &data).unwrap().lp_mint, None);
}

#[test]
fn decoding_is_deterministic() {
    let pool = sample_pool();
    let data = encode_pool(&pool).unwrap();
    let first = decode_pool(&pool.address, &data).unwrap();
    let second = decode_pool(&pool.address, &data).unwrap();
    assert_eq!(first, second);
}

#[test]
fn orientation_swaps_reversed_pools() {
    let wsol = spl_token::native_mint::id();
    let pool = sample_pool();
    assert_eq!(pool.oriented_to(&wsol), Some(pool));

    let reversed = PoolDescriptor {
        base_mint: pool.quote_mint,
        quote_mint: pool.base_mint,
        base_vault: pool.quote_vault,
        quote_vault: pool.base_vault,
        ..pool
    };
    let oriented = reversed.oriented_to(&wsol).unwrap();
    assert_eq!(oriented.get_mints(), (pool.base_mint, wsol));
    assert_eq!(oriented.get_vaults(), (pool.base_vault, pool.quote_vault));

    assert!(pool.pairs(&wsol, &pool.base_mint));
    assert_eq!(pool.oriented_to(&Pubkey::new_unique()), None);
}
