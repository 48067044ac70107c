pub mod account;
pub mod mint;

#[cfg(test)]
mod tests {
    use super::{account::decode_account, mint::decode_mint};
    use solana_sdk::pubkey::Pubkey;

    // Layout SPL Token "Account" : 165 octets, `state` à l'offset 108.
    fn raw_token_account(mint: &Pubkey, owner: &Pubkey, amount: u64) -> Vec<u8> {
        let mut data = vec![0u8; 165];
        data[0..32].copy_from_slice(mint.as_ref());
        data[32..64].copy_from_slice(owner.as_ref());
        data[64..72].copy_from_slice(&amount.to_le_bytes());
        data[108] = 1; // Initialized
        data
    }

    // Layout SPL Token "Mint" : 82 octets.
    fn raw_mint(supply: u64, decimals: u8) -> Vec<u8> {
        let mut data = vec![0u8; 82];
        data[36..44].copy_from_slice(&supply.to_le_bytes());
        data[44] = decimals;
        data[45] = 1; // is_initialized
        data
    }

    #[test]
    fn decodes_legacy_token_account() {
        let mint = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let decoded = decode_account(&raw_token_account(&mint, &owner, 2_000_000_000)).unwrap();
        assert_eq!(decoded.mint, mint);
        assert_eq!(decoded.owner, owner);
        assert_eq!(decoded.amount, 2_000_000_000);
    }

    #[test]
    fn decodes_mint_decimals_and_supply() {
        let address = Pubkey::new_unique();
        let decoded = decode_mint(&address, &raw_mint(1_000_000_000_000, 6)).unwrap();
        assert_eq!(decoded.address, address);
        assert_eq!(decoded.decimals, 6);
        assert_eq!(decoded.supply, 1_000_000_000_000);
    }

    #[test]
    fn uninitialized_or_garbage_is_rejected() {
        let mut data = raw_token_account(&Pubkey::new_unique(), &Pubkey::new_unique(), 1);
        data[108] = 0;
        assert!(decode_account(&data).is_err());
        assert!(decode_account(&[1, 2, 3]).is_err());
        assert!(decode_mint(&Pubkey::new_unique(), &[0u8; 10]).is_err());
    }
}
