use proptest::prelude::*;

use helix_nullables::NullAccounts;
use helix_registry::{GenomeAccessRegistry, MintRequest, RegistryError, MAX_GRANT_SECS};
use helix_types::{ContentHash, Timestamp, WalletAddress};

fn addr(s: &str) -> WalletAddress {
    WalletAddress::new(format!("hlx_{s}"))
}

fn request() -> MintRequest {
    MintRequest {
        content_ref: "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi".into(),
        content_hash: ContentHash::new([1u8; 32]),
        encryption_tag: "aes-256-gcm".into(),
        category: "whole-genome".into(),
        size_bytes: 1024,
    }
}

proptest! {
    /// Mint fee round-trip: paying fee + x refunds exactly x and retains the fee;
    /// paying less than the fee moves nothing and creates nothing.
    #[test]
    fn mint_fee_round_trip(fee in 0u128..1_000_000, extra in 0u128..1_000_000) {
        let owner = addr("owner");
        let mut reg = GenomeAccessRegistry::new(addr("admin"), fee);
        let mut accounts = NullAccounts::new();

        reg.mint(&owner, request(), fee + extra, &mut accounts, Timestamp::new(1)).unwrap();
        prop_assert_eq!(accounts.balance(&owner), extra);
        prop_assert_eq!(reg.treasury_balance(), fee);
        prop_assert_eq!(reg.token_count(), 1);

        if fee > 0 {
            let result = reg.mint(&owner, request(), fee - 1, &mut accounts, Timestamp::new(2));
            prop_assert!(matches!(result, Err(RegistryError::InsufficientFee { .. })), "unexpected error: {:?}", result);
            prop_assert_eq!(reg.token_count(), 1);
            prop_assert_eq!(reg.treasury_balance(), fee);
            prop_assert_eq!(accounts.balance(&owner), extra);
        }
    }

    /// Grant expiry is exact for any valid duration: usable at expiry - 1,
    /// unusable at expiry.
    #[test]
    fn grant_expiry_exactness(
        start in 0u64..1_000_000,
        duration in 1u64..=MAX_GRANT_SECS,
    ) {
        let owner = addr("owner");
        let agent = addr("agent");
        let mut reg = GenomeAccessRegistry::new(addr("admin"), 0);
        let mut accounts = NullAccounts::new();

        let id = reg.mint(&owner, request(), 0, &mut accounts, Timestamp::new(start)).unwrap();
        reg.set_trusted_delegate(&addr("admin"), &agent, true).unwrap();
        reg.grant_access(id, &owner, &agent, duration, Timestamp::new(start)).unwrap();

        let expiry = start + duration;
        prop_assert!(reg.verify_access(id, &agent, Timestamp::new(expiry - 1)));
        prop_assert!(!reg.verify_access(id, &agent, Timestamp::new(expiry)));
    }

    /// Token ids are assigned sequentially with no gaps or reuse.
    #[test]
    fn token_ids_monotonic(count in 1usize..30) {
        let owner = addr("owner");
        let mut reg = GenomeAccessRegistry::new(addr("admin"), 0);
        let mut accounts = NullAccounts::new();

        let mut ids = Vec::new();
        for i in 0..count {
            let id = reg.mint(&owner, request(), 0, &mut accounts, Timestamp::new(i as u64)).unwrap();
            ids.push(id);
        }
        let expected: Vec<u64> = (1..=count as u64).collect();
        prop_assert_eq!(ids, expected);
        prop_assert_eq!(reg.tokens_of(&owner).len(), count);
    }
}
