//! Core access-registry engine.

use crate::error::RegistryError;
use crate::token::{AccessGrant, DataToken, MintRequest};
use helix_types::{FundsTransfer, Timestamp, TokenId, WalletAddress};
use helix_utils::format_duration;
use std::collections::{HashMap, HashSet};

/// Minimum delegated-access duration in seconds.
pub const MIN_GRANT_SECS: u64 = 1;
/// Maximum delegated-access duration in seconds (one day).
pub const MAX_GRANT_SECS: u64 = 86_400;

/// The access registry — mints data tokens, tracks ownership, and manages
/// time-bounded delegated access to content pointers.
///
/// Every operation applies atomically: validation happens before any state
/// is written, and fund credits (refunds, treasury withdrawals) are the last
/// effect of their operation.
pub struct GenomeAccessRegistry {
    admin: WalletAddress,
    mint_fee: u128,
    /// Mint fees retained, net of refunds. Drained by `withdraw_treasury`.
    treasury: u128,
    next_token_id: TokenId,
    tokens: HashMap<TokenId, DataToken>,
    grants: HashMap<(TokenId, WalletAddress), AccessGrant>,
    /// Identities the administrator has approved as grant recipients.
    trusted_delegates: HashSet<WalletAddress>,
}

impl GenomeAccessRegistry {
    pub fn new(admin: WalletAddress, mint_fee: u128) -> Self {
        Self {
            admin,
            mint_fee,
            treasury: 0,
            next_token_id: 1,
            tokens: HashMap::new(),
            grants: HashMap::new(),
            trusted_delegates: HashSet::new(),
        }
    }

    /// Mint a new data token for `owner`.
    ///
    /// Retains the current mint fee in the treasury and refunds any excess
    /// `fee_paid` to the owner as the final effect.
    pub fn mint(
        &mut self,
        owner: &WalletAddress,
        request: MintRequest,
        fee_paid: u128,
        accounts: &mut dyn FundsTransfer,
        now: Timestamp,
    ) -> Result<TokenId, RegistryError> {
        if fee_paid < self.mint_fee {
            return Err(RegistryError::InsufficientFee {
                required: self.mint_fee,
                provided: fee_paid,
            });
        }
        if request.content_ref.is_empty() {
            return Err(RegistryError::InvalidReference);
        }
        if request.content_hash.is_zero() {
            return Err(RegistryError::InvalidHash);
        }
        let new_treasury = self
            .treasury
            .checked_add(self.mint_fee)
            .ok_or(RegistryError::Overflow)?;

        let id = self.next_token_id;
        self.next_token_id += 1;
        self.tokens.insert(
            id,
            DataToken {
                id,
                owner: owner.clone(),
                content_ref: request.content_ref,
                content_hash: request.content_hash,
                encryption_tag: request.encryption_tag,
                category: request.category,
                created_at: now,
                size_bytes: request.size_bytes,
                active: true,
            },
        );
        self.treasury = new_treasury;
        tracing::info!(token = id, owner = %owner, fee = self.mint_fee, "token minted");

        let refund = fee_paid - self.mint_fee;
        if refund > 0 {
            accounts.credit(owner, refund)?;
        }
        Ok(id)
    }

    /// Full metadata for a token. Retained even after deactivation.
    pub fn metadata(&self, token: TokenId) -> Result<&DataToken, RegistryError> {
        self.tokens.get(&token).ok_or(RegistryError::NotFound(token))
    }

    /// The content pointer, gated by ownership or a currently valid grant.
    ///
    /// This is the single authoritative "may this caller see the pointer"
    /// check.
    pub fn content_ref(
        &self,
        token: TokenId,
        caller: &WalletAddress,
        now: Timestamp,
    ) -> Result<&str, RegistryError> {
        let record = self.tokens.get(&token).ok_or(RegistryError::NotFound(token))?;
        if !record.active {
            return Err(RegistryError::Deactivated(token));
        }
        if record.owner != *caller && !self.has_usable_grant(token, caller, now) {
            return Err(RegistryError::Unauthorized {
                token,
                caller: caller.to_string(),
            });
        }
        Ok(&record.content_ref)
    }

    /// Read-only access predicate. Never fails; false for unknown tokens.
    pub fn verify_access(&self, token: TokenId, identity: &WalletAddress, now: Timestamp) -> bool {
        match self.tokens.get(&token) {
            Some(record) => record.owner == *identity || self.has_usable_grant(token, identity, now),
            None => false,
        }
    }

    fn has_usable_grant(&self, token: TokenId, identity: &WalletAddress, now: Timestamp) -> bool {
        self.grants
            .get(&(token, identity.clone()))
            .map(|g| g.is_usable(now))
            .unwrap_or(false)
    }

    /// Grant `delegate` read access to the token's content pointer.
    ///
    /// Owner-only. The delegate must be on the trusted list and the duration
    /// within `MIN_GRANT_SECS..=MAX_GRANT_SECS`.
    pub fn grant_access(
        &mut self,
        token: TokenId,
        caller: &WalletAddress,
        delegate: &WalletAddress,
        duration_secs: u64,
        now: Timestamp,
    ) -> Result<(), RegistryError> {
        let record = self.tokens.get(&token).ok_or(RegistryError::NotFound(token))?;
        if record.owner != *caller {
            return Err(RegistryError::Unauthorized {
                token,
                caller: caller.to_string(),
            });
        }
        if !self.trusted_delegates.contains(delegate) {
            return Err(RegistryError::UntrustedDelegate(delegate.to_string()));
        }
        if !(MIN_GRANT_SECS..=MAX_GRANT_SECS).contains(&duration_secs) {
            return Err(RegistryError::InvalidDuration(duration_secs));
        }
        self.grants.insert(
            (token, delegate.clone()),
            AccessGrant {
                expiry: now.plus(duration_secs),
                valid: true,
            },
        );
        tracing::info!(
            token,
            delegate = %delegate,
            duration = %format_duration(duration_secs),
            "access granted"
        );
        Ok(())
    }

    /// Revoke a delegate's grant. Owner-only and idempotent: revoking an
    /// absent or already-invalid grant succeeds.
    pub fn revoke_access(
        &mut self,
        token: TokenId,
        caller: &WalletAddress,
        delegate: &WalletAddress,
    ) -> Result<(), RegistryError> {
        let record = self.tokens.get(&token).ok_or(RegistryError::NotFound(token))?;
        if record.owner != *caller {
            return Err(RegistryError::Unauthorized {
                token,
                caller: caller.to_string(),
            });
        }
        if let Some(grant) = self.grants.get_mut(&(token, delegate.clone())) {
            grant.valid = false;
            tracing::info!(token, delegate = %delegate, "access revoked");
        }
        Ok(())
    }

    /// Transfer token ownership. Owner-only.
    ///
    /// Grants issued by the previous owner remain until they expire or the
    /// new owner revokes them.
    pub fn transfer(
        &mut self,
        token: TokenId,
        caller: &WalletAddress,
        new_owner: &WalletAddress,
    ) -> Result<(), RegistryError> {
        let record = self
            .tokens
            .get_mut(&token)
            .ok_or(RegistryError::NotFound(token))?;
        if record.owner != *caller {
            return Err(RegistryError::Unauthorized {
                token,
                caller: caller.to_string(),
            });
        }
        record.owner = new_owner.clone();
        tracing::info!(token, from = %caller, to = %new_owner, "token transferred");
        Ok(())
    }

    /// Permanently deactivate a token. Owner-only. Subsequent content-ref
    /// reads fail; metadata stays readable.
    pub fn deactivate(&mut self, token: TokenId, caller: &WalletAddress) -> Result<(), RegistryError> {
        let record = self
            .tokens
            .get_mut(&token)
            .ok_or(RegistryError::NotFound(token))?;
        if record.owner != *caller {
            return Err(RegistryError::Unauthorized {
                token,
                caller: caller.to_string(),
            });
        }
        record.active = false;
        tracing::info!(token, "token deactivated");
        Ok(())
    }

    /// Pure integrity comparison against the stored content hash.
    /// Never fails; false for unknown tokens or mismatches.
    pub fn verify_integrity(&self, token: TokenId, hash: &helix_types::ContentHash) -> bool {
        self.tokens
            .get(&token)
            .map(|t| t.content_hash == *hash)
            .unwrap_or(false)
    }

    // ── Administration ───────────────────────────────────────────────────

    fn require_admin(&self, caller: &WalletAddress) -> Result<(), RegistryError> {
        if *caller != self.admin {
            return Err(RegistryError::NotAdmin(caller.to_string()));
        }
        Ok(())
    }

    /// Add or remove an identity from the trusted-delegate list.
    pub fn set_trusted_delegate(
        &mut self,
        caller: &WalletAddress,
        identity: &WalletAddress,
        trusted: bool,
    ) -> Result<(), RegistryError> {
        self.require_admin(caller)?;
        if trusted {
            self.trusted_delegates.insert(identity.clone());
        } else {
            self.trusted_delegates.remove(identity);
        }
        Ok(())
    }

    pub fn set_mint_fee(&mut self, caller: &WalletAddress, fee: u128) -> Result<(), RegistryError> {
        self.require_admin(caller)?;
        self.mint_fee = fee;
        Ok(())
    }

    /// Drain the treasury to the administrator. Returns the amount moved.
    pub fn withdraw_treasury(
        &mut self,
        caller: &WalletAddress,
        accounts: &mut dyn FundsTransfer,
    ) -> Result<u128, RegistryError> {
        self.require_admin(caller)?;
        let amount = self.treasury;
        self.treasury = 0;
        tracing::info!(amount, "treasury withdrawn");
        if amount > 0 {
            accounts.credit(&self.admin, amount)?;
        }
        Ok(amount)
    }

    // ── Views ────────────────────────────────────────────────────────────

    pub fn token_count(&self) -> u64 {
        self.tokens.len() as u64
    }

    /// All token ids currently held by `owner`, ascending.
    pub fn tokens_of(&self, owner: &WalletAddress) -> Vec<TokenId> {
        let mut ids: Vec<TokenId> = self
            .tokens
            .values()
            .filter(|t| t.owner == *owner)
            .map(|t| t.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn is_trusted_delegate(&self, identity: &WalletAddress) -> bool {
        self.trusted_delegates.contains(identity)
    }

    pub fn current_mint_fee(&self) -> u128 {
        self.mint_fee
    }

    pub fn treasury_balance(&self) -> u128 {
        self.treasury
    }
}

impl GenomeAccessRegistry {
    /// Persist all registry state to a genome store.
    pub fn save_to_store(&self, store: &dyn helix_store::GenomeStore) -> Result<(), RegistryError> {
        store.put_meta(b"admin", self.admin.as_str().as_bytes())?;
        store.put_meta(b"mint_fee", &self.mint_fee.to_be_bytes())?;
        store.put_meta(b"treasury", &self.treasury.to_be_bytes())?;
        store.put_meta(b"next_token_id", &self.next_token_id.to_be_bytes())?;

        let trusted: Vec<&WalletAddress> = self.trusted_delegates.iter().collect();
        let trusted_bytes = bincode::serialize(&trusted)
            .map_err(|e| helix_store::StoreError::Serialization(e.to_string()))?;
        store.put_meta(b"trusted_delegates", &trusted_bytes)?;

        for (id, token) in &self.tokens {
            let bytes = bincode::serialize(token)
                .map_err(|e| helix_store::StoreError::Serialization(e.to_string()))?;
            store.put_token(*id, &bytes)?;
        }
        for ((token, delegate), grant) in &self.grants {
            let bytes = bincode::serialize(grant)
                .map_err(|e| helix_store::StoreError::Serialization(e.to_string()))?;
            store.put_grant(*token, delegate, &bytes)?;
        }
        Ok(())
    }

    /// Restore registry state from a genome store.
    pub fn load_from_store(store: &dyn helix_store::GenomeStore) -> Result<Self, RegistryError> {
        let admin_bytes = store
            .get_meta(b"admin")?
            .ok_or_else(|| helix_store::StoreError::Corruption("missing admin record".into()))?;
        let admin_str = String::from_utf8(admin_bytes)
            .map_err(|e| helix_store::StoreError::Corruption(e.to_string()))?;
        let admin = WalletAddress::parse(&admin_str)
            .ok_or_else(|| helix_store::StoreError::Corruption("malformed admin address".into()))?;

        let mint_fee = read_u128_meta(store, b"mint_fee")?.unwrap_or(0);
        let treasury = read_u128_meta(store, b"treasury")?.unwrap_or(0);
        let next_token_id = read_u64_meta(store, b"next_token_id")?.unwrap_or(1);

        let trusted_delegates = match store.get_meta(b"trusted_delegates")? {
            Some(bytes) => {
                let list: Vec<WalletAddress> = bincode::deserialize(&bytes)
                    .map_err(|e| helix_store::StoreError::Serialization(e.to_string()))?;
                list.into_iter().collect()
            }
            None => HashSet::new(),
        };

        let mut tokens = HashMap::new();
        for (id, bytes) in store.iter_tokens()? {
            let token: DataToken = bincode::deserialize(&bytes)
                .map_err(|e| helix_store::StoreError::Serialization(e.to_string()))?;
            tokens.insert(id, token);
        }

        let mut grants = HashMap::new();
        for (token, delegate, bytes) in store.iter_grants()? {
            let grant: AccessGrant = bincode::deserialize(&bytes)
                .map_err(|e| helix_store::StoreError::Serialization(e.to_string()))?;
            grants.insert((token, delegate), grant);
        }

        Ok(Self {
            admin,
            mint_fee,
            treasury,
            next_token_id,
            tokens,
            grants,
            trusted_delegates,
        })
    }
}

fn read_u128_meta(
    store: &dyn helix_store::GenomeStore,
    key: &[u8],
) -> Result<Option<u128>, RegistryError> {
    match store.get_meta(key)? {
        Some(bytes) if bytes.len() >= 16 => {
            let mut buf = [0u8; 16];
            buf.copy_from_slice(&bytes[..16]);
            Ok(Some(u128::from_be_bytes(buf)))
        }
        Some(_) => Err(helix_store::StoreError::Corruption(format!(
            "meta key {:?} truncated",
            String::from_utf8_lossy(key)
        ))
        .into()),
        None => Ok(None),
    }
}

fn read_u64_meta(
    store: &dyn helix_store::GenomeStore,
    key: &[u8],
) -> Result<Option<u64>, RegistryError> {
    match store.get_meta(key)? {
        Some(bytes) if bytes.len() >= 8 => {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(&bytes[..8]);
            Ok(Some(u64::from_be_bytes(buf)))
        }
        Some(_) => Err(helix_store::StoreError::Corruption(format!(
            "meta key {:?} truncated",
            String::from_utf8_lossy(key)
        ))
        .into()),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helix_nullables::NullAccounts;
    use helix_types::ContentHash;

    fn addr(s: &str) -> WalletAddress {
        WalletAddress::new(format!("hlx_{s}"))
    }

    fn mint_request() -> MintRequest {
        MintRequest {
            content_ref: "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi".into(),
            content_hash: ContentHash::new([7u8; 32]),
            encryption_tag: "aes-256-gcm".into(),
            category: "snp-array".into(),
            size_bytes: 24_000_000,
        }
    }

    fn registry_with_fee(fee: u128) -> GenomeAccessRegistry {
        GenomeAccessRegistry::new(addr("admin"), fee)
    }

    #[test]
    fn mint_assigns_monotonic_ids_and_retains_fee() {
        let mut reg = registry_with_fee(100);
        let mut accounts = NullAccounts::new();
        let owner = addr("owner");

        let t1 = reg
            .mint(&owner, mint_request(), 100, &mut accounts, Timestamp::new(10))
            .unwrap();
        let t2 = reg
            .mint(&owner, mint_request(), 100, &mut accounts, Timestamp::new(11))
            .unwrap();
        assert_eq!(t1, 1);
        assert_eq!(t2, 2);
        assert_eq!(reg.treasury_balance(), 200);
        assert_eq!(reg.token_count(), 2);
        // Exact fee: no refund credited.
        assert_eq!(accounts.balance(&owner), 0);
    }

    #[test]
    fn mint_refunds_excess_fee() {
        let mut reg = registry_with_fee(100);
        let mut accounts = NullAccounts::new();
        let owner = addr("owner");

        reg.mint(&owner, mint_request(), 175, &mut accounts, Timestamp::new(10))
            .unwrap();
        assert_eq!(reg.treasury_balance(), 100);
        assert_eq!(accounts.balance(&owner), 75);
    }

    #[test]
    fn mint_insufficient_fee_creates_nothing() {
        let mut reg = registry_with_fee(100);
        let mut accounts = NullAccounts::new();

        let result = reg.mint(&addr("owner"), mint_request(), 99, &mut accounts, Timestamp::new(10));
        match result.unwrap_err() {
            RegistryError::InsufficientFee { required, provided } => {
                assert_eq!(required, 100);
                assert_eq!(provided, 99);
            }
            other => panic!("expected InsufficientFee, got {other:?}"),
        }
        assert_eq!(reg.token_count(), 0);
        assert_eq!(reg.treasury_balance(), 0);
        assert_eq!(accounts.balance(&addr("owner")), 0);
    }

    #[test]
    fn mint_rejects_empty_reference_and_zero_hash() {
        let mut reg = registry_with_fee(0);
        let mut accounts = NullAccounts::new();

        let mut req = mint_request();
        req.content_ref = String::new();
        assert!(matches!(
            reg.mint(&addr("o"), req, 0, &mut accounts, Timestamp::new(1)),
            Err(RegistryError::InvalidReference)
        ));

        let mut req = mint_request();
        req.content_hash = ContentHash::ZERO;
        assert!(matches!(
            reg.mint(&addr("o"), req, 0, &mut accounts, Timestamp::new(1)),
            Err(RegistryError::InvalidHash)
        ));
        assert_eq!(reg.token_count(), 0);
    }

    #[test]
    fn metadata_survives_deactivation() {
        let mut reg = registry_with_fee(0);
        let mut accounts = NullAccounts::new();
        let owner = addr("owner");
        let id = reg
            .mint(&owner, mint_request(), 0, &mut accounts, Timestamp::new(5))
            .unwrap();

        reg.deactivate(id, &owner).unwrap();
        let meta = reg.metadata(id).unwrap();
        assert!(!meta.active);
        assert_eq!(meta.created_at, Timestamp::new(5));

        assert!(matches!(
            reg.metadata(99),
            Err(RegistryError::NotFound(99))
        ));
    }

    #[test]
    fn content_ref_requires_ownership_or_grant() {
        let mut reg = registry_with_fee(0);
        let mut accounts = NullAccounts::new();
        let owner = addr("owner");
        let agent = addr("agent");
        let id = reg
            .mint(&owner, mint_request(), 0, &mut accounts, Timestamp::new(0))
            .unwrap();

        assert!(reg.content_ref(id, &owner, Timestamp::new(1)).is_ok());
        assert!(matches!(
            reg.content_ref(id, &agent, Timestamp::new(1)),
            Err(RegistryError::Unauthorized { .. })
        ));

        reg.set_trusted_delegate(&addr("admin"), &agent, true).unwrap();
        reg.grant_access(id, &owner, &agent, 3600, Timestamp::new(1)).unwrap();
        assert!(reg.content_ref(id, &agent, Timestamp::new(100)).is_ok());

        reg.revoke_access(id, &owner, &agent).unwrap();
        assert!(matches!(
            reg.content_ref(id, &agent, Timestamp::new(100)),
            Err(RegistryError::Unauthorized { .. })
        ));
    }

    #[test]
    fn content_ref_fails_after_deactivation_even_for_owner() {
        let mut reg = registry_with_fee(0);
        let mut accounts = NullAccounts::new();
        let owner = addr("owner");
        let id = reg
            .mint(&owner, mint_request(), 0, &mut accounts, Timestamp::new(0))
            .unwrap();

        reg.deactivate(id, &owner).unwrap();
        assert!(matches!(
            reg.content_ref(id, &owner, Timestamp::new(1)),
            Err(RegistryError::Deactivated(_))
        ));
    }

    #[test]
    fn verify_access_expiry_is_exact() {
        let mut reg = registry_with_fee(0);
        let mut accounts = NullAccounts::new();
        let owner = addr("owner");
        let agent = addr("agent");
        let id = reg
            .mint(&owner, mint_request(), 0, &mut accounts, Timestamp::new(0))
            .unwrap();

        reg.set_trusted_delegate(&addr("admin"), &agent, true).unwrap();
        reg.grant_access(id, &owner, &agent, 3600, Timestamp::new(1000)).unwrap();

        // Expiry at 4600: usable through 4599, not at 4600.
        assert!(reg.verify_access(id, &agent, Timestamp::new(4599)));
        assert!(!reg.verify_access(id, &agent, Timestamp::new(4600)));
        assert!(!reg.verify_access(id, &agent, Timestamp::new(4601)));

        // Owner access has no expiry.
        assert!(reg.verify_access(id, &owner, Timestamp::new(u64::MAX)));
        // Unknown tokens are simply false.
        assert!(!reg.verify_access(404, &owner, Timestamp::new(0)));
    }

    #[test]
    fn grant_rejects_untrusted_delegate_and_bad_duration() {
        let mut reg = registry_with_fee(0);
        let mut accounts = NullAccounts::new();
        let owner = addr("owner");
        let agent = addr("agent");
        let id = reg
            .mint(&owner, mint_request(), 0, &mut accounts, Timestamp::new(0))
            .unwrap();

        assert!(matches!(
            reg.grant_access(id, &owner, &agent, 3600, Timestamp::new(1)),
            Err(RegistryError::UntrustedDelegate(_))
        ));

        reg.set_trusted_delegate(&addr("admin"), &agent, true).unwrap();
        assert!(matches!(
            reg.grant_access(id, &owner, &agent, 0, Timestamp::new(1)),
            Err(RegistryError::InvalidDuration(0))
        ));
        assert!(matches!(
            reg.grant_access(id, &owner, &agent, MAX_GRANT_SECS + 1, Timestamp::new(1)),
            Err(RegistryError::InvalidDuration(_))
        ));
        // Boundary values are accepted.
        reg.grant_access(id, &owner, &agent, MIN_GRANT_SECS, Timestamp::new(1)).unwrap();
        reg.grant_access(id, &owner, &agent, MAX_GRANT_SECS, Timestamp::new(1)).unwrap();
    }

    #[test]
    fn only_owner_grants_and_revokes() {
        let mut reg = registry_with_fee(0);
        let mut accounts = NullAccounts::new();
        let owner = addr("owner");
        let agent = addr("agent");
        let stranger = addr("stranger");
        let id = reg
            .mint(&owner, mint_request(), 0, &mut accounts, Timestamp::new(0))
            .unwrap();
        reg.set_trusted_delegate(&addr("admin"), &agent, true).unwrap();

        assert!(matches!(
            reg.grant_access(id, &stranger, &agent, 3600, Timestamp::new(1)),
            Err(RegistryError::Unauthorized { .. })
        ));
        assert!(matches!(
            reg.revoke_access(id, &stranger, &agent),
            Err(RegistryError::Unauthorized { .. })
        ));

        // Revoke with no grant in place is idempotent.
        reg.revoke_access(id, &owner, &agent).unwrap();
        reg.revoke_access(id, &owner, &agent).unwrap();
    }

    #[test]
    fn transfer_moves_ownership_and_grant_management() {
        let mut reg = registry_with_fee(0);
        let mut accounts = NullAccounts::new();
        let owner = addr("owner");
        let buyer = addr("buyer");
        let agent = addr("agent");
        let id = reg
            .mint(&owner, mint_request(), 0, &mut accounts, Timestamp::new(0))
            .unwrap();
        reg.set_trusted_delegate(&addr("admin"), &agent, true).unwrap();
        reg.grant_access(id, &owner, &agent, 3600, Timestamp::new(0)).unwrap();

        reg.transfer(id, &owner, &buyer).unwrap();
        assert_eq!(reg.metadata(id).unwrap().owner, buyer);
        assert_eq!(reg.tokens_of(&buyer), vec![id]);
        assert!(reg.tokens_of(&owner).is_empty());

        // The previous owner's grant survives until revoked by the new owner.
        assert!(reg.verify_access(id, &agent, Timestamp::new(100)));
        assert!(matches!(
            reg.grant_access(id, &owner, &agent, 3600, Timestamp::new(1)),
            Err(RegistryError::Unauthorized { .. })
        ));
        reg.revoke_access(id, &buyer, &agent).unwrap();
        assert!(!reg.verify_access(id, &agent, Timestamp::new(100)));
    }

    #[test]
    fn verify_integrity_is_pure_comparison() {
        let mut reg = registry_with_fee(0);
        let mut accounts = NullAccounts::new();
        let id = reg
            .mint(&addr("o"), mint_request(), 0, &mut accounts, Timestamp::new(0))
            .unwrap();

        assert!(reg.verify_integrity(id, &ContentHash::new([7u8; 32])));
        assert!(!reg.verify_integrity(id, &ContentHash::new([8u8; 32])));
        assert!(!reg.verify_integrity(999, &ContentHash::new([7u8; 32])));
    }

    #[test]
    fn admin_operations_reject_non_admin() {
        let mut reg = registry_with_fee(10);
        let mut accounts = NullAccounts::new();
        let outsider = addr("outsider");

        assert!(matches!(
            reg.set_mint_fee(&outsider, 5),
            Err(RegistryError::NotAdmin(_))
        ));
        assert!(matches!(
            reg.set_trusted_delegate(&outsider, &addr("x"), true),
            Err(RegistryError::NotAdmin(_))
        ));
        assert!(matches!(
            reg.withdraw_treasury(&outsider, &mut accounts),
            Err(RegistryError::NotAdmin(_))
        ));
    }

    #[test]
    fn treasury_withdrawal_drains_to_admin() {
        let mut reg = registry_with_fee(40);
        let mut accounts = NullAccounts::new();
        reg.mint(&addr("o"), mint_request(), 40, &mut accounts, Timestamp::new(0))
            .unwrap();
        reg.mint(&addr("o"), mint_request(), 40, &mut accounts, Timestamp::new(1))
            .unwrap();

        let moved = reg.withdraw_treasury(&addr("admin"), &mut accounts).unwrap();
        assert_eq!(moved, 80);
        assert_eq!(reg.treasury_balance(), 0);
        assert_eq!(accounts.balance(&addr("admin")), 80);

        // Second withdrawal moves nothing.
        let moved = reg.withdraw_treasury(&addr("admin"), &mut accounts).unwrap();
        assert_eq!(moved, 0);
    }

    #[test]
    fn admin_can_update_mint_fee() {
        let mut reg = registry_with_fee(100);
        let mut accounts = NullAccounts::new();
        reg.set_mint_fee(&addr("admin"), 250).unwrap();
        assert_eq!(reg.current_mint_fee(), 250);

        assert!(matches!(
            reg.mint(&addr("o"), mint_request(), 100, &mut accounts, Timestamp::new(0)),
            Err(RegistryError::InsufficientFee { required: 250, .. })
        ));
    }

    #[test]
    fn store_roundtrip_preserves_state() {
        use helix_nullables::NullStore;

        let mut reg = registry_with_fee(50);
        let mut accounts = NullAccounts::new();
        let owner = addr("owner");
        let agent = addr("agent");
        let id = reg
            .mint(&owner, mint_request(), 60, &mut accounts, Timestamp::new(9))
            .unwrap();
        reg.set_trusted_delegate(&addr("admin"), &agent, true).unwrap();
        reg.grant_access(id, &owner, &agent, 600, Timestamp::new(10)).unwrap();

        let store = NullStore::new();
        reg.save_to_store(&store).unwrap();
        let restored = GenomeAccessRegistry::load_from_store(&store).unwrap();

        assert_eq!(restored.token_count(), 1);
        assert_eq!(restored.current_mint_fee(), 50);
        assert_eq!(restored.treasury_balance(), 50);
        assert!(restored.is_trusted_delegate(&agent));
        assert!(restored.verify_access(id, &agent, Timestamp::new(100)));
        assert!(!restored.verify_access(id, &agent, Timestamp::new(610)));

        // Id allocation continues where it left off.
        let mut restored = restored;
        let next = restored
            .mint(&owner, mint_request(), 50, &mut accounts, Timestamp::new(20))
            .unwrap();
        assert_eq!(next, id + 1);
    }
}
