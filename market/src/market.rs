//! Core escrow-market engine.

use crate::bounty::{Bounty, BountySpec, ExpiredBounty, Response};
use crate::error::MarketError;
use helix_registry::GenomeDirectory;
use helix_types::{BountyId, FundsTransfer, ResponseId, Timestamp, TokenId, WalletAddress};
use std::collections::HashMap;

/// Minimum bounty duration in seconds (one hour).
pub const MIN_BOUNTY_SECS: u64 = 3_600;
/// Maximum bounty duration in seconds (thirty days).
pub const MAX_BOUNTY_SECS: u64 = 2_592_000;
/// Platform fee cap: 10%.
pub const MAX_PLATFORM_FEE_BPS: u32 = 1_000;
/// Basis-point denominator.
pub const BPS_DENOMINATOR: u128 = 10_000;

/// The bounty escrow market.
///
/// Holds one balance (`total_balance`) backing all escrowed bounty funds
/// plus accumulated platform fees. Every mutating operation validates fully
/// before touching state, and pays out (reward, refund, fee withdrawal) as
/// its final effect.
pub struct BountyEscrowMarket {
    admin: WalletAddress,
    platform_fee_bps: u32,
    paused: bool,
    /// All funds currently held: escrow plus not-yet-withdrawn fees.
    total_balance: u128,
    next_bounty_id: BountyId,
    next_response_id: ResponseId,
    bounties: HashMap<BountyId, Bounty>,
    responses: HashMap<ResponseId, Response>,
    /// `(token, bounty)` → response, enforcing one response per pair.
    response_index: HashMap<(TokenId, BountyId), ResponseId>,
}

impl BountyEscrowMarket {
    /// # Panics
    /// Panics if `platform_fee_bps` exceeds [`MAX_PLATFORM_FEE_BPS`].
    pub fn new(admin: WalletAddress, platform_fee_bps: u32) -> Self {
        assert!(
            platform_fee_bps <= MAX_PLATFORM_FEE_BPS,
            "platform fee above cap"
        );
        Self {
            admin,
            platform_fee_bps,
            paused: false,
            total_balance: 0,
            next_bounty_id: 1,
            next_response_id: 1,
            bounties: HashMap::new(),
            responses: HashMap::new(),
            response_index: HashMap::new(),
        }
    }

    /// Create and fund a bounty.
    ///
    /// Escrows `reward * max_responses`, retains the platform fee
    /// (basis-point floor), and refunds any excess of `funds_provided` to the
    /// creator as the final effect.
    pub fn create_bounty(
        &mut self,
        creator: &WalletAddress,
        spec: BountySpec,
        funds_provided: u128,
        accounts: &mut dyn FundsTransfer,
        now: Timestamp,
    ) -> Result<BountyId, MarketError> {
        if self.paused {
            return Err(MarketError::Paused);
        }
        if spec.query_kind.is_empty() {
            return Err(MarketError::EmptyQueryKind);
        }
        if spec.query_params.is_empty() {
            return Err(MarketError::EmptyQueryParams);
        }
        if spec.reward_per_response == 0 {
            return Err(MarketError::ZeroReward);
        }
        if spec.max_responses == 0 {
            return Err(MarketError::ZeroMaxResponses);
        }
        if !(MIN_BOUNTY_SECS..=MAX_BOUNTY_SECS).contains(&spec.duration_secs) {
            return Err(MarketError::InvalidDuration(spec.duration_secs));
        }

        let required = spec
            .reward_per_response
            .checked_mul(spec.max_responses as u128)
            .ok_or(MarketError::Overflow)?;
        let fee = required
            .checked_mul(self.platform_fee_bps as u128)
            .ok_or(MarketError::Overflow)?
            / BPS_DENOMINATOR;
        let total_owed = required.checked_add(fee).ok_or(MarketError::Overflow)?;
        if funds_provided < total_owed {
            return Err(MarketError::InsufficientFunding {
                required: total_owed,
                provided: funds_provided,
            });
        }
        let new_balance = self
            .total_balance
            .checked_add(total_owed)
            .ok_or(MarketError::Overflow)?;

        let id = self.next_bounty_id;
        self.next_bounty_id += 1;
        self.bounties.insert(
            id,
            Bounty {
                id,
                creator: creator.clone(),
                query_kind: spec.query_kind,
                query_params: spec.query_params,
                reward_per_response: spec.reward_per_response,
                max_responses: spec.max_responses,
                response_count: 0,
                total_funded: required,
                remaining_funds: required,
                created_at: now,
                expires_at: now.plus(spec.duration_secs),
                active: true,
            },
        );
        self.total_balance = new_balance;
        debug_assert!(self.audit_conservation());
        tracing::info!(bounty = id, creator = %creator, escrowed = required, fee, "bounty created");

        let refund = funds_provided - total_owed;
        if refund > 0 {
            accounts.credit(creator, refund)?;
        }
        Ok(id)
    }

    /// Cancel an active bounty and refund its remaining escrow.
    pub fn cancel_bounty(
        &mut self,
        bounty_id: BountyId,
        caller: &WalletAddress,
        accounts: &mut dyn FundsTransfer,
    ) -> Result<(), MarketError> {
        let bounty = self
            .bounties
            .get(&bounty_id)
            .ok_or(MarketError::NotFound(bounty_id))?;
        if bounty.creator != *caller {
            return Err(MarketError::NotCreator(caller.to_string()));
        }
        if !bounty.active {
            return Err(MarketError::NotActive(bounty_id));
        }
        let refund = bounty.remaining_funds;
        let new_balance = self
            .total_balance
            .checked_sub(refund)
            .ok_or(MarketError::Overflow)?;

        if let Some(bounty) = self.bounties.get_mut(&bounty_id) {
            bounty.active = false;
            bounty.remaining_funds = 0;
        }
        self.total_balance = new_balance;
        debug_assert!(self.audit_conservation());
        tracing::info!(bounty = bounty_id, refund, "bounty cancelled");

        if refund > 0 {
            accounts.credit(caller, refund)?;
        }
        Ok(())
    }

    /// Submit a response to a bounty and collect the reward.
    ///
    /// Response admission and payment are one indivisible step: the response
    /// record, the escrow decrement, and the reward credit either all happen
    /// or none do (the credit itself being the final effect). Expiry is
    /// checked against `now` without flipping `active`; deactivation of
    /// expired bounties is [`Self::process_expired`]'s job.
    #[allow(clippy::too_many_arguments)]
    pub fn respond_to_bounty(
        &mut self,
        bounty_id: BountyId,
        token_id: TokenId,
        result_value: bool,
        proof_bytes: Vec<u8>,
        caller: &WalletAddress,
        directory: &dyn GenomeDirectory,
        accounts: &mut dyn FundsTransfer,
        now: Timestamp,
    ) -> Result<ResponseId, MarketError> {
        if self.paused {
            return Err(MarketError::Paused);
        }
        let bounty = self
            .bounties
            .get(&bounty_id)
            .ok_or(MarketError::NotFound(bounty_id))?;
        if !bounty.active {
            return Err(MarketError::NotActive(bounty_id));
        }
        if bounty.is_expired(now) {
            return Err(MarketError::Expired(bounty_id));
        }
        if bounty.is_full() {
            return Err(MarketError::Full(bounty_id));
        }
        if self.response_index.contains_key(&(token_id, bounty_id)) {
            return Err(MarketError::AlreadyResponded {
                bounty: bounty_id,
                token: token_id,
            });
        }
        let reward = bounty.reward_per_response;
        let new_remaining = bounty
            .remaining_funds
            .checked_sub(reward)
            .ok_or(MarketError::Overflow)?;
        let new_balance = self
            .total_balance
            .checked_sub(reward)
            .ok_or(MarketError::Overflow)?;

        // Cross-component reads happen before any state mutation, so a
        // reentrant directory implementation cannot observe a half-applied
        // response.
        let owner = directory
            .owner_of(token_id)
            .map_err(|_| MarketError::NotTokenOwner(caller.to_string()))?;
        if owner != *caller {
            return Err(MarketError::NotTokenOwner(caller.to_string()));
        }
        let metadata = directory
            .metadata(token_id)
            .map_err(|_| MarketError::NotTokenOwner(caller.to_string()))?;
        if !metadata.active {
            return Err(MarketError::GenomeInactive(token_id));
        }

        let id = self.next_response_id;
        self.next_response_id += 1;
        if let Some(bounty) = self.bounties.get_mut(&bounty_id) {
            bounty.response_count += 1;
            bounty.remaining_funds = new_remaining;
            if bounty.is_full() {
                bounty.active = false;
            }
        }
        self.total_balance = new_balance;
        self.responses.insert(
            id,
            Response {
                id,
                bounty_id,
                token_id,
                responder: caller.clone(),
                result_digest: helix_crypto::response_digest(
                    bounty_id,
                    token_id,
                    caller,
                    result_value,
                    now,
                ),
                proof_bytes,
                result_value,
                timestamp: now,
                paid: true,
            },
        );
        self.response_index.insert((token_id, bounty_id), id);
        debug_assert!(self.audit_conservation());
        tracing::info!(bounty = bounty_id, token = token_id, response = id, reward, "response paid");

        accounts.credit(caller, reward)?;
        Ok(id)
    }

    /// Whether a token could currently respond to a bounty.
    ///
    /// Never fails: any directory failure means "cannot respond".
    pub fn can_respond(
        &self,
        token_id: TokenId,
        bounty_id: BountyId,
        directory: &dyn GenomeDirectory,
        now: Timestamp,
    ) -> bool {
        if self.paused {
            return false;
        }
        let bounty = match self.bounties.get(&bounty_id) {
            Some(b) => b,
            None => return false,
        };
        if !bounty.active || bounty.is_expired(now) || bounty.is_full() {
            return false;
        }
        if self.response_index.contains_key(&(token_id, bounty_id)) {
            return false;
        }
        match directory.metadata(token_id) {
            Ok(metadata) => metadata.active,
            Err(_) => false,
        }
    }

    /// Deactivate and refund the given bounties if their expiry has passed.
    ///
    /// Explicit batch maintenance, not a background timer. Ids that are
    /// unknown, inactive, or not yet expired are skipped. Each processed
    /// bounty is final once its refund is issued.
    pub fn process_expired(
        &mut self,
        bounty_ids: &[BountyId],
        accounts: &mut dyn FundsTransfer,
        now: Timestamp,
    ) -> Result<Vec<ExpiredBounty>, MarketError> {
        let mut processed = Vec::new();
        for &bounty_id in bounty_ids {
            let bounty = match self.bounties.get(&bounty_id) {
                Some(b) if b.active && b.is_expired(now) => b,
                _ => continue,
            };
            let creator = bounty.creator.clone();
            let refund = bounty.remaining_funds;
            let new_balance = self
                .total_balance
                .checked_sub(refund)
                .ok_or(MarketError::Overflow)?;

            if let Some(bounty) = self.bounties.get_mut(&bounty_id) {
                bounty.active = false;
                bounty.remaining_funds = 0;
            }
            self.total_balance = new_balance;
            debug_assert!(self.audit_conservation());
            tracing::info!(bounty = bounty_id, refund, "expired bounty processed");

            if refund > 0 {
                accounts.credit(&creator, refund)?;
            }
            processed.push(ExpiredBounty {
                bounty_id,
                creator,
                refunded: refund,
            });
        }
        Ok(processed)
    }

    // ── Administration ───────────────────────────────────────────────────

    fn require_admin(&self, caller: &WalletAddress) -> Result<(), MarketError> {
        if *caller != self.admin {
            return Err(MarketError::NotAdmin(caller.to_string()));
        }
        Ok(())
    }

    pub fn set_platform_fee(&mut self, caller: &WalletAddress, bps: u32) -> Result<(), MarketError> {
        self.require_admin(caller)?;
        if bps > MAX_PLATFORM_FEE_BPS {
            return Err(MarketError::FeeTooHigh(bps));
        }
        self.platform_fee_bps = bps;
        Ok(())
    }

    pub fn pause(&mut self, caller: &WalletAddress) -> Result<(), MarketError> {
        self.require_admin(caller)?;
        self.paused = true;
        tracing::warn!("marketplace paused");
        Ok(())
    }

    pub fn unpause(&mut self, caller: &WalletAddress) -> Result<(), MarketError> {
        self.require_admin(caller)?;
        self.paused = false;
        tracing::info!("marketplace unpaused");
        Ok(())
    }

    /// Withdraw accumulated platform revenue: everything held beyond the
    /// escrow still reserved for bounties.
    pub fn withdraw_fees(
        &mut self,
        caller: &WalletAddress,
        accounts: &mut dyn FundsTransfer,
    ) -> Result<u128, MarketError> {
        self.require_admin(caller)?;
        let reserved: u128 = self.bounties.values().map(|b| b.remaining_funds).sum();
        let revenue = self
            .total_balance
            .checked_sub(reserved)
            .ok_or(MarketError::Overflow)?;
        self.total_balance = reserved;
        tracing::info!(revenue, "platform fees withdrawn");
        if revenue > 0 {
            accounts.credit(&self.admin, revenue)?;
        }
        Ok(revenue)
    }

    // ── Views ────────────────────────────────────────────────────────────

    pub fn bounty(&self, id: BountyId) -> Option<&Bounty> {
        self.bounties.get(&id)
    }

    pub fn response(&self, id: ResponseId) -> Option<&Response> {
        self.responses.get(&id)
    }

    /// Bounties whose `active` flag is set, ascending by id.
    ///
    /// Expired-but-unprocessed bounties are included: the flag means "never
    /// cancelled, filled, or explicitly expired".
    pub fn list_active(&self) -> Vec<&Bounty> {
        let mut active: Vec<&Bounty> = self.bounties.values().filter(|b| b.active).collect();
        active.sort_by_key(|b| b.id);
        active
    }

    /// All responses recorded against a bounty, ascending by id.
    pub fn responses_for_bounty(&self, bounty_id: BountyId) -> Vec<&Response> {
        let mut found: Vec<&Response> = self
            .responses
            .values()
            .filter(|r| r.bounty_id == bounty_id)
            .collect();
        found.sort_by_key(|r| r.id);
        found
    }

    /// All responses submitted by `responder`, ascending by id.
    pub fn responses_of(&self, responder: &WalletAddress) -> Vec<&Response> {
        let mut found: Vec<&Response> = self
            .responses
            .values()
            .filter(|r| r.responder == *responder)
            .collect();
        found.sort_by_key(|r| r.id);
        found
    }

    /// Total rewards paid out to `responder` so far.
    pub fn total_earned(&self, responder: &WalletAddress) -> u128 {
        self.responses_of(responder)
            .iter()
            .filter_map(|r| self.bounties.get(&r.bounty_id))
            .map(|b| b.reward_per_response)
            .sum()
    }

    /// Escrow still claimable across all active bounties.
    pub fn open_rewards(&self) -> u128 {
        self.bounties
            .values()
            .filter(|b| b.active)
            .map(|b| b.remaining_funds)
            .sum()
    }

    pub fn bounty_count(&self) -> u64 {
        self.bounties.len() as u64
    }

    pub fn response_count(&self) -> u64 {
        self.responses.len() as u64
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn current_fee_bps(&self) -> u32 {
        self.platform_fee_bps
    }

    pub fn total_balance(&self) -> u128 {
        self.total_balance
    }

    /// Escrow conservation check.
    ///
    /// For every bounty: while active (or filled), escrow accounting must
    /// balance exactly (`remaining + reward * responses == total_funded`);
    /// once cancelled or expiry-processed, `remaining` must be zero. The
    /// held balance must always cover every bounty's remaining escrow.
    pub fn audit_conservation(&self) -> bool {
        let mut reserved: u128 = 0;
        for bounty in self.bounties.values() {
            reserved += bounty.remaining_funds;
            let paid = bounty.reward_per_response * bounty.response_count as u128;
            let balances = bounty.remaining_funds + paid == bounty.total_funded;
            if bounty.active && !balances {
                return false;
            }
            if !bounty.active && !balances && bounty.remaining_funds != 0 {
                return false;
            }
        }
        reserved <= self.total_balance
    }
}

impl BountyEscrowMarket {
    /// Persist all market state to a bounty store.
    pub fn save_to_store(&self, store: &dyn helix_store::BountyStore) -> Result<(), MarketError> {
        store.put_meta(b"admin", self.admin.as_str().as_bytes())?;
        store.put_meta(b"platform_fee_bps", &self.platform_fee_bps.to_be_bytes())?;
        store.put_meta(b"paused", &[self.paused as u8])?;
        store.put_meta(b"total_balance", &self.total_balance.to_be_bytes())?;
        store.put_meta(b"next_bounty_id", &self.next_bounty_id.to_be_bytes())?;
        store.put_meta(b"next_response_id", &self.next_response_id.to_be_bytes())?;

        for (id, bounty) in &self.bounties {
            let bytes = bincode::serialize(bounty)
                .map_err(|e| helix_store::StoreError::Serialization(e.to_string()))?;
            store.put_bounty(*id, &bytes)?;
        }
        for (id, response) in &self.responses {
            let bytes = bincode::serialize(response)
                .map_err(|e| helix_store::StoreError::Serialization(e.to_string()))?;
            store.put_response(*id, &bytes)?;
        }
        Ok(())
    }

    /// Restore market state from a bounty store. The `(token, bounty)`
    /// uniqueness index is rebuilt from the stored responses.
    pub fn load_from_store(store: &dyn helix_store::BountyStore) -> Result<Self, MarketError> {
        let admin_bytes = store
            .get_meta(b"admin")?
            .ok_or_else(|| helix_store::StoreError::Corruption("missing admin record".into()))?;
        let admin_str = String::from_utf8(admin_bytes)
            .map_err(|e| helix_store::StoreError::Corruption(e.to_string()))?;
        let admin = WalletAddress::parse(&admin_str)
            .ok_or_else(|| helix_store::StoreError::Corruption("malformed admin address".into()))?;

        let platform_fee_bps = match store.get_meta(b"platform_fee_bps")? {
            Some(bytes) if bytes.len() >= 4 => {
                let mut buf = [0u8; 4];
                buf.copy_from_slice(&bytes[..4]);
                u32::from_be_bytes(buf)
            }
            _ => 0,
        };
        let paused = matches!(store.get_meta(b"paused")?.as_deref(), Some([1, ..]));
        let total_balance = match store.get_meta(b"total_balance")? {
            Some(bytes) if bytes.len() >= 16 => {
                let mut buf = [0u8; 16];
                buf.copy_from_slice(&bytes[..16]);
                u128::from_be_bytes(buf)
            }
            _ => 0,
        };
        let next_bounty_id = read_u64_meta(store, b"next_bounty_id")?.unwrap_or(1);
        let next_response_id = read_u64_meta(store, b"next_response_id")?.unwrap_or(1);

        let mut bounties = HashMap::new();
        for (id, bytes) in store.iter_bounties()? {
            let bounty: Bounty = bincode::deserialize(&bytes)
                .map_err(|e| helix_store::StoreError::Serialization(e.to_string()))?;
            bounties.insert(id, bounty);
        }

        let mut responses = HashMap::new();
        let mut response_index = HashMap::new();
        for (id, bytes) in store.iter_responses()? {
            let response: Response = bincode::deserialize(&bytes)
                .map_err(|e| helix_store::StoreError::Serialization(e.to_string()))?;
            response_index.insert((response.token_id, response.bounty_id), id);
            responses.insert(id, response);
        }

        Ok(Self {
            admin,
            platform_fee_bps,
            paused,
            total_balance,
            next_bounty_id,
            next_response_id,
            bounties,
            responses,
            response_index,
        })
    }
}

fn read_u64_meta(
    store: &dyn helix_store::BountyStore,
    key: &[u8],
) -> Result<Option<u64>, MarketError> {
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
