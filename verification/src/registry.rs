//! Core verification-registry engine.

use crate::error::VerifyError;
use crate::researcher::{Researcher, ResearcherProfile, ResearcherStatus, VerificationRequest};
use helix_types::{RequestId, Timestamp, WalletAddress};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Default reputation score assigned at registration.
pub const DEFAULT_REPUTATION: u8 = 50;

/// The researcher verification registry.
///
/// Owns one record per identity plus the queue of verification requests.
/// Role model: the administrator manages the verifier set, suspensions and
/// reputation; verifiers process status transitions; the configured
/// marketplace identity is the only caller allowed to push bounty stats.
pub struct ResearcherVerificationRegistry {
    admin: WalletAddress,
    verifiers: HashSet<WalletAddress>,
    /// Marketplace identity allowed to call `update_bounty_stats`.
    market: Option<WalletAddress>,
    /// Minimum reputation for `is_verified_researcher` to hold.
    min_reputation_score: u8,
    next_request_id: RequestId,
    researchers: HashMap<WalletAddress, Researcher>,
    /// Email → identity, for registration-time uniqueness checks.
    email_index: HashMap<String, WalletAddress>,
    /// Ordered so pending-request listings are deterministic.
    requests: BTreeMap<RequestId, VerificationRequest>,
}

impl ResearcherVerificationRegistry {
    pub fn new(admin: WalletAddress, min_reputation_score: u8) -> Self {
        Self {
            admin,
            verifiers: HashSet::new(),
            market: None,
            min_reputation_score,
            next_request_id: 1,
            researchers: HashMap::new(),
            email_index: HashMap::new(),
            requests: BTreeMap::new(),
        }
    }

    /// Register a new researcher identity with status `Pending`.
    pub fn register(
        &mut self,
        identity: &WalletAddress,
        profile: ResearcherProfile,
        now: Timestamp,
    ) -> Result<(), VerifyError> {
        if self.researchers.contains_key(identity) {
            return Err(VerifyError::AlreadyRegistered(identity.to_string()));
        }
        if self.email_index.contains_key(&profile.email) {
            return Err(VerifyError::EmailTaken(profile.email));
        }
        if profile.name.is_empty() {
            return Err(VerifyError::MissingField("name"));
        }
        if profile.institution.is_empty() {
            return Err(VerifyError::MissingField("institution"));
        }
        if profile.email.is_empty() {
            return Err(VerifyError::MissingField("email"));
        }
        if profile.field.is_empty() {
            return Err(VerifyError::MissingField("field"));
        }

        self.email_index
            .insert(profile.email.clone(), identity.clone());
        self.researchers.insert(
            identity.clone(),
            Researcher {
                identity: identity.clone(),
                name: profile.name,
                institution: profile.institution,
                email: profile.email,
                orcid_id: profile.orcid_id,
                field: profile.field,
                irb_number: profile.irb_number,
                status: ResearcherStatus::Pending,
                registered_at: now,
                verified_at: None,
                reputation_score: DEFAULT_REPUTATION,
                total_bounties: 0,
                successful_bounties: 0,
                active: true,
            },
        );
        tracing::info!(identity = %identity, "researcher registered");
        Ok(())
    }

    /// Submit supporting documents for verification review.
    pub fn submit_verification(
        &mut self,
        identity: &WalletAddress,
        documents_ref: String,
        notes: String,
        now: Timestamp,
    ) -> Result<RequestId, VerifyError> {
        let researcher = self
            .researchers
            .get(identity)
            .ok_or_else(|| VerifyError::NotRegistered(identity.to_string()))?;
        if !researcher.status.can_submit_documents() {
            return Err(VerifyError::InvalidStatus {
                status: researcher.status,
            });
        }

        let id = self.next_request_id;
        self.next_request_id += 1;
        self.requests.insert(
            id,
            VerificationRequest {
                id,
                researcher: identity.clone(),
                documents_ref,
                notes,
                submitted_at: now,
                processed: false,
            },
        );
        tracing::info!(request = id, identity = %identity, "verification request submitted");
        Ok(id)
    }

    /// Move a researcher to an explicit post-registration status.
    ///
    /// Verifier-role only. `verified_at` is stamped the first time the
    /// researcher reaches `FullyVerified`; `Suspended`/`Revoked` force
    /// `active = false`.
    pub fn verify(
        &mut self,
        caller: &WalletAddress,
        identity: &WalletAddress,
        new_status: ResearcherStatus,
        now: Timestamp,
    ) -> Result<(), VerifyError> {
        self.require_verifier(caller)?;
        if !new_status.is_assignable() {
            return Err(VerifyError::InvalidStatus { status: new_status });
        }
        let researcher = self
            .researchers
            .get_mut(identity)
            .ok_or_else(|| VerifyError::NotRegistered(identity.to_string()))?;

        apply_status(researcher, new_status, now);
        tracing::info!(identity = %identity, status = ?new_status, "researcher status updated");
        Ok(())
    }

    /// Process a pending verification request.
    ///
    /// Verifier-role only. Approval advances the researcher one step on the
    /// forward path (Pending → EmailVerified → FullyVerified); rejection
    /// just marks the request processed.
    pub fn process_request(
        &mut self,
        caller: &WalletAddress,
        request_id: RequestId,
        approved: bool,
        now: Timestamp,
    ) -> Result<(), VerifyError> {
        self.require_verifier(caller)?;
        let request = self
            .requests
            .get(&request_id)
            .ok_or(VerifyError::RequestNotFound(request_id))?;
        if request.processed {
            return Err(VerifyError::AlreadyProcessed(request_id));
        }
        let identity = request.researcher.clone();

        if approved {
            let researcher = self
                .researchers
                .get_mut(&identity)
                .ok_or_else(|| VerifyError::NotRegistered(identity.to_string()))?;
            let next = researcher
                .status
                .next_step()
                .ok_or(VerifyError::InvalidStatus {
                    status: researcher.status,
                })?;
            apply_status(researcher, next, now);
        }

        // Marked processed only after the status change cannot fail.
        if let Some(request) = self.requests.get_mut(&request_id) {
            request.processed = true;
        }
        tracing::info!(request = request_id, approved, "verification request processed");
        Ok(())
    }

    /// Suspend a researcher. Admin-role only.
    pub fn suspend(
        &mut self,
        caller: &WalletAddress,
        identity: &WalletAddress,
        reason: &str,
    ) -> Result<(), VerifyError> {
        self.require_admin(caller)?;
        let researcher = self
            .researchers
            .get_mut(identity)
            .ok_or_else(|| VerifyError::NotRegistered(identity.to_string()))?;
        researcher.status = ResearcherStatus::Suspended;
        researcher.active = false;
        tracing::warn!(identity = %identity, reason, "researcher suspended");
        Ok(())
    }

    /// Reactivate a suspended researcher. Admin-role only.
    ///
    /// Always restores `FullyVerified`, regardless of the status held before
    /// suspension.
    pub fn reactivate(
        &mut self,
        caller: &WalletAddress,
        identity: &WalletAddress,
        now: Timestamp,
    ) -> Result<(), VerifyError> {
        self.require_admin(caller)?;
        let researcher = self
            .researchers
            .get_mut(identity)
            .ok_or_else(|| VerifyError::NotRegistered(identity.to_string()))?;
        if researcher.status != ResearcherStatus::Suspended {
            return Err(VerifyError::NotSuspended(identity.to_string()));
        }
        apply_status(researcher, ResearcherStatus::FullyVerified, now);
        tracing::info!(identity = %identity, "researcher reactivated");
        Ok(())
    }

    /// Overwrite a researcher's reputation score. Admin-role only.
    pub fn update_reputation(
        &mut self,
        caller: &WalletAddress,
        identity: &WalletAddress,
        score: u8,
    ) -> Result<(), VerifyError> {
        self.require_admin(caller)?;
        if score > 100 {
            return Err(VerifyError::ScoreOutOfRange(score));
        }
        let researcher = self
            .researchers
            .get_mut(identity)
            .ok_or_else(|| VerifyError::NotRegistered(identity.to_string()))?;
        researcher.reputation_score = score;
        Ok(())
    }

    /// Record a bounty outcome for a researcher.
    ///
    /// Restricted to the configured marketplace identity.
    pub fn update_bounty_stats(
        &mut self,
        caller: &WalletAddress,
        identity: &WalletAddress,
        successful: bool,
    ) -> Result<(), VerifyError> {
        match &self.market {
            Some(market) if market == caller => {}
            _ => return Err(VerifyError::NotAuthorized(caller.to_string())),
        }
        let researcher = self
            .researchers
            .get_mut(identity)
            .ok_or_else(|| VerifyError::NotRegistered(identity.to_string()))?;
        researcher.total_bounties += 1;
        if successful {
            researcher.successful_bounties += 1;
        }
        Ok(())
    }

    // ── Administration ───────────────────────────────────────────────────

    fn require_admin(&self, caller: &WalletAddress) -> Result<(), VerifyError> {
        if *caller != self.admin {
            return Err(VerifyError::NotAuthorized(caller.to_string()));
        }
        Ok(())
    }

    fn require_verifier(&self, caller: &WalletAddress) -> Result<(), VerifyError> {
        if *caller != self.admin && !self.verifiers.contains(caller) {
            return Err(VerifyError::NotAuthorized(caller.to_string()));
        }
        Ok(())
    }

    /// Add or remove a verifier. Admin-role only; the admin is implicitly a
    /// verifier.
    pub fn set_verifier(
        &mut self,
        caller: &WalletAddress,
        identity: &WalletAddress,
        enabled: bool,
    ) -> Result<(), VerifyError> {
        self.require_admin(caller)?;
        if enabled {
            self.verifiers.insert(identity.clone());
        } else {
            self.verifiers.remove(identity);
        }
        Ok(())
    }

    /// Configure the marketplace identity allowed to push bounty stats.
    pub fn set_market(
        &mut self,
        caller: &WalletAddress,
        market: &WalletAddress,
    ) -> Result<(), VerifyError> {
        self.require_admin(caller)?;
        self.market = Some(market.clone());
        Ok(())
    }

    pub fn set_min_reputation_score(
        &mut self,
        caller: &WalletAddress,
        score: u8,
    ) -> Result<(), VerifyError> {
        self.require_admin(caller)?;
        if score > 100 {
            return Err(VerifyError::ScoreOutOfRange(score));
        }
        self.min_reputation_score = score;
        Ok(())
    }

    // ── Views ────────────────────────────────────────────────────────────

    /// The bounty-creation eligibility policy. Never fails.
    pub fn is_verified_researcher(&self, identity: &WalletAddress) -> bool {
        self.researchers
            .get(identity)
            .map(|r| {
                r.status == ResearcherStatus::FullyVerified
                    && r.active
                    && r.reputation_score >= self.min_reputation_score
            })
            .unwrap_or(false)
    }

    pub fn researcher(&self, identity: &WalletAddress) -> Option<&Researcher> {
        self.researchers.get(identity)
    }

    /// All researchers, ordered by registration time then identity.
    pub fn list_researchers(&self) -> Vec<&Researcher> {
        let mut all: Vec<&Researcher> = self.researchers.values().collect();
        all.sort_by(|a, b| {
            a.registered_at
                .cmp(&b.registered_at)
                .then_with(|| a.identity.cmp(&b.identity))
        });
        all
    }

    /// Unprocessed verification requests in submission order.
    pub fn list_pending_requests(&self) -> Vec<&VerificationRequest> {
        self.requests.values().filter(|r| !r.processed).collect()
    }

    pub fn researcher_count(&self) -> u64 {
        self.researchers.len() as u64
    }
}

/// Apply a status transition, maintaining the `verified_at` / `active`
/// bookkeeping shared by `verify`, `process_request`, and `reactivate`.
fn apply_status(researcher: &mut Researcher, new_status: ResearcherStatus, now: Timestamp) {
    researcher.status = new_status;
    match new_status {
        ResearcherStatus::FullyVerified => {
            if researcher.verified_at.is_none() {
                researcher.verified_at = Some(now);
            }
            researcher.active = true;
        }
        ResearcherStatus::Suspended | ResearcherStatus::Revoked => {
            researcher.active = false;
        }
        _ => {}
    }
}

impl ResearcherVerificationRegistry {
    /// Persist all registry state to a researcher store.
    pub fn save_to_store(
        &self,
        store: &dyn helix_store::ResearcherStore,
    ) -> Result<(), VerifyError> {
        store.put_meta(b"admin", self.admin.as_str().as_bytes())?;
        store.put_meta(b"min_reputation_score", &[self.min_reputation_score])?;
        store.put_meta(b"next_request_id", &self.next_request_id.to_be_bytes())?;

        let verifiers: Vec<&WalletAddress> = self.verifiers.iter().collect();
        let bytes = bincode::serialize(&verifiers)
            .map_err(|e| helix_store::StoreError::Serialization(e.to_string()))?;
        store.put_meta(b"verifiers", &bytes)?;

        let bytes = bincode::serialize(&self.market)
            .map_err(|e| helix_store::StoreError::Serialization(e.to_string()))?;
        store.put_meta(b"market", &bytes)?;

        for (identity, researcher) in &self.researchers {
            let bytes = bincode::serialize(researcher)
                .map_err(|e| helix_store::StoreError::Serialization(e.to_string()))?;
            store.put_researcher(identity, &bytes)?;
        }
        for (id, request) in &self.requests {
            let bytes = bincode::serialize(request)
                .map_err(|e| helix_store::StoreError::Serialization(e.to_string()))?;
            store.put_request(*id, &bytes)?;
        }
        Ok(())
    }

    /// Restore registry state from a researcher store.
    pub fn load_from_store(
        store: &dyn helix_store::ResearcherStore,
    ) -> Result<Self, VerifyError> {
        let admin_bytes = store
            .get_meta(b"admin")?
            .ok_or_else(|| helix_store::StoreError::Corruption("missing admin record".into()))?;
        let admin_str = String::from_utf8(admin_bytes)
            .map_err(|e| helix_store::StoreError::Corruption(e.to_string()))?;
        let admin = WalletAddress::parse(&admin_str)
            .ok_or_else(|| helix_store::StoreError::Corruption("malformed admin address".into()))?;

        let min_reputation_score = match store.get_meta(b"min_reputation_score")? {
            Some(bytes) if !bytes.is_empty() => bytes[0],
            _ => 0,
        };
        let next_request_id = match store.get_meta(b"next_request_id")? {
            Some(bytes) if bytes.len() >= 8 => {
                let mut buf = [0u8; 8];
                buf.copy_from_slice(&bytes[..8]);
                u64::from_be_bytes(buf)
            }
            _ => 1,
        };
        let verifiers = match store.get_meta(b"verifiers")? {
            Some(bytes) => {
                let list: Vec<WalletAddress> = bincode::deserialize(&bytes)
                    .map_err(|e| helix_store::StoreError::Serialization(e.to_string()))?;
                list.into_iter().collect()
            }
            None => HashSet::new(),
        };
        let market = match store.get_meta(b"market")? {
            Some(bytes) => bincode::deserialize(&bytes)
                .map_err(|e| helix_store::StoreError::Serialization(e.to_string()))?,
            None => None,
        };

        let mut researchers = HashMap::new();
        let mut email_index = HashMap::new();
        for (identity, bytes) in store.iter_researchers()? {
            let researcher: Researcher = bincode::deserialize(&bytes)
                .map_err(|e| helix_store::StoreError::Serialization(e.to_string()))?;
            email_index.insert(researcher.email.clone(), identity.clone());
            researchers.insert(identity, researcher);
        }

        let mut requests = BTreeMap::new();
        for (id, bytes) in store.iter_requests()? {
            let request: VerificationRequest = bincode::deserialize(&bytes)
                .map_err(|e| helix_store::StoreError::Serialization(e.to_string()))?;
            requests.insert(id, request);
        }

        Ok(Self {
            admin,
            verifiers,
            market,
            min_reputation_score,
            next_request_id,
            researchers,
            email_index,
            requests,
        })
    }
}
