//! Bounty and response records.

use helix_types::{BountyId, Digest, ResponseId, Timestamp, TokenId, WalletAddress};
use serde::{Deserialize, Serialize};

/// A funded standing query against data tokens.
///
/// `active` means "was never cancelled, filled, or explicitly expired": an
/// expired bounty stays active until a maintenance pass processes it, while
/// response admission rejects it at read time. Once false, `active` never
/// reverts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Bounty {
    pub id: BountyId,
    pub creator: WalletAddress,
    /// Query vocabulary, e.g. "SNP_CHECK", "TRAIT_QUERY", "VARIANT_SEARCH".
    pub query_kind: String,
    /// Opaque query payload, e.g. `{"rsid":"rs12913832","genotype":"GG"}`.
    pub query_params: String,
    pub reward_per_response: u128,
    pub max_responses: u32,
    pub response_count: u32,
    /// `reward_per_response * max_responses`, fixed at creation.
    pub total_funded: u128,
    /// Escrow still held for this bounty. Decremented per payout; zeroed by
    /// cancellation or expiry processing.
    pub remaining_funds: u128,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub active: bool,
}

impl Bounty {
    /// Whether the expiry instant has been reached at `now`.
    /// Inclusive: a bounty expires exactly at `expires_at`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }

    pub fn is_full(&self) -> bool {
        self.response_count >= self.max_responses
    }
}

/// Parameters for creating a bounty.
#[derive(Clone, Debug)]
pub struct BountySpec {
    pub query_kind: String,
    pub query_params: String,
    pub reward_per_response: u128,
    pub max_responses: u32,
    pub duration_secs: u64,
}

/// An accepted bounty response.
///
/// Admission and payment are one indivisible step: a recorded response is
/// always paid, and `paid` never reverts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Response {
    pub id: ResponseId,
    pub bounty_id: BountyId,
    pub token_id: TokenId,
    pub responder: WalletAddress,
    /// Deterministic digest over `(bounty, token, responder, result, time)`.
    pub result_digest: Digest,
    /// Opaque proof payload. Stored, never interpreted; verification is an
    /// off-chain collaborator's job.
    pub proof_bytes: Vec<u8>,
    pub result_value: bool,
    pub timestamp: Timestamp,
    pub paid: bool,
}

/// Outcome of processing one expired bounty in a maintenance batch.
#[derive(Clone, Debug)]
pub struct ExpiredBounty {
    pub bounty_id: BountyId,
    pub creator: WalletAddress,
    /// Escrow returned to the creator.
    pub refunded: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounty(expires_at: u64) -> Bounty {
        Bounty {
            id: 1,
            creator: WalletAddress::new("hlx_researcher"),
            query_kind: "SNP_CHECK".into(),
            query_params: r#"{"rsid":"rs4988235","genotype":"CC"}"#.into(),
            reward_per_response: 10,
            max_responses: 3,
            response_count: 0,
            total_funded: 30,
            remaining_funds: 30,
            created_at: Timestamp::new(0),
            expires_at: Timestamp::new(expires_at),
            active: true,
        }
    }

    #[test]
    fn expiry_is_inclusive() {
        let b = bounty(1000);
        assert!(!b.is_expired(Timestamp::new(999)));
        assert!(b.is_expired(Timestamp::new(1000)));
        assert!(b.is_expired(Timestamp::new(1001)));
    }

    #[test]
    fn fullness_tracks_response_count() {
        let mut b = bounty(1000);
        assert!(!b.is_full());
        b.response_count = 3;
        assert!(b.is_full());
    }
}
