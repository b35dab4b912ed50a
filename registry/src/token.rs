//! Data token and access grant records.

use helix_types::{ContentHash, Timestamp, TokenId, WalletAddress};
use serde::{Deserialize, Serialize};

/// A minted data token: exclusive ownership of a pointer to an encrypted
/// off-chain genome blob.
///
/// The id space is append-only and never reused. `content_hash` is immutable
/// once set; `active` only ever transitions true → false. Metadata is
/// retained for the lifetime of the registry even after deactivation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataToken {
    pub id: TokenId,
    /// Current holder. Exclusive: exactly one owner at any time.
    pub owner: WalletAddress,
    /// Opaque locator for the encrypted blob (e.g. an IPFS CID).
    pub content_ref: String,
    /// Blake2b fingerprint of the encrypted blob for integrity checks.
    pub content_hash: ContentHash,
    /// Cipher description for the off-chain pipeline (e.g. "aes-256-gcm").
    pub encryption_tag: String,
    /// Free-form classification (e.g. "whole-genome", "snp-array").
    pub category: String,
    pub created_at: Timestamp,
    pub size_bytes: u64,
    pub active: bool,
}

/// Parameters for minting a new data token.
#[derive(Clone, Debug)]
pub struct MintRequest {
    pub content_ref: String,
    pub content_hash: ContentHash,
    pub encryption_tag: String,
    pub category: String,
    pub size_bytes: u64,
}

/// A time-bounded, revocable delegation of read access to a token's
/// content pointer. Keyed by `(token, delegate)` in the registry.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct AccessGrant {
    /// Absolute expiry. The grant is usable strictly before this instant.
    pub expiry: Timestamp,
    pub valid: bool,
}

impl AccessGrant {
    /// Whether the grant authorizes access at `now`.
    ///
    /// Exclusive at the boundary: usable at `expiry - 1`, unusable at
    /// `expiry` and beyond.
    pub fn is_usable(&self, now: Timestamp) -> bool {
        self.valid && now < self.expiry
    }
}
