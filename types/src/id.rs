//! Identifier aliases for the registry, market, and verification records.
//!
//! Every id space is append-only and monotonically assigned by its owning
//! component, starting at 1. Ids are never reused.

/// Unique identifier for a minted data token.
pub type TokenId = u64;

/// Unique identifier for a research bounty.
pub type BountyId = u64;

/// Unique identifier for an accepted bounty response.
pub type ResponseId = u64;

/// Unique identifier for a researcher verification request.
pub type RequestId = u64;
