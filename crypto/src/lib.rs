//! Hashing primitives for the Helix protocol.
//!
//! - **Blake2b-256** for content integrity hashes and response digests.
//!
//! Key derivation, signing, and blob encryption live entirely in the
//! off-chain pipeline; the core only fingerprints what it is handed.

pub mod hash;

pub use hash::{blake2b_256, blake2b_256_multi, hash_content, response_digest};
