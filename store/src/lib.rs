//! Abstract storage traits for the Helix protocol.
//!
//! Every storage backend (embedded KV, in-memory for testing) implements
//! these traits. The engines depend only on the traits and serialize their
//! own record types, so backends stay free of domain knowledge.
//!
//! Required access patterns: point lookup by id, point lookup by identity,
//! and full enumeration for engine reload.

pub mod bounty;
pub mod error;
pub mod genome;
pub mod researcher;

pub use bounty::BountyStore;
pub use error::StoreError;
pub use genome::GenomeStore;
pub use researcher::ResearcherStore;
