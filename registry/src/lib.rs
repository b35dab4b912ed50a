//! Genome access registry.
//!
//! Owns the authoritative mapping from data token to its metadata and
//! delegated-access list. A data token is the unit of exclusive ownership
//! over a pointer to an encrypted off-chain genome blob; access to that
//! pointer can be delegated, time-bounded and revocable, to identities the
//! registry administrator has marked trusted.
//!
//! Every other component authenticates token ownership through this
//! registry — the marketplace consumes it via the narrow [`GenomeDirectory`]
//! trait and never touches registry storage.

pub mod directory;
pub mod error;
pub mod registry;
pub mod token;

pub use directory::GenomeDirectory;
pub use error::RegistryError;
pub use registry::{GenomeAccessRegistry, MAX_GRANT_SECS, MIN_GRANT_SECS};
pub use token::{AccessGrant, DataToken, MintRequest};
