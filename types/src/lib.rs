//! Fundamental types for the Helix protocol.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: wallet addresses, content hashes, digests, identifiers,
//! timestamps, and the funds-transfer collaborator trait.

pub mod address;
pub mod hash;
pub mod id;
pub mod time;
pub mod transfer;

pub use address::WalletAddress;
pub use hash::{ContentHash, Digest};
pub use id::{BountyId, RequestId, ResponseId, TokenId};
pub use time::Timestamp;
pub use transfer::{FundsTransfer, TransferError};
