//! Bounty escrow marketplace.
//!
//! Researchers fund standing queries ("bounties") against data tokens; token
//! holders submit boolean responses with opaque proof payloads and are paid
//! a fixed reward per accepted response, straight out of escrow. Funds are
//! conserved: what a bounty escrows is exactly what it pays out plus what it
//! refunds on cancellation or expiry.
//!
//! The market authenticates responders through the registry's
//! [`GenomeDirectory`](helix_registry::GenomeDirectory) trait — two read-only
//! calls, made before any market state changes.

pub mod bounty;
pub mod error;
pub mod market;

pub use bounty::{Bounty, BountySpec, ExpiredBounty, Response};
pub use error::MarketError;
pub use market::{
    BountyEscrowMarket, BPS_DENOMINATOR, MAX_BOUNTY_SECS, MAX_PLATFORM_FEE_BPS, MIN_BOUNTY_SECS,
};
