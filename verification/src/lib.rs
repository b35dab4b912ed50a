//! Researcher verification registry.
//!
//! Tracks who may create research bounties: each researcher identity moves
//! through a closed trust lifecycle (Pending → EmailVerified →
//! FullyVerified, with Suspended/Revoked side exits) and carries a
//! reputation score. The marketplace operator consults
//! [`ResearcherVerificationRegistry::is_verified_researcher`] as a policy
//! gate before admitting bounty creators; the marketplace itself never calls
//! into this registry on its transaction path.

pub mod error;
pub mod registry;
pub mod researcher;

pub use error::VerifyError;
pub use registry::ResearcherVerificationRegistry;
pub use researcher::{Researcher, ResearcherProfile, ResearcherStatus, VerificationRequest};
