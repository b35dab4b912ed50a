//! Researcher records and the verification trust lifecycle.

use helix_types::{RequestId, Timestamp, WalletAddress};
use serde::{Deserialize, Serialize};

/// Position in the researcher trust lifecycle.
///
/// Forward path: `Pending → EmailVerified → FullyVerified`. Administrators
/// may force any registered identity to `Suspended` or `Revoked`; the only
/// reverse edge is `Suspended → FullyVerified` via reactivation. An identity
/// with no record at all is "not registered": absence, not a variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResearcherStatus {
    /// Registered, nothing verified yet.
    Pending,
    /// Contact email confirmed.
    EmailVerified,
    /// Institution and credentials confirmed.
    FullyVerified,
    /// Temporarily barred by an administrator; may be reactivated.
    Suspended,
    /// Permanently barred. Terminal.
    Revoked,
}

impl ResearcherStatus {
    /// Whether a researcher in this status may submit verification documents.
    pub fn can_submit_documents(&self) -> bool {
        matches!(self, Self::Pending | Self::EmailVerified)
    }

    /// Whether this status may be the target of a `verify` call.
    /// `Pending` is only ever reached by registration.
    pub fn is_assignable(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// The next status on the forward verification path, if any.
    pub fn next_step(&self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::EmailVerified),
            Self::EmailVerified => Some(Self::FullyVerified),
            _ => None,
        }
    }
}

/// Identity-independent profile data supplied at registration.
#[derive(Clone, Debug)]
pub struct ResearcherProfile {
    pub name: String,
    pub institution: String,
    pub email: String,
    /// Research discipline, e.g. "population genetics".
    pub field: String,
    /// Optional ORCID identifier.
    pub orcid_id: String,
    /// Optional institutional review board protocol number.
    pub irb_number: String,
}

/// A registered researcher.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Researcher {
    pub identity: WalletAddress,
    pub name: String,
    pub institution: String,
    /// Globally unique across all researchers; enforced at registration.
    pub email: String,
    pub orcid_id: String,
    pub field: String,
    pub irb_number: String,
    pub status: ResearcherStatus,
    pub registered_at: Timestamp,
    /// Set the first time the researcher reaches `FullyVerified`.
    pub verified_at: Option<Timestamp>,
    /// 0-100, default 50.
    pub reputation_score: u8,
    pub total_bounties: u64,
    pub successful_bounties: u64,
    pub active: bool,
}

/// A submitted request for verification review.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub id: RequestId,
    pub researcher: WalletAddress,
    /// Opaque locator for the supporting documents (off-chain).
    pub documents_ref: String,
    pub notes: String,
    pub submitted_at: Timestamp,
    /// Flips false → true exactly once.
    pub processed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_path_steps() {
        assert_eq!(
            ResearcherStatus::Pending.next_step(),
            Some(ResearcherStatus::EmailVerified)
        );
        assert_eq!(
            ResearcherStatus::EmailVerified.next_step(),
            Some(ResearcherStatus::FullyVerified)
        );
        assert_eq!(ResearcherStatus::FullyVerified.next_step(), None);
        assert_eq!(ResearcherStatus::Suspended.next_step(), None);
        assert_eq!(ResearcherStatus::Revoked.next_step(), None);
    }

    #[test]
    fn document_submission_gating() {
        assert!(ResearcherStatus::Pending.can_submit_documents());
        assert!(ResearcherStatus::EmailVerified.can_submit_documents());
        assert!(!ResearcherStatus::FullyVerified.can_submit_documents());
        assert!(!ResearcherStatus::Suspended.can_submit_documents());
        assert!(!ResearcherStatus::Revoked.can_submit_documents());
    }

    #[test]
    fn pending_is_not_assignable() {
        assert!(!ResearcherStatus::Pending.is_assignable());
        assert!(ResearcherStatus::EmailVerified.is_assignable());
        assert!(ResearcherStatus::Revoked.is_assignable());
    }
}
