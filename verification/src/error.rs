use helix_store::StoreError;
use helix_types::RequestId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("identity {0} is already registered")]
    AlreadyRegistered(String),

    #[error("email {0} is already in use by another researcher")]
    EmailTaken(String),

    #[error("required field `{0}` is empty")]
    MissingField(&'static str),

    #[error("identity {0} is not registered")]
    NotRegistered(String),

    #[error("operation not allowed in status {status:?}")]
    InvalidStatus { status: crate::researcher::ResearcherStatus },

    #[error("caller {0} is not authorized")]
    NotAuthorized(String),

    #[error("researcher {0} is not suspended")]
    NotSuspended(String),

    #[error("verification request {0} not found")]
    RequestNotFound(RequestId),

    #[error("verification request {0} was already processed")]
    AlreadyProcessed(RequestId),

    #[error("reputation score {0} is out of range (0-100)")]
    ScoreOutOfRange(u8),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}
