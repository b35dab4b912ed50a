use helix_store::StoreError;
use helix_types::{BountyId, TokenId, TransferError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketError {
    #[error("query kind must not be empty")]
    EmptyQueryKind,

    #[error("query params must not be empty")]
    EmptyQueryParams,

    #[error("reward per response must be positive")]
    ZeroReward,

    #[error("max responses must be positive")]
    ZeroMaxResponses,

    #[error("bounty duration {0}s is outside the allowed range")]
    InvalidDuration(u64),

    #[error("insufficient funding: required {required}, provided {provided}")]
    InsufficientFunding { required: u128, provided: u128 },

    #[error("bounty {0} not found")]
    NotFound(BountyId),

    #[error("caller {0} is not the bounty creator")]
    NotCreator(String),

    #[error("bounty {0} is not active")]
    NotActive(BountyId),

    #[error("bounty {0} has expired")]
    Expired(BountyId),

    #[error("bounty {0} has reached its response cap")]
    Full(BountyId),

    #[error("token {token} has already responded to bounty {bounty}")]
    AlreadyResponded { bounty: BountyId, token: TokenId },

    #[error("caller {0} does not own the responding token")]
    NotTokenOwner(String),

    #[error("token {0} is deactivated")]
    GenomeInactive(TokenId),

    #[error("marketplace is paused")]
    Paused,

    #[error("platform fee {0} bps exceeds the cap")]
    FeeTooHigh(u32),

    #[error("caller {0} is not the marketplace administrator")]
    NotAdmin(String),

    #[error("arithmetic overflow in escrow computation")]
    Overflow,

    #[error("funds transfer failed: {0}")]
    Transfer(#[from] TransferError),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}
