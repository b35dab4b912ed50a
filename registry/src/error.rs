use helix_store::StoreError;
use helix_types::{TokenId, TransferError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("insufficient mint fee: required {required}, provided {provided}")]
    InsufficientFee { required: u128, provided: u128 },

    #[error("content reference must not be empty")]
    InvalidReference,

    #[error("content hash must not be the zero value")]
    InvalidHash,

    #[error("token {0} not found")]
    NotFound(TokenId),

    #[error("token {0} has been deactivated")]
    Deactivated(TokenId),

    #[error("caller {caller} is not authorized for token {token}")]
    Unauthorized { token: TokenId, caller: String },

    #[error("delegate {0} is not on the trusted-delegate list")]
    UntrustedDelegate(String),

    #[error("grant duration {0}s is outside the allowed range")]
    InvalidDuration(u64),

    #[error("caller {0} is not the registry administrator")]
    NotAdmin(String),

    #[error("arithmetic overflow in treasury accounting")]
    Overflow,

    #[error("funds transfer failed: {0}")]
    Transfer(#[from] TransferError),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}
