//! Funds-transfer collaborator interface.
//!
//! The chain environment that hosts the engines owns all account balances.
//! Engines move value only through this trait: mint-fee refunds, bounty
//! reward payouts, cancellation/expiry refunds, and treasury withdrawals.
//!
//! Credits are always the *last* effect of a mutating operation. A failed
//! credit surfaces as an error, but the operation's other state changes are
//! already final and are not revisited.

use crate::address::WalletAddress;
use thiserror::Error;

/// Errors surfaced by the external funds-transfer primitive.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("account {0} rejected the credit")]
    Rejected(String),

    #[error("transfer backend unavailable: {0}")]
    Unavailable(String),
}

/// Credit-side of the external account ledger.
///
/// Debits never appear here: incoming funds (`fee_paid`, `funds_provided`)
/// arrive already collected by the execution environment and attached to the
/// call, mirroring value transfer in the hosting chain.
pub trait FundsTransfer {
    /// Credit `amount` raw units to `account`.
    fn credit(&mut self, account: &WalletAddress, amount: u128) -> Result<(), TransferError>;
}
