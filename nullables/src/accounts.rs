//! Nullable account ledger — in-memory funds transfer for testing.

use helix_types::{FundsTransfer, TransferError, WalletAddress};
use std::collections::HashMap;

/// An in-memory account ledger.
///
/// Tracks every credit the engines issue so tests can assert exact refund
/// and payout amounts. Failures can be injected per call to exercise the
/// transfer-failure paths.
pub struct NullAccounts {
    balances: HashMap<WalletAddress, u128>,
    fail_next: bool,
}

impl NullAccounts {
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
            fail_next: false,
        }
    }

    /// Make the next `credit` call fail with `TransferError::Rejected`.
    pub fn fail_next_credit(&mut self) {
        self.fail_next = true;
    }

    /// Current balance of an account (zero if never credited).
    pub fn balance(&self, account: &WalletAddress) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Sum of all balances held.
    pub fn total(&self) -> u128 {
        self.balances.values().sum()
    }
}

impl Default for NullAccounts {
    fn default() -> Self {
        Self::new()
    }
}

impl FundsTransfer for NullAccounts {
    fn credit(&mut self, account: &WalletAddress, amount: u128) -> Result<(), TransferError> {
        if self.fail_next {
            self.fail_next = false;
            return Err(TransferError::Rejected(account.to_string()));
        }
        *self.balances.entry(account.clone()).or_insert(0) += amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> WalletAddress {
        WalletAddress::new(format!("hlx_{s}"))
    }

    #[test]
    fn credits_accumulate() {
        let mut accounts = NullAccounts::new();
        accounts.credit(&addr("a"), 10).unwrap();
        accounts.credit(&addr("a"), 5).unwrap();
        accounts.credit(&addr("b"), 1).unwrap();
        assert_eq!(accounts.balance(&addr("a")), 15);
        assert_eq!(accounts.balance(&addr("b")), 1);
        assert_eq!(accounts.total(), 16);
    }

    #[test]
    fn injected_failure_fires_once() {
        let mut accounts = NullAccounts::new();
        accounts.fail_next_credit();
        assert!(accounts.credit(&addr("a"), 10).is_err());
        assert_eq!(accounts.balance(&addr("a")), 0);
        accounts.credit(&addr("a"), 10).unwrap();
        assert_eq!(accounts.balance(&addr("a")), 10);
    }
}
