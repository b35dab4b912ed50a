//! Wallet address type with `hlx_` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Helix wallet address, always prefixed with `hlx_`.
///
/// The address identifies every actor in the system: token owners, access
/// delegates, researchers, and administrators. Derivation from key material
/// happens in the surrounding execution environment; the core treats
/// addresses as opaque, already-authenticated identities.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// The standard prefix for all Helix wallet addresses.
    pub const PREFIX: &'static str = "hlx_";

    /// Create a new wallet address from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `hlx_`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "address must start with hlx_");
        Self(s)
    }

    /// Parse an address, returning `None` if it is not well-formed.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.starts_with(Self::PREFIX) && raw.len() > Self::PREFIX.len() {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this address is well-formed.
    pub fn is_valid(&self) -> bool {
        self.0.starts_with(Self::PREFIX) && self.0.len() > Self::PREFIX.len()
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_address_roundtrip() {
        let addr = WalletAddress::new("hlx_owner1");
        assert!(addr.is_valid());
        assert_eq!(addr.as_str(), "hlx_owner1");
        assert_eq!(addr.to_string(), "hlx_owner1");
    }

    #[test]
    #[should_panic(expected = "must start with hlx_")]
    fn bad_prefix_panics() {
        WalletAddress::new("0x1234");
    }

    #[test]
    fn parse_rejects_bare_prefix() {
        assert!(WalletAddress::parse("hlx_").is_none());
        assert!(WalletAddress::parse("0x1234abcd").is_none());
        assert!(WalletAddress::parse("hlx_abc").is_some());
    }
}
