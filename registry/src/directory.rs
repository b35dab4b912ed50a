//! Narrow read-only capability surface consumed by the marketplace.

use crate::error::RegistryError;
use crate::registry::GenomeAccessRegistry;
use crate::token::DataToken;
use helix_types::{TokenId, WalletAddress};

/// The two reads the marketplace is allowed to make against the registry.
///
/// Implementations must be read-only: the marketplace performs these calls
/// before mutating any of its own state, so a misbehaving implementation
/// that re-enters the marketplace can never observe a half-applied
/// operation.
pub trait GenomeDirectory {
    /// Current owner of a token. Fails for tokens that were never minted.
    fn owner_of(&self, token: TokenId) -> Result<WalletAddress, RegistryError>;

    /// Full metadata for a token. Fails for tokens that were never minted.
    fn metadata(&self, token: TokenId) -> Result<DataToken, RegistryError>;
}

impl GenomeDirectory for GenomeAccessRegistry {
    fn owner_of(&self, token: TokenId) -> Result<WalletAddress, RegistryError> {
        Ok(self.metadata(token)?.owner.clone())
    }

    fn metadata(&self, token: TokenId) -> Result<DataToken, RegistryError> {
        GenomeAccessRegistry::metadata(self, token).cloned()
    }
}
