use crate::StoreError;
use helix_types::{TokenId, WalletAddress};

/// Store trait for persisting access-registry state.
///
/// Values are opaque `Vec<u8>` so the store doesn't depend on the
/// `helix-registry` crate (which would create a circular dependency). The
/// registry serializes/deserializes its own record types.
pub trait GenomeStore {
    fn get_token(&self, id: TokenId) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_token(&self, id: TokenId, bytes: &[u8]) -> Result<(), StoreError>;
    fn iter_tokens(&self) -> Result<Vec<(TokenId, Vec<u8>)>, StoreError>;

    fn get_grant(
        &self,
        token: TokenId,
        delegate: &WalletAddress,
    ) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_grant(
        &self,
        token: TokenId,
        delegate: &WalletAddress,
        bytes: &[u8],
    ) -> Result<(), StoreError>;
    fn iter_grants(&self) -> Result<Vec<(TokenId, WalletAddress, Vec<u8>)>, StoreError>;

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;
}
