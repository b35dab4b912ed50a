use crate::StoreError;
use helix_types::{RequestId, WalletAddress};

/// Store trait for persisting researcher-verification state.
///
/// Uses opaque `Vec<u8>` values; the verification registry serializes its
/// own researcher and request records.
pub trait ResearcherStore {
    fn get_researcher(&self, identity: &WalletAddress) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_researcher(&self, identity: &WalletAddress, bytes: &[u8]) -> Result<(), StoreError>;
    fn iter_researchers(&self) -> Result<Vec<(WalletAddress, Vec<u8>)>, StoreError>;

    fn get_request(&self, id: RequestId) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_request(&self, id: RequestId, bytes: &[u8]) -> Result<(), StoreError>;
    fn iter_requests(&self) -> Result<Vec<(RequestId, Vec<u8>)>, StoreError>;

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;
}
