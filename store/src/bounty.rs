use crate::StoreError;
use helix_types::{BountyId, ResponseId};

/// Store trait for persisting marketplace state.
///
/// Uses opaque `Vec<u8>` values; the market serializes its own bounty and
/// response records.
pub trait BountyStore {
    fn get_bounty(&self, id: BountyId) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_bounty(&self, id: BountyId, bytes: &[u8]) -> Result<(), StoreError>;
    fn iter_bounties(&self) -> Result<Vec<(BountyId, Vec<u8>)>, StoreError>;

    fn get_response(&self, id: ResponseId) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_response(&self, id: ResponseId, bytes: &[u8]) -> Result<(), StoreError>;
    fn iter_responses(&self) -> Result<Vec<(ResponseId, Vec<u8>)>, StoreError>;

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;
}
