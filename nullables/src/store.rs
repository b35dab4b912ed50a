//! Nullable store — thread-safe in-memory storage for testing.

use helix_store::{BountyStore, GenomeStore, ResearcherStore, StoreError};
use helix_types::{BountyId, RequestId, ResponseId, TokenId, WalletAddress};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// An in-memory backend implementing all three Helix store traits.
///
/// `BTreeMap` keeps iteration order deterministic across runs.
pub struct NullStore {
    tokens: Mutex<BTreeMap<TokenId, Vec<u8>>>,
    grants: Mutex<BTreeMap<(TokenId, String), (WalletAddress, Vec<u8>)>>,
    bounties: Mutex<BTreeMap<BountyId, Vec<u8>>>,
    responses: Mutex<BTreeMap<ResponseId, Vec<u8>>>,
    researchers: Mutex<BTreeMap<String, (WalletAddress, Vec<u8>)>>,
    requests: Mutex<BTreeMap<RequestId, Vec<u8>>>,
    meta: Mutex<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl NullStore {
    pub fn new() -> Self {
        Self {
            tokens: Mutex::new(BTreeMap::new()),
            grants: Mutex::new(BTreeMap::new()),
            bounties: Mutex::new(BTreeMap::new()),
            responses: Mutex::new(BTreeMap::new()),
            researchers: Mutex::new(BTreeMap::new()),
            requests: Mutex::new(BTreeMap::new()),
            meta: Mutex::new(BTreeMap::new()),
        }
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GenomeStore for NullStore {
    fn get_token(&self, id: TokenId) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.tokens.lock().unwrap().get(&id).cloned())
    }

    fn put_token(&self, id: TokenId, bytes: &[u8]) -> Result<(), StoreError> {
        self.tokens.lock().unwrap().insert(id, bytes.to_vec());
        Ok(())
    }

    fn iter_tokens(&self) -> Result<Vec<(TokenId, Vec<u8>)>, StoreError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .map(|(id, bytes)| (*id, bytes.clone()))
            .collect())
    }

    fn get_grant(
        &self,
        token: TokenId,
        delegate: &WalletAddress,
    ) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self
            .grants
            .lock()
            .unwrap()
            .get(&(token, delegate.to_string()))
            .map(|(_, bytes)| bytes.clone()))
    }

    fn put_grant(
        &self,
        token: TokenId,
        delegate: &WalletAddress,
        bytes: &[u8],
    ) -> Result<(), StoreError> {
        self.grants
            .lock()
            .unwrap()
            .insert((token, delegate.to_string()), (delegate.clone(), bytes.to_vec()));
        Ok(())
    }

    fn iter_grants(&self) -> Result<Vec<(TokenId, WalletAddress, Vec<u8>)>, StoreError> {
        Ok(self
            .grants
            .lock()
            .unwrap()
            .iter()
            .map(|((token, _), (delegate, bytes))| (*token, delegate.clone(), bytes.clone()))
            .collect())
    }

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.meta.lock().unwrap().get(key).cloned())
    }

    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.meta.lock().unwrap().insert(key.to_vec(), value.to_vec());
        Ok(())
    }
}

impl BountyStore for NullStore {
    fn get_bounty(&self, id: BountyId) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.bounties.lock().unwrap().get(&id).cloned())
    }

    fn put_bounty(&self, id: BountyId, bytes: &[u8]) -> Result<(), StoreError> {
        self.bounties.lock().unwrap().insert(id, bytes.to_vec());
        Ok(())
    }

    fn iter_bounties(&self) -> Result<Vec<(BountyId, Vec<u8>)>, StoreError> {
        Ok(self
            .bounties
            .lock()
            .unwrap()
            .iter()
            .map(|(id, bytes)| (*id, bytes.clone()))
            .collect())
    }

    fn get_response(&self, id: ResponseId) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.responses.lock().unwrap().get(&id).cloned())
    }

    fn put_response(&self, id: ResponseId, bytes: &[u8]) -> Result<(), StoreError> {
        self.responses.lock().unwrap().insert(id, bytes.to_vec());
        Ok(())
    }

    fn iter_responses(&self) -> Result<Vec<(ResponseId, Vec<u8>)>, StoreError> {
        Ok(self
            .responses
            .lock()
            .unwrap()
            .iter()
            .map(|(id, bytes)| (*id, bytes.clone()))
            .collect())
    }

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.meta.lock().unwrap().get(key).cloned())
    }

    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.meta.lock().unwrap().insert(key.to_vec(), value.to_vec());
        Ok(())
    }
}

impl ResearcherStore for NullStore {
    fn get_researcher(&self, identity: &WalletAddress) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self
            .researchers
            .lock()
            .unwrap()
            .get(identity.as_str())
            .map(|(_, bytes)| bytes.clone()))
    }

    fn put_researcher(&self, identity: &WalletAddress, bytes: &[u8]) -> Result<(), StoreError> {
        self.researchers
            .lock()
            .unwrap()
            .insert(identity.to_string(), (identity.clone(), bytes.to_vec()));
        Ok(())
    }

    fn iter_researchers(&self) -> Result<Vec<(WalletAddress, Vec<u8>)>, StoreError> {
        Ok(self
            .researchers
            .lock()
            .unwrap()
            .values()
            .map(|(identity, bytes)| (identity.clone(), bytes.clone()))
            .collect())
    }

    fn get_request(&self, id: RequestId) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.requests.lock().unwrap().get(&id).cloned())
    }

    fn put_request(&self, id: RequestId, bytes: &[u8]) -> Result<(), StoreError> {
        self.requests.lock().unwrap().insert(id, bytes.to_vec());
        Ok(())
    }

    fn iter_requests(&self) -> Result<Vec<(RequestId, Vec<u8>)>, StoreError> {
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .map(|(id, bytes)| (*id, bytes.clone()))
            .collect())
    }

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.meta.lock().unwrap().get(key).cloned())
    }

    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.meta.lock().unwrap().insert(key.to_vec(), value.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_roundtrip() {
        let store = NullStore::new();
        GenomeStore::put_meta(&store, b"k", b"v").unwrap();
        assert_eq!(GenomeStore::get_meta(&store, b"k").unwrap(), Some(b"v".to_vec()));

        store.put_token(3, b"token-bytes").unwrap();
        assert_eq!(store.get_token(3).unwrap(), Some(b"token-bytes".to_vec()));
        assert_eq!(store.get_token(4).unwrap(), None);
        assert_eq!(store.iter_tokens().unwrap().len(), 1);
    }

    #[test]
    fn grants_keyed_by_token_and_delegate() {
        let store = NullStore::new();
        let agent = WalletAddress::new("hlx_agent");
        let other = WalletAddress::new("hlx_other");
        store.put_grant(1, &agent, b"g1").unwrap();
        store.put_grant(1, &other, b"g2").unwrap();
        store.put_grant(2, &agent, b"g3").unwrap();

        assert_eq!(store.get_grant(1, &agent).unwrap(), Some(b"g1".to_vec()));
        assert_eq!(store.get_grant(2, &other).unwrap(), None);
        assert_eq!(store.iter_grants().unwrap().len(), 3);
    }

    #[test]
    fn meta_is_shared_per_store_instance() {
        // The three trait views share one meta namespace, which is fine:
        // each engine uses its own store instance in practice.
        let store = NullStore::new();
        BountyStore::put_meta(&store, b"admin", b"hlx_a").unwrap();
        assert_eq!(
            ResearcherStore::get_meta(&store, b"admin").unwrap(),
            Some(b"hlx_a".to_vec())
        );
    }
}
