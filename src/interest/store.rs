use crate::error::StorageResult;
use crate::interest::storage::KeyValueStorage;
use crate::models::Listing;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Storage key holding the serialized list of saved listings
pub const INTEREST_KEY: &str = "interestedProperties";

/// Result of adding a listing to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Duplicate,
}

/// Durable, deduplicated set of listings the user saved
pub struct InterestStore {
    storage: Arc<dyn KeyValueStorage>,
    listings: Vec<Listing>,
}

impl InterestStore {
    /// Load saved listings. A missing or unreadable payload starts an empty store.
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Self {
        let listings = match storage.get(INTEREST_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Listing>>(&raw) {
                Ok(listings) => dedup_by_id(listings),
                Err(e) => {
                    warn!("Discarding corrupt interest store payload: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Could not read interest store: {}", e);
                Vec::new()
            }
        };

        info!("Loaded {} saved listings", listings.len());
        Self { storage, listings }
    }

    pub fn add(&mut self, listing: Listing) -> StorageResult<AddOutcome> {
        if self.contains(listing.id) {
            debug!("Listing {} already saved", listing.id);
            return Ok(AddOutcome::Duplicate);
        }

        self.listings.push(listing);
        if let Err(e) = self.persist() {
            self.listings.pop();
            return Err(e);
        }
        Ok(AddOutcome::Added)
    }

    /// Remove a saved listing. Returns whether anything was removed.
    pub fn remove(&mut self, id: u32) -> StorageResult<bool> {
        let Some(pos) = self.listings.iter().position(|l| l.id == id) else {
            return Ok(false);
        };

        let removed = self.listings.remove(pos);
        if let Err(e) = self.persist() {
            self.listings.insert(pos, removed);
            return Err(e);
        }
        Ok(true)
    }

    /// Saved listings in insertion order
    pub fn list(&self) -> &[Listing] {
        &self.listings
    }

    pub fn contains(&self, id: u32) -> bool {
        self.listings.iter().any(|l| l.id == id)
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    fn persist(&self) -> StorageResult<()> {
        let json = serde_json::to_string(&self.listings)?;
        self.storage.set(INTEREST_KEY, &json)
    }
}

fn dedup_by_id(listings: Vec<Listing>) -> Vec<Listing> {
    let mut unique: Vec<Listing> = Vec::with_capacity(listings.len());
    for listing in listings {
        if !unique.iter().any(|l| l.id == listing.id) {
            unique.push(listing);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::interest::storage::MemoryStorage;
    use crate::sources::mock::mock_catalogue;

    struct FailingStorage;

    impl KeyValueStorage for FailingStorage {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(None)
        }
        fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Io(std::io::Error::other("disk full")))
        }
        fn remove(&self, _key: &str) -> StorageResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_add_is_idempotent() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = InterestStore::load(storage);
        let listing = mock_catalogue()[0].clone();

        assert_eq!(store.add(listing.clone()).unwrap(), AddOutcome::Added);
        assert_eq!(store.add(listing).unwrap(), AddOutcome::Duplicate);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let mut store = InterestStore::load(Arc::new(MemoryStorage::new()));
        let catalogue = mock_catalogue();
        store.add(catalogue[2].clone()).unwrap();
        store.add(catalogue[0].clone()).unwrap();

        let ids: Vec<u32> = store.list().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![catalogue[2].id, catalogue[0].id]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = InterestStore::load(Arc::new(MemoryStorage::new()));
        assert!(!store.remove(999).unwrap());
    }

    #[test]
    fn test_reload_restores_saved_listings() {
        let storage = Arc::new(MemoryStorage::new());
        let catalogue = mock_catalogue();
        {
            let mut store = InterestStore::load(storage.clone());
            store.add(catalogue[1].clone()).unwrap();
            store.add(catalogue[3].clone()).unwrap();
            store.remove(catalogue[1].id).unwrap();
        }

        let store = InterestStore::load(storage);
        assert_eq!(store.list(), &[catalogue[3].clone()]);
    }

    #[test]
    fn test_corrupt_payload_loads_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(INTEREST_KEY, "{not json").unwrap();
        let store = InterestStore::load(storage);
        assert!(store.is_empty());
    }

    #[test]
    fn test_failed_write_leaves_store_unchanged() {
        let mut store = InterestStore::load(Arc::new(FailingStorage));
        let result = store.add(mock_catalogue()[0].clone());
        assert!(result.is_err());
        assert!(store.is_empty());
    }
}
