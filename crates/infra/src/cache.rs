use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use shopledger_core::OwnerId;

use crate::document_store::StoredDocument;

#[derive(Debug, Default)]
struct Slot {
    /// Bumped on every invalidation; a write-back whose snapshot predates
    /// the current epoch is discarded.
    epoch: u64,
    listing: Option<Arc<Vec<StoredDocument>>>,
}

/// Read-through listing cache keyed by owner and collection.
///
/// Listings are the hot path for every screen, so a full collection scan is
/// cached per `(owner, collection)` pair and dropped whenever any write
/// touches that pair. Entries are shared as `Arc` slices so concurrent
/// readers never copy the documents.
///
/// Population is epoch-guarded: a reader captures the pair's epoch before
/// taking its store snapshot, and `put` refuses the write-back when the
/// epoch has moved — a writer that committed and invalidated in between
/// would otherwise have its invalidation erased by the stale snapshot.
#[derive(Debug, Default)]
pub struct CollectionCache {
    entries: RwLock<HashMap<(OwnerId, String), Slot>>,
}

impl CollectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current epoch of one owner/collection pair. Capture this before the
    /// store read that feeds `put`.
    pub fn epoch(&self, owner_id: OwnerId, collection: &str) -> u64 {
        let Ok(entries) = self.entries.read() else {
            return 0;
        };
        entries
            .get(&(owner_id, collection.to_string()))
            .map(|slot| slot.epoch)
            .unwrap_or(0)
    }

    pub fn get(&self, owner_id: OwnerId, collection: &str) -> Option<Arc<Vec<StoredDocument>>> {
        let entries = self.entries.read().ok()?;
        entries
            .get(&(owner_id, collection.to_string()))
            .and_then(|slot| slot.listing.clone())
    }

    /// Store a listing taken at `epoch`. A no-op when the pair was
    /// invalidated after the epoch was captured, so a stale snapshot can
    /// never bury a newer write.
    pub fn put(
        &self,
        owner_id: OwnerId,
        collection: &str,
        epoch: u64,
        documents: Vec<StoredDocument>,
    ) {
        if let Ok(mut entries) = self.entries.write() {
            let slot = entries
                .entry((owner_id, collection.to_string()))
                .or_default();
            if slot.epoch == epoch {
                slot.listing = Some(Arc::new(documents));
            }
        }
    }

    /// Drops the cached listing for one owner and collection and advances
    /// its epoch. Called after every insert, update, and delete that
    /// touches the pair.
    pub fn invalidate(&self, owner_id: OwnerId, collection: &str) {
        if let Ok(mut entries) = self.entries.write() {
            let slot = entries
                .entry((owner_id, collection.to_string()))
                .or_default();
            slot.epoch += 1;
            slot.listing = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shopledger_core::{DocumentId, Revision};

    fn doc(owner_id: OwnerId, collection: &str) -> StoredDocument {
        let now = Utc::now();
        StoredDocument {
            id: DocumentId::new(),
            owner_id,
            collection: collection.to_string(),
            revision: Revision::FIRST,
            payload: serde_json::json!({"name": "x"}),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn put_then_get_returns_the_same_listing() {
        let cache = CollectionCache::new();
        let owner = OwnerId::new();
        let epoch = cache.epoch(owner, "products");
        cache.put(owner, "products", epoch, vec![doc(owner, "products")]);

        let hit = cache.get(owner, "products").unwrap();
        assert_eq!(hit.len(), 1);
    }

    #[test]
    fn invalidate_drops_only_the_touched_pair() {
        let cache = CollectionCache::new();
        let owner = OwnerId::new();
        cache.put(owner, "products", 0, vec![doc(owner, "products")]);
        cache.put(owner, "invoices", 0, vec![doc(owner, "invoices")]);

        cache.invalidate(owner, "products");

        assert!(cache.get(owner, "products").is_none());
        assert!(cache.get(owner, "invoices").is_some());
    }

    #[test]
    fn owners_do_not_share_entries() {
        let cache = CollectionCache::new();
        let first = OwnerId::new();
        let second = OwnerId::new();
        cache.put(first, "products", 0, vec![doc(first, "products")]);

        assert!(cache.get(second, "products").is_none());
    }

    #[test]
    fn put_is_discarded_when_the_epoch_moved() {
        let cache = CollectionCache::new();
        let owner = OwnerId::new();

        // A reader captures the epoch, then a writer invalidates before the
        // reader stores its snapshot: the snapshot must be dropped.
        let epoch = cache.epoch(owner, "products");
        cache.invalidate(owner, "products");
        cache.put(owner, "products", epoch, vec![doc(owner, "products")]);

        assert!(cache.get(owner, "products").is_none());

        // A snapshot taken at the new epoch lands normally.
        let fresh = cache.epoch(owner, "products");
        cache.put(owner, "products", fresh, vec![doc(owner, "products")]);
        assert!(cache.get(owner, "products").is_some());
    }

    #[test]
    fn invalidate_moves_the_epoch_even_before_first_put() {
        let cache = CollectionCache::new();
        let owner = OwnerId::new();

        assert_eq!(cache.epoch(owner, "products"), 0);
        cache.invalidate(owner, "products");
        assert_eq!(cache.epoch(owner, "products"), 1);
    }
}
