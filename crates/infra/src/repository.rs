use std::marker::PhantomData;
use std::sync::Arc;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

use shopledger_core::{DocumentId, ExpectedRevision, OwnerId, Revision};

use crate::cache::CollectionCache;
use crate::document_store::{DocumentStore, StoreError, StoredDocument};

/// A domain type that lives as a document in one named collection.
pub trait DocumentModel: Serialize + DeserializeOwned {
    const COLLECTION: &'static str;

    fn document_id(&self) -> DocumentId;
}

/// Typed facade over the document store for one model.
///
/// Every mutation invalidates the owner's cached listing for the model's
/// collection; `list` reads through the cache and repopulates it on a miss.
pub struct Repository<T> {
    store: Arc<dyn DocumentStore>,
    cache: Arc<CollectionCache>,
    _model: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            cache: Arc::clone(&self.cache),
            _model: PhantomData,
        }
    }
}

impl<T: DocumentModel> Repository<T> {
    pub fn new(store: Arc<dyn DocumentStore>, cache: Arc<CollectionCache>) -> Self {
        Self {
            store,
            cache,
            _model: PhantomData,
        }
    }

    pub fn insert(&self, owner_id: OwnerId, model: &T) -> Result<Revision, StoreError> {
        let payload = encode(model)?;
        let stored = self.store.insert(
            owner_id,
            T::COLLECTION,
            model.document_id(),
            payload,
            Utc::now(),
        )?;
        self.cache.invalidate(owner_id, T::COLLECTION);
        Ok(stored.revision)
    }

    pub fn get(&self, owner_id: OwnerId, id: DocumentId) -> Result<Option<(T, Revision)>, StoreError> {
        match self.store.get(owner_id, T::COLLECTION, id)? {
            Some(stored) => Ok(Some(decode(&stored)?)),
            None => Ok(None),
        }
    }

    pub fn list(&self, owner_id: OwnerId) -> Result<Vec<(T, Revision)>, StoreError> {
        let documents = match self.cache.get(owner_id, T::COLLECTION) {
            Some(cached) => cached,
            None => {
                // Capture the epoch before the snapshot so a write that
                // commits in between voids this write-back.
                let epoch = self.cache.epoch(owner_id, T::COLLECTION);
                let fresh = self.store.list(owner_id, T::COLLECTION)?;
                self.cache.put(owner_id, T::COLLECTION, epoch, fresh.clone());
                Arc::new(fresh)
            }
        };

        documents.iter().map(decode).collect()
    }

    pub fn update(
        &self,
        owner_id: OwnerId,
        model: &T,
        expected: ExpectedRevision,
    ) -> Result<Revision, StoreError> {
        let payload = encode(model)?;
        let stored = self.store.update(
            owner_id,
            T::COLLECTION,
            model.document_id(),
            expected,
            payload,
            Utc::now(),
        )?;
        self.cache.invalidate(owner_id, T::COLLECTION);
        Ok(stored.revision)
    }

    pub fn delete(&self, owner_id: OwnerId, id: DocumentId) -> Result<bool, StoreError> {
        let removed = self.store.delete(owner_id, T::COLLECTION, id)?;
        if removed {
            self.cache.invalidate(owner_id, T::COLLECTION);
        }
        Ok(removed)
    }
}

fn encode<T: Serialize>(model: &T) -> Result<JsonValue, StoreError> {
    serde_json::to_value(model).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn decode<T: DeserializeOwned>(stored: &StoredDocument) -> Result<(T, Revision), StoreError> {
    let model = serde_json::from_value(stored.payload.clone())
        .map_err(|e| StoreError::Serialization(e.to_string()))?;
    Ok((model, stored.revision))
}
