use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

use shopledger_core::{DocumentId, ExpectedRevision, OwnerId, Revision};

use super::r#trait::{DocumentStore, StoreError, StoredDocument};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DocumentKey {
    owner_id: OwnerId,
    collection: String,
    id: DocumentId,
}

/// In-memory owner-scoped document store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<DocumentKey, StoredDocument>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(owner_id: OwnerId, collection: &str, id: DocumentId) -> DocumentKey {
        DocumentKey {
            owner_id,
            collection: collection.to_string(),
            id,
        }
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn insert(
        &self,
        owner_id: OwnerId,
        collection: &str,
        id: DocumentId,
        payload: JsonValue,
        now: DateTime<Utc>,
    ) -> Result<StoredDocument, StoreError> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        let key = Self::key(owner_id, collection, id);
        if documents.contains_key(&key) {
            return Err(StoreError::AlreadyExists(id));
        }

        let stored = StoredDocument {
            id,
            owner_id,
            collection: collection.to_string(),
            revision: Revision::FIRST,
            payload,
            created_at: now,
            updated_at: now,
        };
        documents.insert(key, stored.clone());
        Ok(stored)
    }

    fn get(
        &self,
        owner_id: OwnerId,
        collection: &str,
        id: DocumentId,
    ) -> Result<Option<StoredDocument>, StoreError> {
        let documents = self
            .documents
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        Ok(documents.get(&Self::key(owner_id, collection, id)).cloned())
    }

    fn list(&self, owner_id: OwnerId, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        let documents = self
            .documents
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        let mut items: Vec<StoredDocument> = documents
            .iter()
            .filter_map(|(k, v)| {
                (k.owner_id == owner_id && k.collection == collection).then(|| v.clone())
            })
            .collect();

        // UUIDv7 ids are time-ordered, so this is creation order.
        items.sort_by_key(|d| d.id);
        Ok(items)
    }

    fn update(
        &self,
        owner_id: OwnerId,
        collection: &str,
        id: DocumentId,
        expected: ExpectedRevision,
        payload: JsonValue,
        now: DateTime<Utc>,
    ) -> Result<StoredDocument, StoreError> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        let key = Self::key(owner_id, collection, id);
        let stored = documents.get_mut(&key).ok_or(StoreError::NotFound)?;

        if !expected.matches(stored.revision) {
            return Err(StoreError::RevisionConflict(format!(
                "expected {expected:?}, found {}",
                stored.revision
            )));
        }

        stored.revision = stored.revision.next();
        stored.payload = payload;
        stored.updated_at = now;
        Ok(stored.clone())
    }

    fn delete(
        &self,
        owner_id: OwnerId,
        collection: &str,
        id: DocumentId,
    ) -> Result<bool, StoreError> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        Ok(documents.remove(&Self::key(owner_id, collection, id)).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> InMemoryDocumentStore {
        InMemoryDocumentStore::new()
    }

    #[test]
    fn insert_then_get_round_trips() {
        let s = store();
        let owner = OwnerId::new();
        let id = DocumentId::new();

        let stored = s
            .insert(owner, "products", id, json!({"name": "Widget"}), Utc::now())
            .unwrap();
        assert_eq!(stored.revision, Revision::FIRST);

        let got = s.get(owner, "products", id).unwrap().unwrap();
        assert_eq!(got.payload["name"], "Widget");
    }

    #[test]
    fn insert_rejects_duplicate_id() {
        let s = store();
        let owner = OwnerId::new();
        let id = DocumentId::new();

        s.insert(owner, "products", id, json!({}), Utc::now()).unwrap();
        let err = s.insert(owner, "products", id, json!({}), Utc::now()).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));
    }

    #[test]
    fn update_bumps_revision() {
        let s = store();
        let owner = OwnerId::new();
        let id = DocumentId::new();
        s.insert(owner, "products", id, json!({"q": 5}), Utc::now()).unwrap();

        let updated = s
            .update(
                owner,
                "products",
                id,
                ExpectedRevision::Exact(Revision::FIRST),
                json!({"q": 8}),
                Utc::now(),
            )
            .unwrap();
        assert_eq!(updated.revision, Revision::new(2));
        assert_eq!(updated.payload["q"], 8);
    }

    #[test]
    fn update_rejects_stale_revision() {
        let s = store();
        let owner = OwnerId::new();
        let id = DocumentId::new();
        s.insert(owner, "products", id, json!({"q": 5}), Utc::now()).unwrap();
        s.update(owner, "products", id, ExpectedRevision::Any, json!({"q": 4}), Utc::now())
            .unwrap();

        let err = s
            .update(
                owner,
                "products",
                id,
                ExpectedRevision::Exact(Revision::FIRST),
                json!({"q": 3}),
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::RevisionConflict(_)));
    }

    #[test]
    fn update_missing_document_is_not_found() {
        let s = store();
        let err = s
            .update(
                OwnerId::new(),
                "products",
                DocumentId::new(),
                ExpectedRevision::Any,
                json!({}),
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[test]
    fn delete_reports_whether_anything_was_removed() {
        let s = store();
        let owner = OwnerId::new();
        let id = DocumentId::new();
        s.insert(owner, "invoices", id, json!({}), Utc::now()).unwrap();

        assert!(s.delete(owner, "invoices", id).unwrap());
        assert!(!s.delete(owner, "invoices", id).unwrap());
        assert!(s.get(owner, "invoices", id).unwrap().is_none());
    }

    #[test]
    fn list_is_scoped_to_owner_and_collection() {
        let s = store();
        let owner_a = OwnerId::new();
        let owner_b = OwnerId::new();

        s.insert(owner_a, "products", DocumentId::new(), json!({"n": 1}), Utc::now())
            .unwrap();
        s.insert(owner_a, "invoices", DocumentId::new(), json!({"n": 2}), Utc::now())
            .unwrap();
        s.insert(owner_b, "products", DocumentId::new(), json!({"n": 3}), Utc::now())
            .unwrap();

        assert_eq!(s.list(owner_a, "products").unwrap().len(), 1);
        assert_eq!(s.list(owner_a, "invoices").unwrap().len(), 1);
        assert_eq!(s.list(owner_b, "products").unwrap().len(), 1);
        assert!(s.list(owner_b, "invoices").unwrap().is_empty());
    }

    #[test]
    fn list_returns_documents_in_creation_order() {
        let s = store();
        let owner = OwnerId::new();
        let first = DocumentId::new();
        let second = DocumentId::new();

        s.insert(owner, "products", first, json!({"n": 1}), Utc::now()).unwrap();
        s.insert(owner, "products", second, json!({"n": 2}), Utc::now()).unwrap();

        let items = s.list(owner, "products").unwrap();
        assert_eq!(items[0].id, first);
        assert_eq!(items[1].id, second);
    }
}
