use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use thiserror::Error;

use shopledger_core::{DocumentId, ExpectedRevision, OwnerId, Revision};

/// A document as held by the store.
///
/// The payload is opaque JSON; typed access lives in `Repository`. The
/// revision is assigned by the store: 1 on insert, +1 per successful update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: DocumentId,
    pub owner_id: OwnerId,
    pub collection: String,
    pub revision: Revision,
    pub payload: JsonValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Document store operation error.
///
/// These are **infrastructure** failures (storage, concurrency) as opposed
/// to domain errors (validation, invariants). Owner isolation has no error
/// variant on purpose: the owner id is part of every store key, so a
/// cross-owner access is unrepresentable rather than detectable.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found")]
    NotFound,

    #[error("document already exists: {0}")]
    AlreadyExists(DocumentId),

    #[error("optimistic concurrency check failed: {0}")]
    RevisionConflict(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("storage backend failed: {0}")]
    Backend(String),
}

/// Owner-scoped document store.
///
/// Documents live under (owner id, collection name, document id); the owner
/// id is part of every key, so cross-owner reads are unrepresentable at this
/// boundary. Updates carry an `ExpectedRevision` so callers can get
/// compare-and-swap semantics where they need them and last-writer-wins
/// where they don't.
///
/// Implementations must:
/// - enforce owner isolation on every operation
/// - assign revisions monotonically (1 on insert, +1 per update)
/// - reject updates whose expected revision does not match the stored one
pub trait DocumentStore: Send + Sync {
    /// Insert a new document. Fails if the id already exists in the
    /// collection.
    fn insert(
        &self,
        owner_id: OwnerId,
        collection: &str,
        id: DocumentId,
        payload: JsonValue,
        now: DateTime<Utc>,
    ) -> Result<StoredDocument, StoreError>;

    /// Fetch a single document.
    fn get(
        &self,
        owner_id: OwnerId,
        collection: &str,
        id: DocumentId,
    ) -> Result<Option<StoredDocument>, StoreError>;

    /// List all documents in an owner's collection, ordered by id
    /// (UUIDv7 ids make this creation order).
    fn list(&self, owner_id: OwnerId, collection: &str) -> Result<Vec<StoredDocument>, StoreError>;

    /// Replace a document's payload, subject to the revision expectation.
    fn update(
        &self,
        owner_id: OwnerId,
        collection: &str,
        id: DocumentId,
        expected: ExpectedRevision,
        payload: JsonValue,
        now: DateTime<Utc>,
    ) -> Result<StoredDocument, StoreError>;

    /// Delete a document. Returns whether a document was removed.
    fn delete(
        &self,
        owner_id: OwnerId,
        collection: &str,
        id: DocumentId,
    ) -> Result<bool, StoreError>;
}

impl<S> DocumentStore for Arc<S>
where
    S: DocumentStore + ?Sized,
{
    fn insert(
        &self,
        owner_id: OwnerId,
        collection: &str,
        id: DocumentId,
        payload: JsonValue,
        now: DateTime<Utc>,
    ) -> Result<StoredDocument, StoreError> {
        (**self).insert(owner_id, collection, id, payload, now)
    }

    fn get(
        &self,
        owner_id: OwnerId,
        collection: &str,
        id: DocumentId,
    ) -> Result<Option<StoredDocument>, StoreError> {
        (**self).get(owner_id, collection, id)
    }

    fn list(&self, owner_id: OwnerId, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        (**self).list(owner_id, collection)
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
        (**self).update(owner_id, collection, id, expected, payload, now)
    }

    fn delete(
        &self,
        owner_id: OwnerId,
        collection: &str,
        id: DocumentId,
    ) -> Result<bool, StoreError> {
        (**self).delete(owner_id, collection, id)
    }
}
