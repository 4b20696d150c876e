//! `shopledger-infra` — storage boundary and its in-memory implementations.
//!
//! Everything the managed backend used to do lives behind traits here:
//! document persistence (`DocumentStore`), blob storage (`ObjectStore`),
//! typed access (`Repository`), the shared read-through list cache
//! (`CollectionCache`), and the revision-checked stock ledger
//! (`StockLedger`).

pub mod cache;
pub mod document_store;
pub mod models;
pub mod object_store;
pub mod repository;
pub mod stock;

pub use cache::CollectionCache;
pub use document_store::{
    DocumentStore, InMemoryDocumentStore, StoreError, StoredDocument,
};
pub use models::profile_document_id;
pub use object_store::{InMemoryObjectStore, ObjectStore, ObjectStoreError, StoredObject};
pub use repository::{DocumentModel, Repository};
pub use stock::{StockError, StockLedger};
