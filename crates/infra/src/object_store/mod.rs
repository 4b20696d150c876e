//! Owner-scoped blob storage boundary.
//!
//! Stands where the managed object storage service stood: file upload by
//! path, retrieval by URL.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryObjectStore;
pub use r#trait::{ObjectStore, ObjectStoreError, StoredObject};
