use std::sync::Arc;
use thiserror::Error;

/// A stored blob plus its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub path: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Blob storage failure. A missing object is not an error here: `get`
/// returns `Ok(None)` and callers decide what absence means.
#[derive(Debug, Error)]
pub enum ObjectStoreError {
    #[error("upload failed: {0}")]
    Upload(String),

    #[error("storage backend failed: {0}")]
    Backend(String),
}

/// Blob storage by owner-prefixed path.
///
/// `put` returns the retrieval URL callers persist on their documents (the
/// invoice's `document_url`, the profile's `logo_url`).
pub trait ObjectStore: Send + Sync {
    fn put(
        &self,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ObjectStoreError>;

    fn get(&self, path: &str) -> Result<Option<StoredObject>, ObjectStoreError>;

    fn delete(&self, path: &str) -> Result<bool, ObjectStoreError>;

    /// Map a retrieval URL back to its storage path, if this store minted it.
    fn path_of_url<'a>(&self, url: &'a str) -> Option<&'a str>;
}

impl<S> ObjectStore for Arc<S>
where
    S: ObjectStore + ?Sized,
{
    fn put(
        &self,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ObjectStoreError> {
        (**self).put(path, content_type, bytes)
    }

    fn get(&self, path: &str) -> Result<Option<StoredObject>, ObjectStoreError> {
        (**self).get(path)
    }

    fn delete(&self, path: &str) -> Result<bool, ObjectStoreError> {
        (**self).delete(path)
    }

    fn path_of_url<'a>(&self, url: &'a str) -> Option<&'a str> {
        (**self).path_of_url(url)
    }
}
