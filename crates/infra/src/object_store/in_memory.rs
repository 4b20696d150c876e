use std::collections::HashMap;
use std::sync::RwLock;

use super::r#trait::{ObjectStore, ObjectStoreError, StoredObject};

const URL_SCHEME: &str = "memory://";

/// In-memory blob store minting `memory://` retrieval URLs.
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn put(
        &self,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ObjectStoreError> {
        if path.is_empty() {
            return Err(ObjectStoreError::Upload("path cannot be empty".to_string()));
        }

        let mut objects = self
            .objects
            .write()
            .map_err(|_| ObjectStoreError::Backend("lock poisoned".to_string()))?;

        objects.insert(
            path.to_string(),
            StoredObject {
                path: path.to_string(),
                content_type: content_type.to_string(),
                bytes,
            },
        );

        Ok(format!("{URL_SCHEME}{path}"))
    }

    fn get(&self, path: &str) -> Result<Option<StoredObject>, ObjectStoreError> {
        let objects = self
            .objects
            .read()
            .map_err(|_| ObjectStoreError::Backend("lock poisoned".to_string()))?;
        Ok(objects.get(path).cloned())
    }

    fn delete(&self, path: &str) -> Result<bool, ObjectStoreError> {
        let mut objects = self
            .objects
            .write()
            .map_err(|_| ObjectStoreError::Backend("lock poisoned".to_string()))?;
        Ok(objects.remove(path).is_some())
    }

    fn path_of_url<'a>(&self, url: &'a str) -> Option<&'a str> {
        url.strip_prefix(URL_SCHEME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_returns_a_memory_url_get_resolves_it() {
        let s = InMemoryObjectStore::new();
        let url = s
            .put("owner-1/invoices/abc.html", "text/html", b"<html></html>".to_vec())
            .unwrap();
        assert_eq!(url, "memory://owner-1/invoices/abc.html");

        let path = s.path_of_url(&url).unwrap();
        let obj = s.get(path).unwrap().unwrap();
        assert_eq!(obj.content_type, "text/html");
        assert_eq!(obj.bytes, b"<html></html>");
    }

    #[test]
    fn put_overwrites_existing_path() {
        let s = InMemoryObjectStore::new();
        s.put("p/logo.png", "image/png", vec![1]).unwrap();
        s.put("p/logo.png", "image/png", vec![2]).unwrap();
        assert_eq!(s.get("p/logo.png").unwrap().unwrap().bytes, vec![2]);
    }

    #[test]
    fn empty_path_is_rejected() {
        let s = InMemoryObjectStore::new();
        assert!(matches!(
            s.put("", "text/html", vec![]).unwrap_err(),
            ObjectStoreError::Upload(_)
        ));
    }

    #[test]
    fn delete_and_missing_lookups() {
        let s = InMemoryObjectStore::new();
        s.put("p/a", "text/plain", vec![0]).unwrap();
        assert!(s.delete("p/a").unwrap());
        assert!(!s.delete("p/a").unwrap());
        assert!(s.get("p/a").unwrap().is_none());
    }

    #[test]
    fn foreign_urls_do_not_resolve() {
        let s = InMemoryObjectStore::new();
        assert!(s.path_of_url("https://elsewhere/logo.png").is_none());
    }
}
