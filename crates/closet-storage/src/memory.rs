//! In-memory storage backend for tests.
//!
//! Keeps uploaded objects in a shared map so tests can assert on what was
//! stored without touching the filesystem or the network.

use crate::keys::generate_storage_key;
use crate::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use closet_core::StorageBackend;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MemoryStorage {
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    base_url: String,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            objects: Arc::new(Mutex::new(HashMap::new())),
            base_url: "memory://product-images".to_string(),
        }
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.lock().expect("storage lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn upload(
        &self,
        filename: &str,
        _content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<(String, String)> {
        let key = generate_storage_key(filename);
        let url = format!("{}/{}", self.base_url, filename);
        self.objects
            .lock()
            .expect("storage lock poisoned")
            .insert(key.clone(), data);
        Ok((key, url))
    }

    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        self.objects
            .lock()
            .expect("storage lock poisoned")
            .get(storage_key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(storage_key.to_string()))
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        self.objects
            .lock()
            .expect("storage lock poisoned")
            .remove(storage_key);
        Ok(())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        Ok(self
            .objects
            .lock()
            .expect("storage lock poisoned")
            .contains_key(storage_key))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        let (key, url) = storage
            .upload("a.webp", "image/webp", b"bytes".to_vec())
            .await
            .unwrap();

        assert_eq!(key, "product-images/a.webp");
        assert!(url.ends_with("a.webp"));
        assert_eq!(storage.download(&key).await.unwrap(), b"bytes".to_vec());
        assert!(storage.exists(&key).await.unwrap());

        storage.delete(&key).await.unwrap();
        assert!(!storage.exists(&key).await.unwrap());
        assert!(matches!(
            storage.download(&key).await,
            Err(StorageError::NotFound(_))
        ));
    }
}
