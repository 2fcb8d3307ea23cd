//! Bridges the pipeline's injected uploader boundary onto the configured
//! storage backend.

use async_trait::async_trait;
use closet_processing::ImageUploader;
use closet_storage::Storage;
use std::sync::Arc;

pub struct StorageUploader {
    storage: Arc<dyn Storage>,
}

impl StorageUploader {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl ImageUploader for StorageUploader {
    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String, anyhow::Error> {
        let (_key, url) = self
            .storage
            .upload(filename, content_type, data)
            .await
            .map_err(anyhow::Error::from)?;
        Ok(url)
    }
}
