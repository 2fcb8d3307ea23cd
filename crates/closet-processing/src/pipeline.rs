//! Batch upload pipeline: validate -> (crop) -> optimize -> upload.
//!
//! A fixed-size pool (2 workers by default) drains the accepted files; each
//! worker carries one file to completion before pulling the next, so a slow
//! or failing file never blocks siblings beyond pool-capacity contention.
//! No ordering is guaranteed among workers. The batch call returns only
//! after every item has settled (done or error). Failures are isolated per
//! file and recoverable through [`UploadPipeline::retry_item`]; there is no
//! automatic retry or backoff.

use crate::image::crop::{apply_crop, CropDecision, CropGate, CropRequest};
use crate::optimizer::ImageOptimizer;
use crate::validator::{ImageValidator, ValidationError};
use async_trait::async_trait;
use serde::Serialize;
use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use uuid::Uuid;

/// Host-side upload boundary: optimized bytes in, public URL out.
#[async_trait]
pub trait ImageUploader: Send + Sync {
    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String, anyhow::Error>;
}

/// One file as handed to the pipeline.
#[derive(Clone, Debug)]
pub struct FileInput {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    Pending,
    Optimizing,
    Uploading,
    Done,
    Error,
}

/// One file moving through the pipeline. Mutated in place as it advances;
/// the original bytes are retained so a failed item can be retried without
/// re-selection.
#[derive(Clone, Debug, Serialize)]
pub struct UploadItem {
    pub id: Uuid,
    pub filename: String,
    pub size: usize,
    pub status: UploadStatus,
    pub progress: u8,
    pub url: Option<String>,
    pub error: Option<String>,
    #[serde(skip)]
    pub(crate) source: FileInput,
}

impl UploadItem {
    fn new(source: FileInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename: source.filename.clone(),
            size: source.data.len(),
            status: UploadStatus::Pending,
            progress: 0,
            url: None,
            error: None,
            source,
        }
    }
}

/// A file turned away by validation before entering the pipeline.
#[derive(Clone, Debug, Serialize)]
pub struct RejectedFile {
    pub filename: String,
    pub reason: String,
}

/// Result of one batch run.
#[derive(Clone, Debug, Serialize)]
pub struct BatchOutcome {
    pub items: Vec<UploadItem>,
    pub accepted_urls: Vec<String>,
    pub rejected: Vec<RejectedFile>,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("a batch upload is already in progress")]
    Busy,

    #[error("unknown upload item: {0}")]
    UnknownItem(Uuid),

    #[error("upload item {0} is not in a failed state")]
    NotFailed(Uuid),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

struct PipelineInner {
    optimizer: ImageOptimizer,
    uploader: Arc<dyn ImageUploader>,
    crop_gate: Option<Arc<dyn CropGate>>,
    items: Mutex<Vec<UploadItem>>,
    running: AtomicBool,
}

impl PipelineInner {
    fn with_item<R>(&self, id: Uuid, f: impl FnOnce(&mut UploadItem) -> R) -> Option<R> {
        let mut items = self.items.lock().expect("pipeline items lock poisoned");
        items.iter_mut().find(|item| item.id == id).map(f)
    }

    async fn process_item(inner: Arc<PipelineInner>, id: Uuid) {
        if let Err(e) = Self::try_process(&inner, id).await {
            tracing::warn!(item_id = %id, error = %e, "Upload item failed");
            inner.with_item(id, |item| {
                item.status = UploadStatus::Error;
                item.error = Some(e.to_string());
            });
        }
    }

    async fn try_process(inner: &Arc<PipelineInner>, id: Uuid) -> Result<(), anyhow::Error> {
        let source = inner
            .with_item(id, |item| {
                item.status = UploadStatus::Optimizing;
                item.progress = 10;
                item.url = None;
                item.error = None;
                item.source.clone()
            })
            .ok_or_else(|| anyhow::anyhow!("unknown upload item {}", id))?;

        let mut data = source.data;

        if let Some(gate) = &inner.crop_gate {
            let (width, height) = image::ImageReader::new(Cursor::new(&data))
                .with_guessed_format()?
                .into_dimensions()?;

            let mut request = CropRequest::new();
            request.begin()?;
            match gate.resolve(&source.filename, width, height).await {
                CropDecision::Apply(region) => {
                    request.resolve()?;
                    data =
                        tokio::task::spawn_blocking(move || apply_crop(&data, region)).await??;
                }
                CropDecision::Cancel => {
                    request.cancel()?;
                    anyhow::bail!("cancelled during crop");
                }
            }
        }

        // Decode/encode is CPU-bound; run off the async pool so concurrent
        // uploads keep flowing.
        let optimizer = inner.optimizer.clone();
        let optimized = tokio::task::spawn_blocking(move || optimizer.optimize(&data)).await??;

        inner.with_item(id, |item| {
            item.status = UploadStatus::Uploading;
            item.progress = 60;
        });

        let storage_filename = format!("{}.{}", id, optimized.extension());
        let url = inner
            .uploader
            .upload(&storage_filename, optimized.content_type(), optimized.data)
            .await?;

        inner.with_item(id, |item| {
            item.status = UploadStatus::Done;
            item.progress = 100;
            item.url = Some(url);
        });

        Ok(())
    }
}

/// The batch upload pipeline. One instance owns one item table; at most one
/// batch (or retry) runs at a time per instance.
pub struct UploadPipeline {
    validator: ImageValidator,
    concurrency: usize,
    inner: Arc<PipelineInner>,
}

impl UploadPipeline {
    pub fn new(
        validator: ImageValidator,
        optimizer: ImageOptimizer,
        uploader: Arc<dyn ImageUploader>,
    ) -> Self {
        Self {
            validator,
            concurrency: 2,
            inner: Arc::new(PipelineInner {
                optimizer,
                uploader,
                crop_gate: None,
                items: Mutex::new(Vec::new()),
                running: AtomicBool::new(false),
            }),
        }
    }

    /// Install an interactive crop gate. Each accepted file is offered to the
    /// gate before optimization; a cancel aborts only that item.
    pub fn with_crop_gate(mut self, gate: Arc<dyn CropGate>) -> Self {
        let inner = Arc::get_mut(&mut self.inner)
            .expect("with_crop_gate must be called before the pipeline is shared");
        inner.crop_gate = Some(gate);
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Snapshot of all items this pipeline instance has seen.
    pub fn items(&self) -> Vec<UploadItem> {
        self.inner
            .items
            .lock()
            .expect("pipeline items lock poisoned")
            .clone()
    }

    /// Public URLs of every completed item, in enqueue order.
    pub fn accepted_urls(&self) -> Vec<String> {
        self.items()
            .into_iter()
            .filter_map(|item| item.url)
            .collect()
    }

    /// Items currently in the failed list.
    pub fn failed_items(&self) -> Vec<UploadItem> {
        self.items()
            .into_iter()
            .filter(|item| item.status == UploadStatus::Error)
            .collect()
    }

    /// Run one batch to completion.
    ///
    /// The count ceiling is checked first and rejects the ENTIRE incoming
    /// batch; per-file validation failures reject only the offending file.
    /// Returns once every accepted item has settled.
    #[tracing::instrument(skip(self, files), fields(batch_size = files.len(), existing = existing_count))]
    pub async fn run_batch(
        &self,
        files: Vec<FileInput>,
        existing_count: usize,
    ) -> Result<BatchOutcome, PipelineError> {
        self.validator
            .validate_batch_count(existing_count, files.len())?;

        if self.inner.running.swap(true, Ordering::SeqCst) {
            return Err(PipelineError::Busy);
        }

        let mut rejected = Vec::new();
        let mut batch_ids = Vec::new();
        {
            let mut items = self
                .inner
                .items
                .lock()
                .expect("pipeline items lock poisoned");
            for file in files {
                match self.validator.validate_file(
                    &file.filename,
                    &file.content_type,
                    file.data.len(),
                ) {
                    Ok(()) => {
                        let item = UploadItem::new(file);
                        batch_ids.push(item.id);
                        items.push(item);
                    }
                    Err(e) => {
                        tracing::warn!(filename = %file.filename, error = %e, "File rejected");
                        rejected.push(RejectedFile {
                            filename: file.filename,
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut workers = JoinSet::new();
        for id in batch_ids.iter().copied() {
            let inner = self.inner.clone();
            let semaphore = semaphore.clone();
            workers.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return,
                };
                PipelineInner::process_item(inner, id).await;
            });
        }
        while workers.join_next().await.is_some() {}

        self.inner.running.store(false, Ordering::SeqCst);

        let items: Vec<UploadItem> = self
            .items()
            .into_iter()
            .filter(|item| batch_ids.contains(&item.id))
            .collect();
        let accepted_urls = items.iter().filter_map(|item| item.url.clone()).collect();

        Ok(BatchOutcome {
            items,
            accepted_urls,
            rejected,
        })
    }

    /// Re-run the pipeline for one failed item without touching siblings.
    pub async fn retry_item(&self, id: Uuid) -> Result<UploadItem, PipelineError> {
        let status = self
            .inner
            .with_item(id, |item| item.status)
            .ok_or(PipelineError::UnknownItem(id))?;

        if status != UploadStatus::Error {
            return Err(PipelineError::NotFailed(id));
        }

        if self.inner.running.swap(true, Ordering::SeqCst) {
            return Err(PipelineError::Busy);
        }

        PipelineInner::process_item(self.inner.clone(), id).await;

        self.inner.running.store(false, Ordering::SeqCst);

        self.inner
            .with_item(id, |item| item.clone())
            .ok_or(PipelineError::UnknownItem(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_item_serializes_without_source_bytes() {
        let item = UploadItem::new(FileInput {
            filename: "a.png".to_string(),
            content_type: "image/png".to_string(),
            data: vec![1, 2, 3],
        });

        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"a.png\""));
        assert!(json.contains("\"pending\""));
        assert!(!json.contains("source"));
    }
}
