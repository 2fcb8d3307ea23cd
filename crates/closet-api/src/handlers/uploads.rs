//! Batch image upload endpoint.
//!
//! Multipart `files` fields are run through the upload pipeline against the
//! configured storage backend. Per-file validation failures come back in
//! `rejected`; a count-ceiling violation rejects the whole batch with 400.

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::uploader::StorageUploader;
use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    Json,
};
use closet_core::AppError;
use closet_processing::{
    FileInput, ImageOptimizer, ImageValidator, OutputFormat, UploadItem, UploadPipeline,
    UploadStatus,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    /// How many images the target entity already carries; counted against
    /// the configured ceiling.
    #[serde(default)]
    pub existing: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadItemView {
    pub id: Uuid,
    pub filename: String,
    pub size: usize,
    pub status: String,
    pub progress: u8,
    pub url: Option<String>,
    pub error: Option<String>,
}

impl From<UploadItem> for UploadItemView {
    fn from(item: UploadItem) -> Self {
        let status = match item.status {
            UploadStatus::Pending => "pending",
            UploadStatus::Optimizing => "optimizing",
            UploadStatus::Uploading => "uploading",
            UploadStatus::Done => "done",
            UploadStatus::Error => "error",
        };

        UploadItemView {
            id: item.id,
            filename: item.filename,
            size: item.size,
            status: status.to_string(),
            progress: item.progress,
            url: item.url,
            error: item.error,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RejectedFileView {
    pub filename: String,
    pub reason: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub accepted_urls: Vec<String>,
    pub items: Vec<UploadItemView>,
    pub rejected: Vec<RejectedFileView>,
}

/// Upload a batch of product images.
#[utoipa::path(
    post,
    path = "/api/v1/uploads/images",
    tag = "uploads",
    params(("existing" = Option<usize>, Query, description = "Images the entity already carries")),
    responses(
        (status = 201, description = "Batch processed", body = UploadResponse),
        (status = 400, description = "Invalid input or too many images", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(existing = query.existing))]
pub async fn upload_images(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UploadQuery>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), HttpAppError> {
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid multipart field: {}",
            e
        )))
    })? {
        if field.name() != Some("files") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| {
                HttpAppError(AppError::InvalidInput(format!(
                    "Failed to read uploaded file: {}",
                    e
                )))
            })?
            .to_vec();

        files.push(FileInput {
            filename,
            content_type,
            data,
        });
    }

    if files.is_empty() {
        return Err(AppError::InvalidInput(
            "No files provided; send one or more 'files' form fields".to_string(),
        )
        .into());
    }

    let config = &state.config;
    let validator = ImageValidator::new(
        config.max_file_size_bytes,
        config.allowed_extensions.clone(),
        config.allowed_content_types.clone(),
        config.max_images,
    );
    let optimizer = ImageOptimizer {
        max_width: config.image_max_width,
        max_height: config.image_max_height,
        format: OutputFormat::WebP,
        quality: config.webp_quality,
    };

    let pipeline = UploadPipeline::new(
        validator,
        optimizer,
        Arc::new(StorageUploader::new(state.storage.clone())),
    )
    .with_concurrency(config.upload_concurrency);

    let outcome = pipeline.run_batch(files, query.existing).await?;

    let response = UploadResponse {
        accepted_urls: outcome.accepted_urls,
        items: outcome.items.into_iter().map(UploadItemView::from).collect(),
        rejected: outcome
            .rejected
            .into_iter()
            .map(|r| RejectedFileView {
                filename: r.filename,
                reason: r.reason,
            })
            .collect(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}
