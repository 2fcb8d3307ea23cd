//! Closet Processing Library
//!
//! The image upload pipeline: validation, decode with EXIF orientation,
//! bounded-fit resize, optional crop, re-encode, and a bounded-concurrency
//! batch uploader with per-item retry.
//!
//! The pipeline is host-agnostic: it only requires an [`ImageUploader`]
//! implementation (optimized bytes in, public URL out), so any storage
//! backend can fulfill it.

pub mod encode;
pub mod image;
pub mod optimizer;
pub mod pipeline;
pub mod validator;

// Re-export commonly used types
pub use encode::OutputFormat;
pub use image::crop::{
    apply_crop, CropDecision, CropGate, CropRegion, CropRequest, CropState, CropStateError,
};
pub use image::orientation::ImageOrientation;
pub use image::resize::{fit_within, resize_to_fit, select_filter};
pub use optimizer::{ImageOptimizer, OptimizedImage};
pub use pipeline::{
    BatchOutcome, FileInput, ImageUploader, PipelineError, RejectedFile, UploadItem,
    UploadPipeline, UploadStatus,
};
pub use validator::{ImageValidator, ValidationError};
