//! Closet Storage Library
//!
//! Blob storage abstraction for uploaded product images. The [`Storage`]
//! trait is implemented for the local filesystem, S3-compatible object
//! stores, and an in-memory backend used by tests.
//!
//! # Storage key format
//!
//! All backends use the same key layout: `product-images/{filename}`. Keys
//! must not contain `..` or a leading `/`. Key generation is centralized in
//! the `keys` module so backends stay consistent.

pub mod factory;
pub(crate) mod keys;
pub mod local;
pub mod memory;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use closet_core::StorageBackend;
pub use factory::create_storage;
pub use local::LocalStorage;
pub use memory::MemoryStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
