//! Shared constants.

/// Service name used in logs and the health endpoint.
pub const SERVICE_NAME: &str = "closet-api";

/// PostgreSQL LISTEN/NOTIFY channel fired by the orders insert trigger.
pub const ORDERS_NOTIFY_CHANNEL: &str = "orders_changes";

/// Key prefix under which uploaded product images are stored.
pub const PRODUCT_IMAGES_PREFIX: &str = "product-images";

/// Maximum number of notifications kept in the persisted feed.
pub const NOTIFICATION_CAP: usize = 100;

/// Default ceiling for a single uploaded image, in bytes (5 MB).
pub const DEFAULT_MAX_FILE_SIZE_BYTES: usize = 5 * 1024 * 1024;

/// Default maximum number of images per product.
pub const DEFAULT_MAX_IMAGES: usize = 10;

/// Default bound applied to each side of an optimized image.
pub const DEFAULT_MAX_DIMENSION: u32 = 1600;

/// Default WebP encode quality (0-100 scale).
pub const DEFAULT_WEBP_QUALITY: f32 = 80.0;

/// Number of files processed concurrently by the upload pipeline.
pub const UPLOAD_CONCURRENCY: usize = 2;
