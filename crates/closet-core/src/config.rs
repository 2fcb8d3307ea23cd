//! Configuration module
//!
//! Environment-driven configuration for the API and background services.
//! Every field has a default so the service boots with nothing but a
//! `DATABASE_URL`; invalid values fall back to the default with a warning
//! rather than aborting startup.

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::constants;

/// Storage backend selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    S3,
    Local,
    /// In-memory backend, only useful for tests.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "s3" => Ok(StorageBackend::S3),
            "local" => Ok(StorageBackend::Local),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(format!("Unknown storage backend: {}", other)),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::S3 => write!(f, "s3"),
            StorageBackend::Local => write!(f, "local"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,
    pub server_port: u16,
    pub cors_origins: Vec<String>,

    // Database
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,

    // Storage
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>,
    pub local_storage_path: String,
    pub local_storage_base_url: String,

    // Image upload pipeline
    pub max_file_size_bytes: usize,
    pub allowed_content_types: Vec<String>,
    pub allowed_extensions: Vec<String>,
    pub max_images: usize,
    pub image_max_width: u32,
    pub image_max_height: u32,
    pub webp_quality: f32,
    pub upload_concurrency: usize,

    // Notification feed
    pub notification_store_path: String,
}

impl Config {
    /// Build configuration from the process environment.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let storage_backend = env_parse("STORAGE_BACKEND", StorageBackend::Local);

        Ok(Config {
            environment: env_string("ENVIRONMENT", "development"),
            server_port: env_parse("PORT", 8080),
            cors_origins: env_list("CORS_ORIGINS", &[]),
            database_url,
            db_max_connections: env_parse("DB_MAX_CONNECTIONS", 10),
            db_timeout_seconds: env_parse("DB_TIMEOUT_SECONDS", 30),
            storage_backend,
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION").ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            local_storage_path: env_string("LOCAL_STORAGE_PATH", "./data/media"),
            local_storage_base_url: env_string(
                "LOCAL_STORAGE_BASE_URL",
                "http://localhost:8080/media",
            ),
            max_file_size_bytes: env_parse(
                "MAX_FILE_SIZE_BYTES",
                constants::DEFAULT_MAX_FILE_SIZE_BYTES,
            ),
            allowed_content_types: env_list(
                "ALLOWED_CONTENT_TYPES",
                &["image/jpeg", "image/png", "image/webp"],
            ),
            allowed_extensions: env_list(
                "ALLOWED_EXTENSIONS",
                &["jpg", "jpeg", "png", "webp"],
            ),
            max_images: env_parse("MAX_IMAGES", constants::DEFAULT_MAX_IMAGES),
            image_max_width: env_parse("IMAGE_MAX_WIDTH", constants::DEFAULT_MAX_DIMENSION),
            image_max_height: env_parse("IMAGE_MAX_HEIGHT", constants::DEFAULT_MAX_DIMENSION),
            webp_quality: env_parse("WEBP_QUALITY", constants::DEFAULT_WEBP_QUALITY),
            upload_concurrency: env_parse("UPLOAD_CONCURRENCY", constants::UPLOAD_CONCURRENCY),
            notification_store_path: env_string(
                "NOTIFICATION_STORE_PATH",
                "./data/notifications.json",
            ),
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        matches!(self.environment.to_lowercase().as_str(), "production" | "prod")
    }
}

fn env_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_list(key: &str, default: &[&str]) -> Vec<String> {
    match env::var(key) {
        Ok(raw) => raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Err(_) => default.iter().map(|s| s.to_string()).collect(),
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + fmt::Debug,
{
    match env::var(key) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(key = key, value = %raw, default = ?default, "Invalid value, using default");
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_backend_parse() {
        assert_eq!("s3".parse::<StorageBackend>().unwrap(), StorageBackend::S3);
        assert_eq!(
            "LOCAL".parse::<StorageBackend>().unwrap(),
            StorageBackend::Local
        );
        assert!("ftp".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_env_parse_falls_back_on_garbage() {
        std::env::set_var("CLOSET_TEST_PORT", "not-a-number");
        let port: u16 = env_parse("CLOSET_TEST_PORT", 8080);
        assert_eq!(port, 8080);
        std::env::remove_var("CLOSET_TEST_PORT");
    }

    #[test]
    fn test_env_list_splits_and_trims() {
        std::env::set_var("CLOSET_TEST_LIST", "image/jpeg, image/png ,,image/webp");
        let list = env_list("CLOSET_TEST_LIST", &[]);
        assert_eq!(list, vec!["image/jpeg", "image/png", "image/webp"]);
        std::env::remove_var("CLOSET_TEST_LIST");
    }
}
