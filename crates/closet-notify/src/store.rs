//! Injected persistence for the notification feed.
//!
//! The feed only needs load/save/clear, so it stays testable without any
//! real storage behind it.

use async_trait::async_trait;
use closet_core::models::OrderNotification;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::fs;

#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn load(&self) -> Result<Vec<OrderNotification>, anyhow::Error>;
    async fn save(&self, notifications: &[OrderNotification]) -> Result<(), anyhow::Error>;
    async fn clear(&self) -> Result<(), anyhow::Error>;
}

/// JSON file-backed store.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn ensure_parent_dir(path: &Path) -> Result<(), anyhow::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationStore for FileStore {
    async fn load(&self) -> Result<Vec<OrderNotification>, anyhow::Error> {
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(Vec::new());
        }

        let raw = fs::read(&self.path).await?;
        let notifications = serde_json::from_slice(&raw)?;
        Ok(notifications)
    }

    async fn save(&self, notifications: &[OrderNotification]) -> Result<(), anyhow::Error> {
        Self::ensure_parent_dir(&self.path).await?;
        let raw = serde_json::to_vec(notifications)?;
        fs::write(&self.path, raw).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), anyhow::Error> {
        if fs::try_exists(&self.path).await.unwrap_or(false) {
            fs::remove_file(&self.path).await?;
        }
        Ok(())
    }
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryStore {
    saved: Mutex<Vec<OrderNotification>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// What the last save persisted.
    pub fn persisted(&self) -> Vec<OrderNotification> {
        self.saved.lock().expect("store lock poisoned").clone()
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn load(&self) -> Result<Vec<OrderNotification>, anyhow::Error> {
        Ok(self.persisted())
    }

    async fn save(&self, notifications: &[OrderNotification]) -> Result<(), anyhow::Error> {
        *self.saved.lock().expect("store lock poisoned") = notifications.to_vec();
        Ok(())
    }

    async fn clear(&self) -> Result<(), anyhow::Error> {
        self.saved.lock().expect("store lock poisoned").clear();
        Ok(())
    }
}
