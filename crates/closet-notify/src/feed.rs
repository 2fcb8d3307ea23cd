//! The notification feed: a capped, read-tracked, most-recent-first list
//! with an injected persistent mirror and a broadcast channel for transient
//! toasts.

use crate::store::NotificationStore;
use closet_core::models::OrderNotification;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use uuid::Uuid;

/// Transient toast payload emitted for every new notification.
#[derive(Clone, Debug, Serialize)]
pub struct NotificationToast {
    pub order_id: Uuid,
    pub customer_name: String,
    pub amount: Decimal,
}

pub struct NotificationFeed {
    store: Arc<dyn NotificationStore>,
    cap: usize,
    inner: Mutex<Vec<OrderNotification>>,
    toast_tx: broadcast::Sender<NotificationToast>,
}

impl NotificationFeed {
    /// Build a feed from whatever the store already holds, so the list
    /// survives a process restart.
    pub async fn load(
        store: Arc<dyn NotificationStore>,
        cap: usize,
    ) -> Result<Self, anyhow::Error> {
        let mut notifications = store.load().await?;
        notifications.truncate(cap);

        let (toast_tx, _) = broadcast::channel(64);

        Ok(Self {
            store,
            cap,
            inner: Mutex::new(notifications),
            toast_tx,
        })
    }

    /// Subscribe to transient toasts.
    pub fn subscribe(&self) -> broadcast::Receiver<NotificationToast> {
        self.toast_tx.subscribe()
    }

    /// Prepend a notification (most-recent-first), persist the capped list,
    /// and emit a toast.
    pub async fn push(&self, notification: OrderNotification) -> Result<(), anyhow::Error> {
        let toast = NotificationToast {
            order_id: notification.order_id,
            customer_name: notification.customer_name.clone(),
            amount: notification.amount,
        };

        {
            let mut notifications = self.inner.lock().await;
            notifications.insert(0, notification);
            notifications.truncate(self.cap);
            self.store.save(&notifications).await?;
        }

        tracing::info!(
            order_id = %toast.order_id,
            customer = %toast.customer_name,
            amount = %toast.amount,
            "New order notification"
        );

        // Nobody listening is fine; toasts are transient.
        let _ = self.toast_tx.send(toast);

        Ok(())
    }

    pub async fn list(&self) -> Vec<OrderNotification> {
        self.inner.lock().await.clone()
    }

    pub async fn unread_count(&self) -> usize {
        self.inner
            .lock()
            .await
            .iter()
            .filter(|n| !n.read)
            .count()
    }

    /// Mark one notification read. Idempotent; returns false for unknown ids.
    pub async fn mark_read(&self, id: Uuid) -> Result<bool, anyhow::Error> {
        let mut notifications = self.inner.lock().await;
        let Some(notification) = notifications.iter_mut().find(|n| n.id == id) else {
            return Ok(false);
        };

        if !notification.read {
            notification.read = true;
            self.store.save(&notifications).await?;
        }

        Ok(true)
    }

    /// Mark every notification read. Returns how many flags flipped.
    pub async fn mark_all_read(&self) -> Result<usize, anyhow::Error> {
        let mut notifications = self.inner.lock().await;
        let mut changed = 0;
        for notification in notifications.iter_mut() {
            if !notification.read {
                notification.read = true;
                changed += 1;
            }
        }

        if changed > 0 {
            self.store.save(&notifications).await?;
        }

        Ok(changed)
    }

    /// Empty the list and delete the persisted mirror.
    pub async fn clear_all(&self) -> Result<(), anyhow::Error> {
        let mut notifications = self.inner.lock().await;
        notifications.clear();
        self.store.clear().await?;
        Ok(())
    }
}
