//! Order insert listener: LISTEN/NOTIFY subscription feeding the
//! notification feed.
//!
//! The payload of `orders_changes` is the order id; the row is re-fetched so
//! the feed never trusts notification payload contents. On connection loss
//! the listener reconnects after a fixed delay and only re-subscribes —
//! inserts during the gap are not backfilled.

use crate::feed::NotificationFeed;
use chrono::Utc;
use closet_core::constants::ORDERS_NOTIFY_CHANNEL;
use closet_core::models::{Order, OrderNotification};
use closet_db::{CustomerRepository, OrderRepository};
use sqlx::postgres::PgListener;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Whether an inserted order should drive a notification: only confirmed
/// customer orders carry a payment code, drafts do not.
pub(crate) fn qualifies(order: &Order) -> bool {
    order
        .payment_code
        .as_deref()
        .is_some_and(|code| !code.trim().is_empty())
}

pub(crate) fn notification_from_order(order: &Order, customer_name: String) -> OrderNotification {
    OrderNotification {
        id: Uuid::new_v4(),
        order_id: order.id,
        payment_code: order.payment_code.clone().unwrap_or_default(),
        amount: order.total,
        customer_name,
        order_status: order.status.clone(),
        region: order.delivery_region.clone(),
        created_at: Utc::now(),
        read: false,
    }
}

/// Handle to the background listener task.
pub struct OrderListener {
    shutdown_tx: mpsc::Sender<()>,
}

impl OrderListener {
    /// Spawn the listener loop.
    pub fn start(pool: PgPool, feed: Arc<NotificationFeed>) -> Self {
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let worker = ListenerWorker {
            pool: pool.clone(),
            orders: OrderRepository::new(pool.clone()),
            customers: CustomerRepository::new(pool),
            feed,
            reconnect_delay: Duration::from_secs(5),
        };

        tokio::spawn(worker.run(shutdown_rx));

        Self { shutdown_tx }
    }

    /// Signal the listener loop to stop. Returns immediately.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

struct ListenerWorker {
    pool: PgPool,
    orders: OrderRepository,
    customers: CustomerRepository,
    feed: Arc<NotificationFeed>,
    reconnect_delay: Duration,
}

impl ListenerWorker {
    async fn run(self, mut shutdown_rx: mpsc::Receiver<()>) {
        tracing::info!(channel = ORDERS_NOTIFY_CHANNEL, "Order listener started");

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    tracing::info!("Order listener shutting down");
                    break;
                }
                result = self.listen_once() => {
                    if let Err(e) = result {
                        tracing::warn!(error = %e, "Order listener disconnected, will retry");
                    }
                    tokio::time::sleep(self.reconnect_delay).await;
                }
            }
        }
    }

    /// Subscribe and pump events until the connection drops.
    async fn listen_once(&self) -> Result<(), anyhow::Error> {
        let mut listener = PgListener::connect_with(&self.pool).await?;
        listener.listen(ORDERS_NOTIFY_CHANNEL).await?;

        loop {
            let notification = listener.recv().await?;
            self.handle_payload(notification.payload()).await;
        }
    }

    async fn handle_payload(&self, payload: &str) {
        let Ok(order_id) = Uuid::parse_str(payload) else {
            tracing::warn!(payload = %payload, "Ignoring malformed order notification payload");
            return;
        };

        let order = match self.orders.get(order_id).await {
            Ok(Some(order)) => order,
            Ok(None) => {
                tracing::warn!(order_id = %order_id, "Notified order no longer exists, dropping");
                return;
            }
            Err(e) => {
                tracing::warn!(order_id = %order_id, error = %e, "Order lookup failed, dropping event");
                return;
            }
        };

        if !qualifies(&order) {
            tracing::debug!(order_id = %order.id, "Order has no payment code, skipping notification");
            return;
        }

        // Enrichment failure drops the event; no partial notification is shown.
        let customer_name = match self.customers.display_name(order.customer_id).await {
            Ok(Some(name)) => name,
            Ok(None) => {
                tracing::warn!(
                    order_id = %order.id,
                    customer_id = %order.customer_id,
                    "Customer not found for order, dropping notification"
                );
                return;
            }
            Err(e) => {
                tracing::warn!(
                    order_id = %order.id,
                    customer_id = %order.customer_id,
                    error = %e,
                    "Customer lookup failed, dropping notification"
                );
                return;
            }
        };

        let notification = notification_from_order(&order, customer_name);
        if let Err(e) = self.feed.push(notification).await {
            tracing::warn!(order_id = %order.id, error = %e, "Failed to record notification");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn order(payment_code: Option<&str>) -> Order {
        Order {
            id: Uuid::new_v4(),
            order_number: "ORD-00000001".to_string(),
            customer_id: Uuid::new_v4(),
            status: "pending".to_string(),
            payment_code: payment_code.map(str::to_string),
            subtotal: Decimal::new(150000, 2),
            delivery_fee: Decimal::new(20000, 2),
            total: Decimal::new(170000, 2),
            delivery_region: Some("Nairobi".to_string()),
            delivery_area: Some("Westlands".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_qualifies_requires_payment_code() {
        assert!(qualifies(&order(Some("MPESA123"))));
        assert!(!qualifies(&order(None)));
        assert!(!qualifies(&order(Some(""))));
        assert!(!qualifies(&order(Some("   "))));
    }

    #[test]
    fn test_notification_from_order_carries_fields() {
        let source = order(Some("MPESA123"));
        let notification = notification_from_order(&source, "Achieng O.".to_string());

        assert_eq!(notification.order_id, source.id);
        assert_eq!(notification.payment_code, "MPESA123");
        assert_eq!(notification.amount, source.total);
        assert_eq!(notification.customer_name, "Achieng O.");
        assert_eq!(notification.region.as_deref(), Some("Nairobi"));
        assert!(!notification.read);
    }
}
