//! Feed behavior tests against the injected store implementations.

use chrono::Utc;
use closet_core::models::OrderNotification;
use closet_notify::{FileStore, MemoryStore, NotificationFeed, NotificationStore};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

fn notification(label: &str) -> OrderNotification {
    OrderNotification {
        id: Uuid::new_v4(),
        order_id: Uuid::new_v4(),
        payment_code: format!("PAY-{}", label),
        amount: Decimal::new(99900, 2),
        customer_name: format!("Customer {}", label),
        order_status: "pending".to_string(),
        region: None,
        created_at: Utc::now(),
        read: false,
    }
}

#[tokio::test]
async fn feed_is_most_recent_first_and_capped_at_100() {
    let store = Arc::new(MemoryStore::new());
    let feed = NotificationFeed::load(store.clone(), 100).await.unwrap();

    for i in 0..150 {
        feed.push(notification(&i.to_string())).await.unwrap();
    }

    let list = feed.list().await;
    assert_eq!(list.len(), 100);
    // Most recent arrival first; the oldest 50 were evicted.
    assert_eq!(list[0].payment_code, "PAY-149");
    assert_eq!(list[99].payment_code, "PAY-50");

    // The persisted mirror matches the capped list.
    let persisted = store.persisted();
    assert_eq!(persisted.len(), 100);
    assert_eq!(persisted[0].payment_code, "PAY-149");

    assert_eq!(feed.unread_count().await, 100);
}

#[tokio::test]
async fn marking_read_is_idempotent() {
    let feed = NotificationFeed::load(Arc::new(MemoryStore::new()), 100)
        .await
        .unwrap();

    feed.push(notification("a")).await.unwrap();
    feed.push(notification("b")).await.unwrap();
    assert_eq!(feed.unread_count().await, 2);

    let id = feed.list().await[0].id;
    assert!(feed.mark_read(id).await.unwrap());
    assert_eq!(feed.unread_count().await, 1);

    // Marking an already-read notification again changes nothing.
    assert!(feed.mark_read(id).await.unwrap());
    assert_eq!(feed.unread_count().await, 1);

    // Unknown ids are reported, not an error.
    assert!(!feed.mark_read(Uuid::new_v4()).await.unwrap());
    assert_eq!(feed.unread_count().await, 1);
}

#[tokio::test]
async fn mark_all_read_on_empty_feed_is_a_noop() {
    let feed = NotificationFeed::load(Arc::new(MemoryStore::new()), 100)
        .await
        .unwrap();

    assert_eq!(feed.mark_all_read().await.unwrap(), 0);
    assert_eq!(feed.unread_count().await, 0);
}

#[tokio::test]
async fn mark_all_read_flips_every_flag() {
    let feed = NotificationFeed::load(Arc::new(MemoryStore::new()), 100)
        .await
        .unwrap();

    for i in 0..5 {
        feed.push(notification(&i.to_string())).await.unwrap();
    }

    assert_eq!(feed.mark_all_read().await.unwrap(), 5);
    assert_eq!(feed.unread_count().await, 0);
    // Second pass flips nothing.
    assert_eq!(feed.mark_all_read().await.unwrap(), 0);
}

#[tokio::test]
async fn clear_all_empties_list_and_store() {
    let store = Arc::new(MemoryStore::new());
    let feed = NotificationFeed::load(store.clone(), 100).await.unwrap();

    feed.push(notification("a")).await.unwrap();
    feed.clear_all().await.unwrap();

    assert!(feed.list().await.is_empty());
    assert_eq!(feed.unread_count().await, 0);
    assert!(store.persisted().is_empty());
}

#[tokio::test]
async fn feed_state_survives_restart_via_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notifications.json");

    {
        let store = Arc::new(FileStore::new(&path));
        let feed = NotificationFeed::load(store, 100).await.unwrap();
        feed.push(notification("persisted")).await.unwrap();
        let id = feed.list().await[0].id;
        feed.mark_read(id).await.unwrap();
    }

    // New feed instance over the same store sees the previous state.
    let store = Arc::new(FileStore::new(&path));
    let feed = NotificationFeed::load(store, 100).await.unwrap();
    let list = feed.list().await;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].payment_code, "PAY-persisted");
    assert!(list[0].read);
    assert_eq!(feed.unread_count().await, 0);
}

#[tokio::test]
async fn file_store_clear_deletes_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notifications.json");

    let store = FileStore::new(&path);
    store.save(&[notification("x")]).await.unwrap();
    assert!(path.exists());

    store.clear().await.unwrap();
    assert!(!path.exists());
    assert!(store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn push_emits_a_toast_to_subscribers() {
    let feed = NotificationFeed::load(Arc::new(MemoryStore::new()), 100)
        .await
        .unwrap();

    let mut rx = feed.subscribe();
    let n = notification("toast");
    let expected_order = n.order_id;
    feed.push(n).await.unwrap();

    let toast = rx.recv().await.unwrap();
    assert_eq!(toast.order_id, expected_order);
    assert_eq!(toast.customer_name, "Customer toast");
}
