//! Closet Notify Library
//!
//! The realtime order notification feed: a Postgres LISTEN/NOTIFY
//! subscription on order inserts, customer-name enrichment, and a capped,
//! read-tracked notification list mirrored into an injected persistent
//! store.
//!
//! The feed is a best-effort single-process cache. Inserts that arrive
//! while the listener is disconnected are not backfilled; the orders table
//! remains the source of truth.

pub mod feed;
pub mod listener;
pub mod store;

pub use feed::{NotificationFeed, NotificationToast};
pub use listener::OrderListener;
pub use store::{FileStore, MemoryStore, NotificationStore};
