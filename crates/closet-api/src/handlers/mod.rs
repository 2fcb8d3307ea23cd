//! HTTP handlers, one module per entity.

pub mod banners;
pub mod cart;
pub mod categories;
pub mod customers;
pub mod delivery;
pub mod health;
pub mod notifications;
pub mod orders;
pub mod products;
pub mod search;
pub mod uploads;
pub mod wishlist;
