//! Application initialization: database, storage, notification feed, routes.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::Context;
use axum::Router;
use closet_core::constants::NOTIFICATION_CAP;
use closet_core::Config;
use closet_db::{
    BannerRepository, CartRepository, CategoryRepository, CustomerRepository, DeliveryRepository,
    OrderRepository, ProductRepository, WishlistRepository,
};
use closet_notify::{FileStore, NotificationFeed, OrderListener};
use std::sync::Arc;

/// Wire every service together and build the router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router), anyhow::Error> {
    let pool = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config).await?;

    let store = Arc::new(FileStore::new(&config.notification_store_path));
    let feed = Arc::new(
        NotificationFeed::load(store, NOTIFICATION_CAP)
            .await
            .context("Failed to load notification feed")?,
    );

    let listener = OrderListener::start(pool.clone(), feed.clone());

    let state = Arc::new(AppState {
        config: config.clone(),
        pool: pool.clone(),
        products: ProductRepository::new(pool.clone()),
        categories: CategoryRepository::new(pool.clone()),
        customers: CustomerRepository::new(pool.clone()),
        orders: OrderRepository::new(pool.clone()),
        delivery: DeliveryRepository::new(pool.clone()),
        banners: BannerRepository::new(pool.clone()),
        cart: CartRepository::new(pool.clone()),
        wishlist: WishlistRepository::new(pool),
        storage,
        feed,
        listener,
    });

    let router = routes::setup_routes(&config, state.clone());

    Ok((state, router))
}
