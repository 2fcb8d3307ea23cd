//! Application state shared across handlers.

use closet_core::Config;
use closet_db::{
    BannerRepository, CartRepository, CategoryRepository, CustomerRepository, DeliveryRepository,
    OrderRepository, ProductRepository, WishlistRepository,
};
use closet_notify::{NotificationFeed, OrderListener};
use closet_storage::Storage;
use sqlx::PgPool;
use std::sync::Arc;

pub struct AppState {
    pub config: Config,
    pub pool: PgPool,
    pub products: ProductRepository,
    pub categories: CategoryRepository,
    pub customers: CustomerRepository,
    pub orders: OrderRepository,
    pub delivery: DeliveryRepository,
    pub banners: BannerRepository,
    pub cart: CartRepository,
    pub wishlist: WishlistRepository,
    pub storage: Arc<dyn Storage>,
    pub feed: Arc<NotificationFeed>,
    /// Held so the background listener stays alive for the process lifetime.
    pub listener: OrderListener,
}
