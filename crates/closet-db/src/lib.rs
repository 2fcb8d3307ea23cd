//! Closet Database Library
//!
//! Postgres repositories for every entity the storefront and admin panel
//! manage, plus the embedded schema migrations. Repositories hold a
//! `PgPool`, issue runtime-checked queries, and translate database failures
//! into [`closet_core::AppError`].

pub mod banners;
pub mod cart;
pub mod categories;
pub mod customers;
pub mod delivery;
pub mod orders;
pub mod products;
pub mod wishlist;

pub use banners::BannerRepository;
pub use cart::CartRepository;
pub use categories::CategoryRepository;
pub use customers::CustomerRepository;
pub use delivery::DeliveryRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use wishlist::WishlistRepository;

/// Embedded migrations, applied at startup.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();
