//! Route configuration and setup

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::{
    http::HeaderValue,
    routing::{delete, get, post, put},
    Json, Router,
};
use closet_core::Config;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

fn p(path: &str) -> String {
    format!("{}{}", API_PREFIX, path)
}

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router<()> {
    let api = Router::new()
        .route("/health", get(handlers::health::health))
        // Catalog
        .route(
            &p("/products"),
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route(&p("/products/low-stock"), get(handlers::products::low_stock))
        .route(
            &p("/products/{id}"),
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .route(
            &p("/categories"),
            get(handlers::categories::list_categories)
                .post(handlers::categories::create_category),
        )
        .route(
            &p("/categories/{id}"),
            get(handlers::categories::get_category)
                .put(handlers::categories::update_category)
                .delete(handlers::categories::delete_category),
        )
        .route(
            &p("/categories/{id}/attributes"),
            get(handlers::categories::get_category_attributes)
                .put(handlers::categories::upsert_category_attributes),
        )
        // Customers
        .route(
            &p("/customers"),
            get(handlers::customers::list_customers).post(handlers::customers::create_customer),
        )
        .route(
            &p("/customers/{id}"),
            get(handlers::customers::get_customer).put(handlers::customers::update_customer),
        )
        .route(
            &p("/customers/{id}/addresses"),
            get(handlers::customers::list_addresses).post(handlers::customers::create_address),
        )
        .route(
            &p("/customers/{id}/addresses/{address_id}"),
            put(handlers::customers::update_address).delete(handlers::customers::delete_address),
        )
        // Orders
        .route(
            &p("/orders"),
            get(handlers::orders::list_orders).post(handlers::orders::checkout),
        )
        .route(&p("/orders/{id}"), get(handlers::orders::get_order))
        .route(
            &p("/orders/{id}/status"),
            put(handlers::orders::update_order_status),
        )
        // Delivery locations
        .route(
            &p("/delivery-locations"),
            get(handlers::delivery::list_delivery_locations)
                .post(handlers::delivery::create_delivery_location),
        )
        .route(
            &p("/delivery-locations/{id}"),
            get(handlers::delivery::get_delivery_location)
                .put(handlers::delivery::update_delivery_location)
                .delete(handlers::delivery::delete_delivery_location),
        )
        // Banners
        .route(
            &p("/banners"),
            get(handlers::banners::list_banners).post(handlers::banners::create_banner),
        )
        .route(
            &p("/banners/{id}"),
            get(handlers::banners::get_banner)
                .put(handlers::banners::update_banner)
                .delete(handlers::banners::delete_banner),
        )
        // Cart & wishlist
        .route(
            &p("/cart/{customer_id}"),
            get(handlers::cart::get_cart)
                .post(handlers::cart::add_to_cart)
                .delete(handlers::cart::clear_cart),
        )
        .route(
            &p("/cart/{customer_id}/items/{item_id}"),
            put(handlers::cart::update_cart_item).delete(handlers::cart::remove_cart_item),
        )
        .route(
            &p("/wishlist/{customer_id}"),
            get(handlers::wishlist::get_wishlist).post(handlers::wishlist::add_to_wishlist),
        )
        .route(
            &p("/wishlist/{customer_id}/{product_id}"),
            delete(handlers::wishlist::remove_from_wishlist),
        )
        // Uploads
        .route(&p("/uploads/images"), post(handlers::uploads::upload_images))
        // Notifications
        .route(
            &p("/notifications"),
            get(handlers::notifications::list_notifications)
                .delete(handlers::notifications::clear_notifications),
        )
        .route(
            &p("/notifications/unread-count"),
            get(handlers::notifications::unread_count),
        )
        .route(
            &p("/notifications/read-all"),
            post(handlers::notifications::mark_all_read),
        )
        .route(
            &p("/notifications/{id}/read"),
            post(handlers::notifications::mark_read),
        )
        .route(
            &p("/notifications/stream"),
            get(handlers::notifications::stream_notifications),
        )
        // Admin search
        .route(&p("/search"), get(handlers::search::global_search))
        // OpenAPI document
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::openapi()) }),
        )
        .with_state(state);

    // Room for the largest allowed batch plus multipart overhead.
    let body_limit = config
        .max_file_size_bytes
        .saturating_mul(config.max_images.max(1))
        .saturating_add(1024 * 1024);

    let docs: Router = utoipa_rapidoc::RapiDoc::new("/api/openapi.json")
        .path("/docs")
        .into();

    api.merge(docs)
        .layer(ConcurrencyLimitLayer::new(1024))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(setup_cors(config))
        .layer(TraceLayer::new_for_http())
}

fn setup_cors(config: &Config) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
