//! OpenAPI document assembly.

use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers::notifications::{MarkAllReadResponse, UnreadCountResponse};
use crate::handlers::search::SearchResults;
use crate::handlers::uploads::{RejectedFileView, UploadItemView, UploadResponse};
use closet_core::models::{
    AddToCartRequest, AddToWishlistRequest, BannerRequest, CartItem, Category, CategoryAttributes,
    CategoryAttributesRequest, CheckoutItem, CheckoutRequest, CreateAddressRequest,
    CreateCategoryRequest, CreateCustomerRequest, CreateProductRequest, Customer, CustomerAddress,
    DeliveryLocation, DeliveryLocationRequest, LowStockVariant, MarketingBanner, NewVariant,
    Order, OrderDetail, OrderItem, OrderNotification, OrderStatus, PaginatedResponse, Product,
    ProductDetail, ProductVariant, UpdateCartItemRequest, UpdateCustomerRequest,
    UpdateOrderStatusRequest, UpdateProductRequest, WishlistItem,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Better Days Closet API",
        description = "E-commerce storefront and admin backend: catalog, orders, image uploads, and the order notification feed."
    ),
    paths(
        crate::handlers::health::health,
        crate::handlers::products::list_products,
        crate::handlers::products::low_stock,
        crate::handlers::products::get_product,
        crate::handlers::products::create_product,
        crate::handlers::products::update_product,
        crate::handlers::products::delete_product,
        crate::handlers::categories::list_categories,
        crate::handlers::categories::get_category,
        crate::handlers::categories::create_category,
        crate::handlers::categories::update_category,
        crate::handlers::categories::delete_category,
        crate::handlers::categories::get_category_attributes,
        crate::handlers::categories::upsert_category_attributes,
        crate::handlers::customers::list_customers,
        crate::handlers::customers::get_customer,
        crate::handlers::customers::create_customer,
        crate::handlers::customers::update_customer,
        crate::handlers::customers::list_addresses,
        crate::handlers::customers::create_address,
        crate::handlers::customers::update_address,
        crate::handlers::customers::delete_address,
        crate::handlers::orders::checkout,
        crate::handlers::orders::list_orders,
        crate::handlers::orders::get_order,
        crate::handlers::orders::update_order_status,
        crate::handlers::delivery::list_delivery_locations,
        crate::handlers::delivery::get_delivery_location,
        crate::handlers::delivery::create_delivery_location,
        crate::handlers::delivery::update_delivery_location,
        crate::handlers::delivery::delete_delivery_location,
        crate::handlers::banners::list_banners,
        crate::handlers::banners::get_banner,
        crate::handlers::banners::create_banner,
        crate::handlers::banners::update_banner,
        crate::handlers::banners::delete_banner,
        crate::handlers::cart::get_cart,
        crate::handlers::cart::add_to_cart,
        crate::handlers::cart::update_cart_item,
        crate::handlers::cart::remove_cart_item,
        crate::handlers::cart::clear_cart,
        crate::handlers::wishlist::get_wishlist,
        crate::handlers::wishlist::add_to_wishlist,
        crate::handlers::wishlist::remove_from_wishlist,
        crate::handlers::uploads::upload_images,
        crate::handlers::notifications::list_notifications,
        crate::handlers::notifications::unread_count,
        crate::handlers::notifications::mark_read,
        crate::handlers::notifications::mark_all_read,
        crate::handlers::notifications::clear_notifications,
        crate::handlers::notifications::stream_notifications,
        crate::handlers::search::global_search,
    ),
    components(schemas(
        ErrorResponse,
        Product,
        ProductVariant,
        ProductDetail,
        LowStockVariant,
        CreateProductRequest,
        UpdateProductRequest,
        NewVariant,
        Category,
        CategoryAttributes,
        CreateCategoryRequest,
        CategoryAttributesRequest,
        Customer,
        CustomerAddress,
        CreateCustomerRequest,
        UpdateCustomerRequest,
        CreateAddressRequest,
        Order,
        OrderItem,
        OrderDetail,
        OrderStatus,
        CheckoutRequest,
        CheckoutItem,
        UpdateOrderStatusRequest,
        DeliveryLocation,
        DeliveryLocationRequest,
        MarketingBanner,
        BannerRequest,
        CartItem,
        AddToCartRequest,
        UpdateCartItemRequest,
        WishlistItem,
        AddToWishlistRequest,
        OrderNotification,
        UnreadCountResponse,
        MarkAllReadResponse,
        UploadResponse,
        UploadItemView,
        RejectedFileView,
        SearchResults,
        PaginatedResponse<Product>,
        PaginatedResponse<Customer>,
        PaginatedResponse<Order>,
    )),
    tags(
        (name = "health", description = "Liveness"),
        (name = "products", description = "Catalog products and variants"),
        (name = "categories", description = "Categories and variant configuration"),
        (name = "customers", description = "Customers and saved addresses"),
        (name = "orders", description = "Checkout and order management"),
        (name = "delivery", description = "Delivery locations and fees"),
        (name = "banners", description = "Storefront marketing banners"),
        (name = "cart", description = "Shopping cart"),
        (name = "wishlist", description = "Wishlist"),
        (name = "uploads", description = "Product image upload pipeline"),
        (name = "notifications", description = "Order notification feed"),
        (name = "search", description = "Admin global search")
    )
)]
pub struct ApiDoc;

pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
