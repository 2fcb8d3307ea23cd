//! Catalog models: categories, category attributes, products, and variants.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Product category. Categories form a single-level-or-deeper tree via `parent_id`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Per-category variant configuration: whether products in the category carry
/// size and/or color variants, and the allowed value sets.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CategoryAttributes {
    pub category_id: Uuid,
    pub has_sizes: bool,
    pub has_colors: bool,
    pub size_options: Vec<String>,
    pub color_options: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub price: Decimal,
    /// Percentage discount in the range 0-100.
    pub discount_percent: i32,
    /// `price * (100 - discount_percent) / 100`, computed by the database.
    pub discounted_price: Decimal,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A purchasable size/color/price/stock combination of a product.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ProductVariant {
    pub id: Uuid,
    pub product_id: Uuid,
    pub size: Option<String>,
    pub color: Option<String>,
    pub price: Decimal,
    pub stock_quantity: i32,
}

/// Product together with its variants, as returned by detail endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetail {
    pub product: Product,
    pub variants: Vec<ProductVariant>,
}

/// Variant at or under the restock threshold, joined with its product name.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct LowStockVariant {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub size: Option<String>,
    pub color: Option<String>,
    pub stock_quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct NewVariant {
    pub size: Option<String>,
    pub color: Option<String>,
    pub price: Decimal,
    #[validate(range(min = 0, message = "Stock quantity cannot be negative"))]
    pub stock_quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 255, message = "Product name must be between 1 and 255 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    pub price: Decimal,
    #[serde(default)]
    #[validate(range(min = 0, max = 100, message = "Discount must be between 0 and 100 percent"))]
    pub discount_percent: i32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    #[validate(nested)]
    pub variants: Vec<NewVariant>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateProductRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Product name must be between 1 and 255 characters"))]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    #[validate(range(min = 0, max = 100, message = "Discount must be between 0 and 100 percent"))]
    pub discount_percent: Option<i32>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    /// When present, replaces the product's variant set wholesale.
    #[serde(default)]
    #[validate(nested)]
    pub variants: Option<Vec<NewVariant>>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 255, message = "Category name must be between 1 and 255 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CategoryAttributesRequest {
    pub has_sizes: bool,
    pub has_colors: bool,
    #[serde(default)]
    pub size_options: Vec<String>,
    #[serde(default)]
    pub color_options: Vec<String>,
}
