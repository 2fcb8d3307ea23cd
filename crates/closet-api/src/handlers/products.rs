use crate::constants::DEFAULT_LOW_STOCK_THRESHOLD;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use closet_core::models::{
    CreateProductRequest, LowStockVariant, PaginatedResponse, Product, ProductDetail,
    UpdateProductRequest,
};
use closet_core::AppError;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub category: Option<Uuid>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LowStockQuery {
    pub threshold: Option<i32>,
}

/// List products, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/products",
    tag = "products",
    params(
        ("page" = Option<u32>, Query, description = "Page number, 1-based"),
        ("per_page" = Option<u32>, Query, description = "Page size, capped at 100"),
        ("category" = Option<Uuid>, Query, description = "Filter by category"),
        ("search" = Option<String>, Query, description = "Name filter")
    ),
    responses(
        (status = 200, description = "Paged product list", body = PaginatedResponse<Product>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<PaginatedResponse<Product>>, HttpAppError> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);

    let (products, total) = state
        .products
        .list(page, per_page, query.category, query.search.as_deref())
        .await?;

    Ok(Json(PaginatedResponse::new(products, total, page, per_page)))
}

/// Variants at or under the restock threshold.
#[utoipa::path(
    get,
    path = "/api/v1/products/low-stock",
    tag = "products",
    params(("threshold" = Option<i32>, Query, description = "Stock threshold, default 5")),
    responses(
        (status = 200, description = "Low-stock variants", body = [LowStockVariant]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn low_stock(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LowStockQuery>,
) -> Result<Json<Vec<LowStockVariant>>, HttpAppError> {
    let threshold = query.threshold.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);
    let variants = state.products.low_stock(threshold).await?;
    Ok(Json(variants))
}

/// Product detail with variants.
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    tag = "products",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product detail", body = ProductDetail),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProductDetail>, HttpAppError> {
    let detail = state
        .products
        .get_detail(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    Ok(Json(detail))
}

/// Create a product with its variants.
#[utoipa::path(
    post,
    path = "/api/v1/products",
    tag = "products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductDetail),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, req))]
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductDetail>), HttpAppError> {
    let detail = state.products.create(&req).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// Partially update a product; a present variant list replaces the set.
#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    tag = "products",
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductDetail),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, req))]
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateProductRequest>,
) -> Result<Json<ProductDetail>, HttpAppError> {
    let detail = state
        .products
        .update(id, &req)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    Ok(Json(detail))
}

/// Delete a product and its variants.
#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    tag = "products",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpAppError> {
    if !state.products.delete(id).await? {
        return Err(AppError::NotFound("Product not found".to_string()).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
