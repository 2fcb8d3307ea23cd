use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use closet_core::models::{AddToWishlistRequest, WishlistItem};
use closet_core::AppError;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/v1/wishlist/{customer_id}",
    tag = "wishlist",
    params(("customer_id" = Uuid, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Wishlist contents", body = [WishlistItem]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_wishlist(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<Vec<WishlistItem>>, HttpAppError> {
    Ok(Json(state.wishlist.list(customer_id).await?))
}

/// Idempotent add.
#[utoipa::path(
    post,
    path = "/api/v1/wishlist/{customer_id}",
    tag = "wishlist",
    params(("customer_id" = Uuid, Path, description = "Customer id")),
    request_body = AddToWishlistRequest,
    responses(
        (status = 201, description = "Wishlist item", body = WishlistItem),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, req))]
pub async fn add_to_wishlist(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<Uuid>,
    Json(req): Json<AddToWishlistRequest>,
) -> Result<(StatusCode, Json<WishlistItem>), HttpAppError> {
    if state.products.get(req.product_id).await?.is_none() {
        return Err(AppError::NotFound("Product not found".to_string()).into());
    }

    let item = state.wishlist.add(customer_id, req.product_id).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/wishlist/{customer_id}/{product_id}",
    tag = "wishlist",
    params(
        ("customer_id" = Uuid, Path, description = "Customer id"),
        ("product_id" = Uuid, Path, description = "Product id")
    ),
    responses(
        (status = 204, description = "Wishlist item removed"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn remove_from_wishlist(
    State(state): State<Arc<AppState>>,
    Path((customer_id, product_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, HttpAppError> {
    if !state.wishlist.remove(customer_id, product_id).await? {
        return Err(AppError::NotFound("Wishlist item not found".to_string()).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
