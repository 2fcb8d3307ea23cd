use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use closet_core::models::{AddToCartRequest, CartItem, UpdateCartItemRequest};
use closet_core::AppError;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/v1/cart/{customer_id}",
    tag = "cart",
    params(("customer_id" = Uuid, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Cart contents", body = [CartItem]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_cart(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<Vec<CartItem>>, HttpAppError> {
    Ok(Json(state.cart.list(customer_id).await?))
}

/// Add a product/variant to the cart; duplicates increment quantity.
#[utoipa::path(
    post,
    path = "/api/v1/cart/{customer_id}",
    tag = "cart",
    params(("customer_id" = Uuid, Path, description = "Customer id")),
    request_body = AddToCartRequest,
    responses(
        (status = 201, description = "Cart item", body = CartItem),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, req))]
pub async fn add_to_cart(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<AddToCartRequest>,
) -> Result<(StatusCode, Json<CartItem>), HttpAppError> {
    if state.products.get(req.product_id).await?.is_none() {
        return Err(AppError::NotFound("Product not found".to_string()).into());
    }

    let item = state.cart.add(customer_id, &req).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    put,
    path = "/api/v1/cart/{customer_id}/items/{item_id}",
    tag = "cart",
    params(
        ("customer_id" = Uuid, Path, description = "Customer id"),
        ("item_id" = Uuid, Path, description = "Cart item id")
    ),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Cart item updated", body = CartItem),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, req))]
pub async fn update_cart_item(
    State(state): State<Arc<AppState>>,
    Path((customer_id, item_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(req): ValidatedJson<UpdateCartItemRequest>,
) -> Result<Json<CartItem>, HttpAppError> {
    let item = state
        .cart
        .update_quantity(customer_id, item_id, req.quantity)
        .await?
        .ok_or_else(|| AppError::NotFound("Cart item not found".to_string()))?;

    Ok(Json(item))
}

#[utoipa::path(
    delete,
    path = "/api/v1/cart/{customer_id}/items/{item_id}",
    tag = "cart",
    params(
        ("customer_id" = Uuid, Path, description = "Customer id"),
        ("item_id" = Uuid, Path, description = "Cart item id")
    ),
    responses(
        (status = 204, description = "Cart item removed"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn remove_cart_item(
    State(state): State<Arc<AppState>>,
    Path((customer_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, HttpAppError> {
    if !state.cart.remove(customer_id, item_id).await? {
        return Err(AppError::NotFound("Cart item not found".to_string()).into());
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/v1/cart/{customer_id}",
    tag = "cart",
    params(("customer_id" = Uuid, Path, description = "Customer id")),
    responses((status = 204, description = "Cart cleared"))
)]
#[tracing::instrument(skip(state))]
pub async fn clear_cart(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<Uuid>,
) -> Result<StatusCode, HttpAppError> {
    state.cart.clear(customer_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
