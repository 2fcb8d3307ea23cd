use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use closet_core::models::{
    CheckoutRequest, Order, OrderDetail, OrderStatus, PaginatedResponse, UpdateOrderStatusRequest,
};
use closet_core::AppError;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<String>,
    pub region: Option<String>,
}

/// Checkout: create an order with its lines from current prices.
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    tag = "orders",
    request_body = CheckoutRequest,
    responses(
        (status = 201, description = "Order created", body = OrderDetail),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 409, description = "Insufficient stock", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, req), fields(customer_id = %req.customer_id))]
pub async fn checkout(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CheckoutRequest>,
) -> Result<(StatusCode, Json<OrderDetail>), HttpAppError> {
    if state.customers.get(req.customer_id).await?.is_none() {
        return Err(AppError::NotFound("Customer not found".to_string()).into());
    }

    let detail = state.orders.checkout(&req).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

#[utoipa::path(
    get,
    path = "/api/v1/orders",
    tag = "orders",
    params(
        ("page" = Option<u32>, Query, description = "Page number, 1-based"),
        ("per_page" = Option<u32>, Query, description = "Page size, capped at 100"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("region" = Option<String>, Query, description = "Filter by delivery region")
    ),
    responses(
        (status = 200, description = "Paged order list", body = PaginatedResponse<Order>),
        (status = 400, description = "Invalid status filter", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<PaginatedResponse<Order>>, HttpAppError> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);

    if let Some(status) = query.status.as_deref() {
        if OrderStatus::parse(status).is_none() {
            return Err(
                AppError::InvalidInput(format!("Unknown order status: {}", status)).into(),
            );
        }
    }

    let (orders, total) = state
        .orders
        .list(page, per_page, query.status.as_deref(), query.region.as_deref())
        .await?;

    Ok(Json(PaginatedResponse::new(orders, total, page, per_page)))
}

#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    tag = "orders",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order detail", body = OrderDetail),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderDetail>, HttpAppError> {
    let detail = state
        .orders
        .get_detail(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

    Ok(Json(detail))
}

/// Advance (or cancel) an order.
#[utoipa::path(
    put,
    path = "/api/v1/orders/{id}/status",
    tag = "orders",
    params(("id" = Uuid, Path, description = "Order id")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Order updated", body = Order),
        (status = 400, description = "Unknown status", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, req))]
pub async fn update_order_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateOrderStatusRequest>,
) -> Result<Json<Order>, HttpAppError> {
    let status = OrderStatus::parse(&req.status).ok_or_else(|| {
        AppError::InvalidInput(format!("Unknown order status: {}", req.status))
    })?;

    let order = state
        .orders
        .update_status(id, status)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

    Ok(Json(order))
}
