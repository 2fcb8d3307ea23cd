use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use closet_core::models::{DeliveryLocation, DeliveryLocationRequest};
use closet_core::AppError;
use std::sync::Arc;
use uuid::Uuid;

/// Delivery options grouped by region/area.
#[utoipa::path(
    get,
    path = "/api/v1/delivery-locations",
    tag = "delivery",
    responses(
        (status = 200, description = "Delivery locations", body = [DeliveryLocation]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_delivery_locations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DeliveryLocation>>, HttpAppError> {
    Ok(Json(state.delivery.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/delivery-locations/{id}",
    tag = "delivery",
    params(("id" = Uuid, Path, description = "Delivery location id")),
    responses(
        (status = 200, description = "Delivery location", body = DeliveryLocation),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_delivery_location(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeliveryLocation>, HttpAppError> {
    let location = state
        .delivery
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Delivery location not found".to_string()))?;

    Ok(Json(location))
}

#[utoipa::path(
    post,
    path = "/api/v1/delivery-locations",
    tag = "delivery",
    request_body = DeliveryLocationRequest,
    responses(
        (status = 201, description = "Delivery location created", body = DeliveryLocation),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, req))]
pub async fn create_delivery_location(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<DeliveryLocationRequest>,
) -> Result<(StatusCode, Json<DeliveryLocation>), HttpAppError> {
    let location = state.delivery.create(&req).await?;
    Ok((StatusCode::CREATED, Json(location)))
}

#[utoipa::path(
    put,
    path = "/api/v1/delivery-locations/{id}",
    tag = "delivery",
    params(("id" = Uuid, Path, description = "Delivery location id")),
    request_body = DeliveryLocationRequest,
    responses(
        (status = 200, description = "Delivery location updated", body = DeliveryLocation),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, req))]
pub async fn update_delivery_location(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<DeliveryLocationRequest>,
) -> Result<Json<DeliveryLocation>, HttpAppError> {
    let location = state
        .delivery
        .update(id, &req)
        .await?
        .ok_or_else(|| AppError::NotFound("Delivery location not found".to_string()))?;

    Ok(Json(location))
}

#[utoipa::path(
    delete,
    path = "/api/v1/delivery-locations/{id}",
    tag = "delivery",
    params(("id" = Uuid, Path, description = "Delivery location id")),
    responses(
        (status = 204, description = "Delivery location deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn delete_delivery_location(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpAppError> {
    if !state.delivery.delete(id).await? {
        return Err(AppError::NotFound("Delivery location not found".to_string()).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
