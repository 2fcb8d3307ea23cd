use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use closet_core::models::{
    CreateAddressRequest, CreateCustomerRequest, Customer, CustomerAddress, PaginatedResponse,
    UpdateCustomerRequest,
};
use closet_core::AppError;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ListCustomersQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/customers",
    tag = "customers",
    params(
        ("page" = Option<u32>, Query, description = "Page number, 1-based"),
        ("per_page" = Option<u32>, Query, description = "Page size, capped at 100"),
        ("search" = Option<String>, Query, description = "Name or email filter")
    ),
    responses(
        (status = 200, description = "Paged customer list", body = PaginatedResponse<Customer>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_customers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListCustomersQuery>,
) -> Result<Json<PaginatedResponse<Customer>>, HttpAppError> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);

    let (customers, total) = state
        .customers
        .list(page, per_page, query.search.as_deref())
        .await?;

    Ok(Json(PaginatedResponse::new(customers, total, page, per_page)))
}

#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}",
    tag = "customers",
    params(("id" = Uuid, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer", body = Customer),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Customer>, HttpAppError> {
    let customer = state
        .customers
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

    Ok(Json(customer))
}

#[utoipa::path(
    post,
    path = "/api/v1/customers",
    tag = "customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = Customer),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, req))]
pub async fn create_customer(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<Customer>), HttpAppError> {
    let customer = state.customers.create(&req).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

#[utoipa::path(
    put,
    path = "/api/v1/customers/{id}",
    tag = "customers",
    params(("id" = Uuid, Path, description = "Customer id")),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = Customer),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, req))]
pub async fn update_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateCustomerRequest>,
) -> Result<Json<Customer>, HttpAppError> {
    let customer = state
        .customers
        .update(id, &req)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

    Ok(Json(customer))
}

/// Saved delivery addresses, default first.
#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}/addresses",
    tag = "customers",
    params(("id" = Uuid, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Address list", body = [CustomerAddress]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_addresses(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CustomerAddress>>, HttpAppError> {
    Ok(Json(state.customers.addresses(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/customers/{id}/addresses",
    tag = "customers",
    params(("id" = Uuid, Path, description = "Customer id")),
    request_body = CreateAddressRequest,
    responses(
        (status = 201, description = "Address created", body = CustomerAddress),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, req))]
pub async fn create_address(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<CreateAddressRequest>,
) -> Result<(StatusCode, Json<CustomerAddress>), HttpAppError> {
    if state.customers.get(id).await?.is_none() {
        return Err(AppError::NotFound("Customer not found".to_string()).into());
    }

    let address = state.customers.create_address(id, &req).await?;
    Ok((StatusCode::CREATED, Json(address)))
}

#[utoipa::path(
    put,
    path = "/api/v1/customers/{id}/addresses/{address_id}",
    tag = "customers",
    params(
        ("id" = Uuid, Path, description = "Customer id"),
        ("address_id" = Uuid, Path, description = "Address id")
    ),
    request_body = CreateAddressRequest,
    responses(
        (status = 200, description = "Address updated", body = CustomerAddress),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, req))]
pub async fn update_address(
    State(state): State<Arc<AppState>>,
    Path((id, address_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(req): ValidatedJson<CreateAddressRequest>,
) -> Result<Json<CustomerAddress>, HttpAppError> {
    let address = state
        .customers
        .update_address(id, address_id, &req)
        .await?
        .ok_or_else(|| AppError::NotFound("Address not found".to_string()))?;

    Ok(Json(address))
}

#[utoipa::path(
    delete,
    path = "/api/v1/customers/{id}/addresses/{address_id}",
    tag = "customers",
    params(
        ("id" = Uuid, Path, description = "Customer id"),
        ("address_id" = Uuid, Path, description = "Address id")
    ),
    responses(
        (status = 204, description = "Address deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn delete_address(
    State(state): State<Arc<AppState>>,
    Path((id, address_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, HttpAppError> {
    if !state.customers.delete_address(id, address_id).await? {
        return Err(AppError::NotFound("Address not found".to_string()).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
