use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use closet_core::models::{
    Category, CategoryAttributes, CategoryAttributesRequest, CreateCategoryRequest,
};
use closet_core::AppError;
use std::sync::Arc;
use uuid::Uuid;

/// All categories, alphabetical.
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "categories",
    responses(
        (status = 200, description = "Category list", body = [Category]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Category>>, HttpAppError> {
    Ok(Json(state.categories.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    tag = "categories",
    params(("id" = Uuid, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category", body = Category),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Category>, HttpAppError> {
    let category = state
        .categories
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

    Ok(Json(category))
}

#[utoipa::path(
    post,
    path = "/api/v1/categories",
    tag = "categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, req))]
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), HttpAppError> {
    let category = state.categories.create(&req).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    tag = "categories",
    params(("id" = Uuid, Path, description = "Category id")),
    request_body = CreateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, req))]
pub async fn update_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<CreateCategoryRequest>,
) -> Result<Json<Category>, HttpAppError> {
    let category = state
        .categories
        .update(id, &req)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

    Ok(Json(category))
}

#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    tag = "categories",
    params(("id" = Uuid, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpAppError> {
    if !state.categories.delete(id).await? {
        return Err(AppError::NotFound("Category not found".to_string()).into());
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Variant configuration for a category (sizes/colors and allowed values).
#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}/attributes",
    tag = "categories",
    params(("id" = Uuid, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category attributes", body = CategoryAttributes),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_category_attributes(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<CategoryAttributes>, HttpAppError> {
    let attributes = state
        .categories
        .attributes(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category attributes not found".to_string()))?;

    Ok(Json(attributes))
}

#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}/attributes",
    tag = "categories",
    params(("id" = Uuid, Path, description = "Category id")),
    request_body = CategoryAttributesRequest,
    responses(
        (status = 200, description = "Category attributes upserted", body = CategoryAttributes),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, req))]
pub async fn upsert_category_attributes(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<CategoryAttributesRequest>,
) -> Result<Json<CategoryAttributes>, HttpAppError> {
    if state.categories.get(id).await?.is_none() {
        return Err(AppError::NotFound("Category not found".to_string()).into());
    }

    let attributes = state.categories.upsert_attributes(id, &req).await?;
    Ok(Json(attributes))
}
