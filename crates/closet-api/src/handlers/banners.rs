use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use closet_core::models::{BannerRequest, MarketingBanner};
use closet_core::AppError;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ListBannersQuery {
    /// When true, only banners marked active (the storefront carousel view).
    #[serde(default)]
    pub active: bool,
}

#[utoipa::path(
    get,
    path = "/api/v1/banners",
    tag = "banners",
    params(("active" = Option<bool>, Query, description = "Only active banners")),
    responses(
        (status = 200, description = "Banner list in display order", body = [MarketingBanner]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_banners(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListBannersQuery>,
) -> Result<Json<Vec<MarketingBanner>>, HttpAppError> {
    Ok(Json(state.banners.list(query.active).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/banners/{id}",
    tag = "banners",
    params(("id" = Uuid, Path, description = "Banner id")),
    responses(
        (status = 200, description = "Banner", body = MarketingBanner),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_banner(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MarketingBanner>, HttpAppError> {
    let banner = state
        .banners
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Banner not found".to_string()))?;

    Ok(Json(banner))
}

#[utoipa::path(
    post,
    path = "/api/v1/banners",
    tag = "banners",
    request_body = BannerRequest,
    responses(
        (status = 201, description = "Banner created", body = MarketingBanner),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, req))]
pub async fn create_banner(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<BannerRequest>,
) -> Result<(StatusCode, Json<MarketingBanner>), HttpAppError> {
    let banner = state.banners.create(&req).await?;
    Ok((StatusCode::CREATED, Json(banner)))
}

#[utoipa::path(
    put,
    path = "/api/v1/banners/{id}",
    tag = "banners",
    params(("id" = Uuid, Path, description = "Banner id")),
    request_body = BannerRequest,
    responses(
        (status = 200, description = "Banner updated", body = MarketingBanner),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, req))]
pub async fn update_banner(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<BannerRequest>,
) -> Result<Json<MarketingBanner>, HttpAppError> {
    let banner = state
        .banners
        .update(id, &req)
        .await?
        .ok_or_else(|| AppError::NotFound("Banner not found".to_string()))?;

    Ok(Json(banner))
}

#[utoipa::path(
    delete,
    path = "/api/v1/banners/{id}",
    tag = "banners",
    params(("id" = Uuid, Path, description = "Banner id")),
    responses(
        (status = 204, description = "Banner deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn delete_banner(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpAppError> {
    if !state.banners.delete(id).await? {
        return Err(AppError::NotFound("Banner not found".to_string()).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
