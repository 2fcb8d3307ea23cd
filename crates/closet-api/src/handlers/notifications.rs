//! Admin order-notification endpoints over the in-process feed, plus an SSE
//! stream relaying transient toasts.

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use closet_core::models::OrderNotification;
use closet_core::AppError;
use futures::stream::Stream;
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::broadcast;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct UnreadCountResponse {
    pub unread: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MarkAllReadResponse {
    pub updated: usize,
}

/// Notifications, most recent first.
#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    tag = "notifications",
    responses(
        (status = 200, description = "Notification list", body = [OrderNotification])
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<OrderNotification>> {
    Json(state.feed.list().await)
}

#[utoipa::path(
    get,
    path = "/api/v1/notifications/unread-count",
    tag = "notifications",
    responses((status = 200, description = "Unread count", body = UnreadCountResponse))
)]
#[tracing::instrument(skip(state))]
pub async fn unread_count(State(state): State<Arc<AppState>>) -> Json<UnreadCountResponse> {
    Json(UnreadCountResponse {
        unread: state.feed.unread_count().await,
    })
}

/// Mark one notification read (idempotent).
#[utoipa::path(
    post,
    path = "/api/v1/notifications/{id}/read",
    tag = "notifications",
    params(("id" = Uuid, Path, description = "Notification id")),
    responses(
        (status = 204, description = "Marked read"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpAppError> {
    if !state.feed.mark_read(id).await? {
        return Err(AppError::NotFound("Notification not found".to_string()).into());
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/notifications/read-all",
    tag = "notifications",
    responses((status = 200, description = "All marked read", body = MarkAllReadResponse))
)]
#[tracing::instrument(skip(state))]
pub async fn mark_all_read(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MarkAllReadResponse>, HttpAppError> {
    let updated = state.feed.mark_all_read().await?;
    Ok(Json(MarkAllReadResponse { updated }))
}

/// Empty the feed and its persisted mirror.
#[utoipa::path(
    delete,
    path = "/api/v1/notifications",
    tag = "notifications",
    responses((status = 204, description = "Feed cleared"))
)]
#[tracing::instrument(skip(state))]
pub async fn clear_notifications(
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, HttpAppError> {
    state.feed.clear_all().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Server-sent toast stream for the admin bell.
#[utoipa::path(
    get,
    path = "/api/v1/notifications/stream",
    tag = "notifications",
    responses((status = 200, description = "SSE stream of order toasts"))
)]
pub async fn stream_notifications(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.feed.subscribe();

    let stream = futures::stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(toast) => {
                    let event = Event::default()
                        .event("order")
                        .json_data(&toast)
                        .unwrap_or_else(|_| Event::default().event("order"));
                    return Some((Ok::<_, Infallible>(event), rx));
                }
                // Slow consumers skip missed toasts; the feed itself is the
                // durable record.
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
