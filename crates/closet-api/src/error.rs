//! HTTP error response conversion
//!
//! **Handler pattern:** return `Result<impl IntoResponse, HttpAppError>` and
//! use `?` — everything that converts into [`closet_core::AppError`] renders
//! consistently (status, JSON body, log level).

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use closet_core::{AppError, ErrorMetadata, LogLevel};
use closet_processing::{PipelineError, ValidationError};
use closet_storage::StorageError;
use serde::{de::DeserializeOwned, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
}

/// Wrapper type for AppError to implement IntoResponse. Necessary because of
/// Rust's orphan rules - IntoResponse (external trait) cannot be implemented
/// for AppError (external type from closet-core) directly.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

impl From<ValidationError> for HttpAppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::FileTooLarge { .. } => {
                HttpAppError(AppError::PayloadTooLarge(err.to_string()))
            }
            other => HttpAppError(AppError::InvalidInput(other.to_string())),
        }
    }
}

impl From<PipelineError> for HttpAppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Busy => HttpAppError(AppError::Conflict(err.to_string())),
            PipelineError::UnknownItem(_) => HttpAppError(AppError::NotFound(err.to_string())),
            PipelineError::NotFailed(_) => HttpAppError(AppError::Conflict(err.to_string())),
            PipelineError::Validation(inner) => inner.into(),
        }
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError(AppError::Storage(err.to_string()))
    }
}

impl From<validator::ValidationErrors> for HttpAppError {
    fn from(err: validator::ValidationErrors) -> Self {
        HttpAppError(AppError::from(err))
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let err = self.0;

        match err.log_level() {
            LogLevel::Error => {
                tracing::error!(error = %err, code = err.error_code(), "Request failed")
            }
            LogLevel::Warn => {
                tracing::warn!(error = %err, code = err.error_code(), "Request failed")
            }
            LogLevel::Debug => {
                tracing::debug!(error = %err, code = err.error_code(), "Request rejected")
            }
        }

        let status = StatusCode::from_u16(err.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = ErrorResponse {
            error: err.client_message(),
            code: err.error_code().to_string(),
            recoverable: err.is_recoverable(),
        };

        (status, Json(body)).into_response()
    }
}

/// JSON extractor that deserializes, then runs `validator` rules, returning
/// the standard [`ErrorResponse`] shape on either failure.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + validator::Validate + Send,
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;

        value.validate().map_err(HttpAppError::from)?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_too_large_maps_to_413() {
        let err: HttpAppError = ValidationError::FileTooLarge {
            size: 10,
            max: 5,
        }
        .into();
        assert_eq!(err.0.http_status_code(), 413);
    }

    #[test]
    fn test_too_many_images_maps_to_400() {
        let err: HttpAppError = ValidationError::TooManyImages {
            existing: 2,
            incoming: 2,
            max: 3,
        }
        .into();
        assert_eq!(err.0.http_status_code(), 400);
    }

    #[test]
    fn test_pipeline_busy_maps_to_409() {
        let err: HttpAppError = PipelineError::Busy.into();
        assert_eq!(err.0.http_status_code(), 409);
    }
}
