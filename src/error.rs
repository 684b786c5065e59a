use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Domain errors raised by the service layer. The web layer translates
/// these into HTTP responses; callers never see raw sqlx errors.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("cannot target yourself with this request")]
    SelfRequest,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("an active relation already exists")]
    DuplicateRequest,

    #[error("record not found")]
    NotFound,

    #[error("actor lacks rights over the target record")]
    Forbidden,

    #[error("transition not allowed from the current status")]
    InvalidState,

    /// Non-fatal: callers log this and continue with a null coordinate.
    #[error("geocoding service unavailable")]
    GeocodingUnavailable,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServiceError::SelfRequest => (StatusCode::BAD_REQUEST, self.to_string()),
            ServiceError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ServiceError::DuplicateRequest => (StatusCode::CONFLICT, self.to_string()),
            ServiceError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ServiceError::Forbidden => (StatusCode::FORBIDDEN, self.to_string()),
            ServiceError::InvalidState => (StatusCode::CONFLICT, self.to_string()),
            ServiceError::GeocodingUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, self.to_string())
            }
            ServiceError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
