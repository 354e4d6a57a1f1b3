use crate::model::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use snip_core::EngineError;
use tracing::error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Boundary-level error: what a handler can fail with.
///
/// Engine errors are carried verbatim and mapped to status codes here,
/// keeping the engine ignorant of HTTP.
#[derive(Debug)]
pub enum ApiError {
    /// The requested id has no live record. A normal negative outcome,
    /// not a fault.
    NotFound,
    /// The request itself is unacceptable (empty url, empty batch).
    BadRequest(String),
    /// Anything the engine reported.
    Engine(EngineError),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        Self::Engine(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Engine(err) => {
                let status = match &err {
                    EngineError::InvalidId(_) => StatusCode::BAD_REQUEST,
                    EngineError::Collision(_) => StatusCode::CONFLICT,
                    EngineError::AllocationExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
                    EngineError::Store(_) | EngineError::Cache(_) => {
                        error!(error = %err, "backend failure");
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, err.to_string())
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
