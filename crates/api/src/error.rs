use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use motoserwis_core::document::{PathError, TypeKeyError};
use motoserwis_core::editor::ActionError;
use motoserwis_core::{AccessError, AssetError, AuthError};
use serde_json::json;

/// API error type mapped to JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("internal error: {0}")]
    Internal(String),

    #[error("content error: {0}")]
    Access(#[from] AccessError),
}

impl From<TypeKeyError> for ApiError {
    fn from(err: TypeKeyError) -> Self {
        ApiError::BadRequest(format!("invalid page: {err}"))
    }
}

impl From<PathError> for ApiError {
    fn from(err: PathError) -> Self {
        ApiError::BadRequest(format!("invalid field path: {err}"))
    }
}

impl From<ActionError> for ApiError {
    fn from(err: ActionError) -> Self {
        ApiError::BadRequest(format!("invalid editor action: {err}"))
    }
}

impl From<AssetError> for ApiError {
    fn from(err: AssetError) -> Self {
        match err {
            AssetError::NotAnImage(_) | AssetError::EmptyName => {
                ApiError::BadRequest(err.to_string())
            }
            AssetError::Io(io) => ApiError::Internal(format!("upload failed: {io}")),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Internal(format!("auth failure: {err}"))
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::BadRequest(format!("malformed upload: {}", err.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "notFound", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "badRequest", msg.clone()),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Authentication required".to_string(),
            ),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internalError",
                    "An internal error occurred".to_string(),
                )
            }
            ApiError::Access(err) => {
                tracing::error!("Content store error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internalError",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "success": false,
            "error": {
                "type": error_type,
                "message": message,
                "statusCode": status.as_u16(),
            }
        });

        (status, Json(body)).into_response()
    }
}

/// Convenience type alias for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;
