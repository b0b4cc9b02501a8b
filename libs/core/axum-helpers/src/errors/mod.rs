pub mod codes;
pub mod handlers;
pub mod messages;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Body of every error answered through [`AppError`].
///
/// ```json
/// {
///   "code": 1005,
///   "error": "INTERNAL_ERROR",
///   "message": "An internal server error occurred"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
}

/// Render `code` with `message` under `status`
pub fn error_response(status: StatusCode, code: ErrorCode, message: String) -> Response {
    let body = Json(ErrorResponse {
        code: code.code(),
        error: code.as_str().to_string(),
        message,
    });

    (status, body).into_response()
}

/// Error type shared by the HTTP layer.
///
/// Domain errors convert into it; its `IntoResponse` logs once with the
/// integer code and renders [`ErrorResponse`]. Messages given to
/// `InternalServerError` are sent to the client, so they must not carry
/// store or driver text.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Request Timeout")]
    RequestTimeout,

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::BadRequest(_) => ErrorCode::BadRequest,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::RequestTimeout => ErrorCode::RequestTimeout,
            AppError::InternalServerError(_) => ErrorCode::InternalError,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.error_code();

        match &self {
            AppError::InternalServerError(_) => {
                tracing::error!(error_code = code.code(), "{}", self)
            }
            AppError::RequestTimeout => {
                tracing::warn!(error_code = code.code(), "{}", self)
            }
            AppError::BadRequest(_) | AppError::NotFound(_) => {
                tracing::info!(error_code = code.code(), "{}", self)
            }
        }

        let message = match self {
            AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::InternalServerError(msg) => msg,
            AppError::RequestTimeout => code.default_message().to_string(),
        };

        error_response(status, code, message)
    }
}
