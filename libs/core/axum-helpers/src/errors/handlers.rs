use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::{AppError, messages};

/// Router fallback for unknown routes
pub async fn not_found() -> Response {
    AppError::NotFound(messages::NOT_FOUND_ROUTE.to_string()).into_response()
}

/// Give the bare 408 produced by the timeout layer the shared error body
pub async fn timeout_response(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return AppError::RequestTimeout.into_response();
    }
    response
}
