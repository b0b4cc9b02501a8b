//! Error codes carried by every [`ErrorResponse`](super::ErrorResponse).
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::InternalError;
//! assert_eq!(code.as_str(), "INTERNAL_ERROR");
//! assert_eq!(code.code(), 1005);
//! assert_eq!(code.default_message(), "An internal server error occurred");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A string identifier for clients, an integer for logs and dashboards, and a
/// default message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The request was rejected before reaching a handler
    BadRequest,
    NotFound,
    InternalError,
    /// The request exceeded the server's time budget
    RequestTimeout,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
            Self::RequestTimeout => "REQUEST_TIMEOUT",
        }
    }

    /// Integer code for logging and monitoring
    pub fn code(&self) -> i32 {
        match self {
            Self::BadRequest => 1000,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::RequestTimeout => 1007,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::BadRequest => "The request could not be processed",
            Self::NotFound => "The requested resource was not found",
            Self::InternalError => "An internal server error occurred",
            Self::RequestTimeout => "The request timed out",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
