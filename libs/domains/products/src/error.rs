use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::{AppError, errors::messages};
use serde::Serialize;
#[allow(unused_imports)]
use serde_json::json;
use thiserror::Error;
use utoipa::{ToResponse, ToSchema};

/// Body text returned for every lookup miss.
pub const NOT_FOUND_MESSAGE: &str = "Product not found";

/// 404 body: `{ "error": "Product not found" }`
#[derive(Debug, Serialize, ToSchema)]
pub struct NotFoundBody {
    #[schema(example = "Product not found")]
    pub error: String,
}

#[derive(ToResponse)]
#[response(
    description = "Product not found",
    content_type = "application/json",
    example = json!({ "error": "Product not found" })
)]
pub struct ProductNotFoundResponse(pub NotFoundBody);

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(i32),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Persistence(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<sea_orm::DbErr> for ProductError {
    fn from(err: sea_orm::DbErr) -> Self {
        ProductError::Persistence(err.to_string())
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            // The store adapter already logged the cause; the client only gets
            // the generic message.
            ProductError::Persistence(_) => {
                AppError::InternalServerError(messages::INTERNAL_ERROR.to_string())
            }
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        match self {
            ProductError::NotFound(id) => {
                tracing::info!(product_id = id, "Product not found");
                let body = NotFoundBody {
                    error: NOT_FOUND_MESSAGE.to_string(),
                };
                (StatusCode::NOT_FOUND, Json(body)).into_response()
            }
            other => {
                let app_error: AppError = other.into();
                app_error.into_response()
            }
        }
    }
}
