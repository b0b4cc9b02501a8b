use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Product entity - the single resource exposed by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Store-assigned identifier, never reused
    #[schema(example = 1)]
    pub id: i32,
    /// Product name
    #[schema(example = "Monitor 49 inch")]
    pub name: String,
    /// Unit price, always greater than zero
    #[schema(example = 300.0)]
    pub price: f64,
    /// Whether the product can currently be ordered
    #[schema(example = true)]
    pub availability: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1))]
    #[schema(example = "Monitor Curved 49 inch")]
    pub name: String,
    #[validate(range(exclusive_min = 0.0))]
    #[schema(example = 399.0)]
    pub price: f64,
}

/// DTO for a full update; every mutable field is replaced
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1))]
    #[schema(example = "Monitor Curved 49 inch")]
    pub name: String,
    #[validate(range(exclusive_min = 0.0))]
    #[schema(example = 399.0)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: bool,
}

/// Success envelope: every 2xx body is `{ "data": ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

// Concrete envelopes for the OpenAPI document

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ProductResponse {
    data: Product,
}

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ProductListResponse {
    data: Vec<Product>,
}

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct DeletedResponse {
    #[schema(example = "Product deleted")]
    data: String,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Confirmation string returned by the delete endpoint
pub const DELETED_MESSAGE: &str = "Product deleted";

impl Product {
    /// Create a new product from CreateProduct DTO
    pub fn new(id: i32, input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: input.name,
            price: input.price,
            availability: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace name, price and availability from an UpdateProduct DTO
    pub fn apply_update(&mut self, update: UpdateProduct) {
        self.name = update.name;
        self.price = update.price;
        self.availability = update.availability;
        self.updated_at = Utc::now();
    }

    /// Flip availability, leaving every other field untouched
    pub fn toggle_availability(&mut self) {
        self.availability = !self.availability;
        self.updated_at = Utc::now();
    }
}
