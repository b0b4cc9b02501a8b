//! Messages shared by error responses and their OpenAPI examples.

pub const INTERNAL_ERROR: &str = "An internal server error occurred";
pub const NOT_FOUND_ROUTE: &str = "The requested resource was not found";
