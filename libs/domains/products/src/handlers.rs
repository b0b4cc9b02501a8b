//! HTTP handlers for Products API

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::errors::responses::InternalServerErrorResponse;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{NotFoundBody, ProductNotFoundResponse, ProductResult};
use crate::models::{
    CreateProduct, DELETED_MESSAGE, DataResponse, DeletedResponse, Product, ProductListResponse,
    ProductResponse, UpdateProduct,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;
use crate::validation::{
    Finding, Location, ValidNewProduct, ValidProductId, ValidProductUpdate, ValidationErrorBody,
    ValidationFailedResponse,
};

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        toggle_availability,
        delete_product,
    ),
    components(
        schemas(
            Product, CreateProduct, UpdateProduct,
            ProductResponse, ProductListResponse, DeletedResponse,
            Finding, Location, ValidationErrorBody, NotFoundBody
        ),
        responses(
            ProductNotFoundResponse,
            ValidationFailedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product)
                .put(update_product)
                .patch(toggle_availability)
                .delete(delete_product),
        )
        .with_state(shared_service)
}

/// List all products ordered by id
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "List of products", body = ProductListResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<DataResponse<Vec<Product>>>> {
    let products = service.list_products().await?;
    Ok(Json(DataResponse::new(products)))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = ProductResponse),
        (status = 400, response = ValidationFailedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidNewProduct(input): ValidNewProduct,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(product))))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, response = ValidationFailedResponse),
        (status = 404, response = ProductNotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidProductId(id): ValidProductId,
) -> ProductResult<Json<DataResponse<Product>>> {
    let product = service.get_product(id).await?;
    Ok(Json(DataResponse::new(product)))
}

/// Replace name, price and availability of a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = ProductResponse),
        (status = 400, response = ValidationFailedResponse),
        (status = 404, response = ProductNotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidProductUpdate { id, input }: ValidProductUpdate,
) -> ProductResult<Json<DataResponse<Product>>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(DataResponse::new(product)))
}

/// Flip the availability of a product. The request body is ignored.
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Availability toggled", body = ProductResponse),
        (status = 400, response = ValidationFailedResponse),
        (status = 404, response = ProductNotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn toggle_availability<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidProductId(id): ValidProductId,
) -> ProductResult<Json<DataResponse<Product>>> {
    let product = service.toggle_availability(id).await?;
    Ok(Json(DataResponse::new(product)))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted successfully", body = DeletedResponse),
        (status = 400, response = ValidationFailedResponse),
        (status = 404, response = ProductNotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidProductId(id): ValidProductId,
) -> ProductResult<Json<DataResponse<&'static str>>> {
    service.delete_product(id).await?;
    Ok(Json(DataResponse::new(DELETED_MESSAGE)))
}
