//! Handler tests for Products domain
//!
//! These tests drive the products router end to end over the in-memory store:
//! - Validation rules and the 400 body
//! - Response envelopes and status codes
//! - Not-found handling for every id route
//! - Store failures surfacing as a generic 500

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> (Router, InMemoryProductRepository) {
    let repo = InMemoryProductRepository::new();
    let service = ProductService::new(repo.clone());
    (handlers::router(service), repo)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn seed(repo: &InMemoryProductRepository, name: &str, price: f64) -> Product {
    repo.create(CreateProduct {
        name: name.to_string(),
        price,
    })
    .await
    .unwrap()
}

fn messages(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["msg"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_create_with_string_price_returns_201() {
    let (app, _) = app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "Mouse - Testing", "price": "50" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: DataResponse<Product> = json_body(response.into_body()).await;
    assert_eq!(body.data.name, "Mouse - Testing");
    assert_eq!(body.data.price, 50.0);
    assert!(body.data.availability);
}

#[tokio::test]
async fn test_create_then_get_yields_equal_fields() {
    let (app, _) = app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "Monitor 49 inch", "price": 300 }),
        ))
        .await
        .unwrap();
    let created: DataResponse<Product> = json_body(response.into_body()).await;

    let uri = format!("/{}", created.data.id);
    let first: DataResponse<Product> = json_body(
        app.clone()
            .oneshot(empty_request("GET", &uri))
            .await
            .unwrap()
            .into_body(),
    )
    .await;
    let second: DataResponse<Product> =
        json_body(app.oneshot(empty_request("GET", &uri)).await.unwrap().into_body()).await;

    assert_eq!(first.data, created.data);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_create_with_missing_price_reports_every_finding() {
    let (app, repo) = app();

    let response = app
        .oneshot(json_request("POST", "/", json!({ "name": "Cable" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(
        messages(&body),
        vec!["Value is not valid", "Price cannot be empty", "Price is not valid"]
    );
    assert!(body["errors"][0].get("value").is_none());
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_rejects_bad_price_and_empty_name() {
    let (app, repo) = app();

    let cases = [
        json!({ "name": "Cable", "price": 0 }),
        json!({ "name": "Cable", "price": -10 }),
        json!({ "name": "Cable", "price": "abc" }),
        json!({ "name": "", "price": 10 }),
    ];

    for payload in cases {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/", payload.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{payload}");
    }

    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_with_non_numeric_price_body_shape() {
    let (app, _) = app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "Cable", "price": "abc" }),
        ))
        .await
        .unwrap();

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(
        body,
        json!({
            "errors": [
                { "msg": "Value is not valid", "param": "price", "location": "body", "value": "abc" },
                { "msg": "Price is not valid", "param": "price", "location": "body", "value": "abc" }
            ]
        })
    );
}

#[tokio::test]
async fn test_create_with_overflowing_price_is_rejected() {
    let (app, repo) = app();
    let price = format!("1{}", "0".repeat(400));

    let response = app
        .oneshot(json_request("POST", "/", json!({ "name": "X", "price": price })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(messages(&body), vec!["Value is not valid", "Price is not valid"]);
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_with_empty_body_reports_all_fields() {
    let (app, _) = app();

    let response = app.oneshot(empty_request("POST", "/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(messages(&body).len(), 4);
    assert_eq!(body["errors"][0]["param"], "name");
}

#[tokio::test]
async fn test_create_with_malformed_json_returns_400() {
    let (app, repo) = app();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_returns_products_in_id_order() {
    let (app, repo) = app();
    seed(&repo, "b", 2.0).await;
    seed(&repo, "a", 1.0).await;

    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: DataResponse<Vec<Product>> = json_body(response.into_body()).await;
    let names: Vec<&str> = body.data.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["b", "a"]);
}

#[tokio::test]
async fn test_list_empty_store() {
    let (app, _) = app();

    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body, json!({ "data": [] }));
}

#[tokio::test]
async fn test_get_unknown_id_returns_404() {
    let (app, _) = app();

    let response = app.oneshot(empty_request("GET", "/999")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body, json!({ "error": "Product not found" }));
}

#[tokio::test]
async fn test_get_with_invalid_id_returns_400() {
    let (app, _) = app();

    let response = app.oneshot(empty_request("GET", "/abc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(
        body,
        json!({
            "errors": [
                { "msg": "Id not valid", "param": "id", "location": "params", "value": "abc" }
            ]
        })
    );
}

#[tokio::test]
async fn test_every_id_route_answers_404_for_unknown_id() {
    let (app, _) = app();

    let requests = [
        empty_request("GET", "/41"),
        json_request(
            "PUT",
            "/41",
            json!({ "name": "Desk", "price": 10, "availability": true }),
        ),
        empty_request("PATCH", "/41"),
        empty_request("DELETE", "/41"),
    ];

    for request in requests {
        let method = request.method().clone();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method}");
    }
}

#[tokio::test]
async fn test_update_replaces_all_fields() {
    let (app, repo) = app();
    let product = seed(&repo, "Desk", 100.0).await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/{}", product.id),
            json!({ "name": "Standing Desk", "price": "250.5", "availability": "false" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: DataResponse<Product> = json_body(response.into_body()).await;
    assert_eq!(body.data.id, product.id);
    assert_eq!(body.data.name, "Standing Desk");
    assert_eq!(body.data.price, 250.5);
    assert!(!body.data.availability);
    assert_eq!(body.data.created_at, product.created_at);
}

#[tokio::test]
async fn test_update_reports_id_and_body_findings_together() {
    let (app, repo) = app();
    let product = seed(&repo, "Desk", 100.0).await;

    let response = app
        .oneshot(json_request(
            "PUT",
            "/x",
            json!({ "name": "", "price": 5, "availability": "maybe" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(
        messages(&body),
        vec![
            "Id not valid",
            "This name cant be empty",
            "Value for availability not valid"
        ]
    );

    let stored = repo.get_by_id(product.id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Desk");
}

#[tokio::test]
async fn test_toggle_twice_restores_availability() {
    let (app, repo) = app();
    let product = seed(&repo, "Lamp", 20.0).await;
    let uri = format!("/{}", product.id);

    let response = app
        .clone()
        .oneshot(json_request("PATCH", &uri, json!({ "availability": true })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let first: DataResponse<Product> = json_body(response.into_body()).await;
    assert!(!first.data.availability);
    assert_eq!(first.data.name, "Lamp");
    assert_eq!(first.data.price, 20.0);

    let response = app.oneshot(empty_request("PATCH", &uri)).await.unwrap();
    let second: DataResponse<Product> = json_body(response.into_body()).await;
    assert!(second.data.availability);
}

#[tokio::test]
async fn test_delete_then_get_returns_404() {
    let (app, repo) = app();
    let product = seed(&repo, "Chair", 75.0).await;
    let uri = format!("/{}", product.id);

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body, json!({ "data": "Product deleted" }));

    let response = app.oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Store whose every call fails and counts how often it was reached
#[derive(Default)]
struct FailingRepository {
    calls: Arc<AtomicUsize>,
}

impl FailingRepository {
    fn fail<T>(&self) -> ProductResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ProductError::Persistence(
            "could not connect to server: Connection refused".to_string(),
        ))
    }
}

#[async_trait]
impl ProductRepository for FailingRepository {
    async fn list(&self) -> ProductResult<Vec<Product>> {
        self.fail()
    }

    async fn get_by_id(&self, _id: i32) -> ProductResult<Option<Product>> {
        self.fail()
    }

    async fn create(&self, _input: CreateProduct) -> ProductResult<Product> {
        self.fail()
    }

    async fn update(&self, _product: Product) -> ProductResult<Product> {
        self.fail()
    }

    async fn delete(&self, _id: i32) -> ProductResult<bool> {
        self.fail()
    }
}

#[tokio::test]
async fn test_store_failure_returns_generic_500() {
    let app = handlers::router(ProductService::new(FailingRepository::default()));

    let requests = [
        empty_request("GET", "/"),
        empty_request("GET", "/1"),
        json_request("POST", "/", json!({ "name": "Mouse", "price": 5 })),
        empty_request("PATCH", "/1"),
        empty_request("DELETE", "/1"),
    ];

    for request in requests {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = json_body(response.into_body()).await;
        assert_eq!(body["error"], "INTERNAL_ERROR");
        assert_eq!(body["message"], "An internal server error occurred");
        assert!(!body.to_string().contains("Connection refused"));
    }
}

#[tokio::test]
async fn test_invalid_requests_never_reach_the_store() {
    let repo = FailingRepository::default();
    let calls = Arc::clone(&repo.calls);
    let app = handlers::router(ProductService::new(repo));

    let requests = [
        empty_request("GET", "/abc"),
        json_request("POST", "/", json!({ "name": "", "price": -1 })),
        json_request("PUT", "/1", json!({ "name": "Desk" })),
        empty_request("PATCH", "/1.5"),
        empty_request("DELETE", "/one"),
    ];

    for request in requests {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
