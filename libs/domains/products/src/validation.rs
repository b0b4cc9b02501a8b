//! Request validation for the products routes.
//!
//! Each rule inspects one path parameter or body field and returns either the
//! typed value or the findings it produced. Rules never short-circuit each
//! other: a request with three bad fields gets all of their findings back in
//! one response. [`gate`] turns the combined result into either the typed
//! input or a [`ValidationRejection`] (HTTP 400).
//!
//! The extractors at the bottom of this module run the rules for a route, so a
//! handler only ever sees input that already passed its gate.

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use axum_helpers::AppError;
use serde::Serialize;
#[allow(unused_imports)]
use serde_json::json;
use serde_json::{Map, Value};
use utoipa::{ToResponse, ToSchema};
use validator::{ValidateLength, ValidateRange};

use crate::models::{CreateProduct, UpdateProduct};

pub const ID_NOT_VALID: &str = "Id not valid";
pub const NAME_EMPTY: &str = "This name cant be empty";
pub const PRICE_NOT_NUMERIC: &str = "Value is not valid";
pub const PRICE_EMPTY: &str = "Price cannot be empty";
pub const PRICE_NOT_POSITIVE: &str = "Price is not valid";
pub const AVAILABILITY_NOT_VALID: &str = "Value for availability not valid";

/// Where the offending value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Params,
    Body,
}

/// A single recorded validation failure
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Finding {
    #[schema(example = "Id not valid")]
    pub msg: String,
    #[schema(example = "id")]
    pub param: String,
    pub location: Location,
    /// The offending value; omitted when the field was absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Finding {
    fn new(msg: &str, param: &str, location: Location, value: Option<&Value>) -> Self {
        Self {
            msg: msg.to_string(),
            param: param.to_string(),
            location,
            value: value.cloned(),
        }
    }

    fn body(msg: &str, param: &str, value: Option<&Value>) -> Self {
        Self::new(msg, param, Location::Body, value)
    }
}

/// Outcome of a rule: the typed value, or every finding the rule produced
pub type Checked<T> = Result<T, Vec<Finding>>;

/// Combine two rule outcomes, keeping findings in evaluation order.
pub fn both<A, B>(first: Checked<A>, second: Checked<B>) -> Checked<(A, B)> {
    match (first, second) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        (first, second) => Err(first
            .err()
            .unwrap_or_default()
            .into_iter()
            .chain(second.err().unwrap_or_default())
            .collect()),
    }
}

/// Halt with a 400 if any rule produced findings, otherwise pass the value on.
pub fn gate<T>(checked: Checked<T>) -> Result<T, ValidationRejection> {
    checked.map_err(ValidationRejection)
}

/// Gate rejection: HTTP 400 with `{ "errors": [Finding, ...] }`
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRejection(pub Vec<Finding>);

impl ValidationRejection {
    pub fn findings(&self) -> &[Finding] {
        &self.0
    }
}

/// Body of a 400 gate rejection
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorBody {
    pub errors: Vec<Finding>,
}

#[derive(ToResponse)]
#[response(
    description = "Bad Request - one finding per failed rule",
    content_type = "application/json",
    example = json!({
        "errors": [
            { "msg": "Value is not valid", "param": "price", "location": "body", "value": "abc" },
            { "msg": "Price is not valid", "param": "price", "location": "body", "value": "abc" }
        ]
    })
)]
pub struct ValidationFailedResponse(pub ValidationErrorBody);

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        tracing::debug!(findings = self.0.len(), "Request rejected by validation");
        (
            StatusCode::BAD_REQUEST,
            Json(ValidationErrorBody { errors: self.0 }),
        )
            .into_response()
    }
}

// Rules

/// `id` path parameter: optional sign and digits that fit an `i32`.
pub fn id_param(raw: &str) -> Checked<i32> {
    raw.parse::<i32>().map_err(|_| {
        vec![Finding::new(
            ID_NOT_VALID,
            "id",
            Location::Params,
            Some(&Value::String(raw.to_string())),
        )]
    })
}

/// `name` body field: a string with at least one character.
pub fn name_field(body: &Map<String, Value>) -> Checked<String> {
    let value = body.get("name");
    match value {
        Some(Value::String(name)) if name.validate_length(Some(1), None, None) => {
            Ok(name.clone())
        }
        _ => Err(vec![Finding::body(NAME_EMPTY, "name", value)]),
    }
}

/// `price` body field. The numeric, presence and positivity checks each add
/// their own finding.
pub fn price_field(body: &Map<String, Value>) -> Checked<f64> {
    let value = body.get("price");
    let parsed = value.and_then(numeric_value);
    let mut findings = Vec::new();

    if parsed.is_none() {
        findings.push(Finding::body(PRICE_NOT_NUMERIC, "price", value));
    }
    if is_blank(value) {
        findings.push(Finding::body(PRICE_EMPTY, "price", value));
    }
    match parsed {
        Some(price) if price.validate_range(None, None, Some(0.0), None) => {
            if findings.is_empty() {
                return Ok(price);
            }
        }
        _ => findings.push(Finding::body(PRICE_NOT_POSITIVE, "price", value)),
    }

    Err(findings)
}

/// `availability` body field: a boolean, one of `"true"`, `"false"`, `"1"`,
/// `"0"`, or the number `1` or `0`.
pub fn availability_field(body: &Map<String, Value>) -> Checked<bool> {
    let value = body.get("availability");
    match value {
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(Value::Number(n)) if n.as_f64() == Some(1.0) => Ok(true),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(false),
        Some(Value::String(s)) if s == "true" || s == "1" => Ok(true),
        Some(Value::String(s)) if s == "false" || s == "0" => Ok(false),
        _ => Err(vec![Finding::body(
            AVAILABILITY_NOT_VALID,
            "availability",
            value,
        )]),
    }
}

/// Rules for `POST /`.
pub fn create_rules(body: &Map<String, Value>) -> Checked<CreateProduct> {
    both(name_field(body), price_field(body)).map(|(name, price)| CreateProduct { name, price })
}

/// Rules for `PUT /{id}`.
pub fn update_rules(raw_id: &str, body: &Map<String, Value>) -> Checked<(i32, UpdateProduct)> {
    let fields = both(
        both(name_field(body), price_field(body)),
        availability_field(body),
    );
    both(id_param(raw_id), fields).map(|(id, ((name, price), availability))| {
        (
            id,
            UpdateProduct {
                name,
                price,
                availability,
            },
        )
    })
}

/// Finite `f64` behind a JSON number or decimal string. Strings too long for
/// `f64` parse to infinity and count as not numeric.
fn numeric_value(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if is_decimal(s) => s.parse().ok(),
        _ => None,
    };
    parsed.filter(|p: &f64| p.is_finite())
}

/// Optional sign, digits, at most one decimal point, ending in a digit.
fn is_decimal(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => ("", digits),
    };
    !frac_part.is_empty()
        && int_part.bytes().all(|b| b.is_ascii_digit())
        && frac_part.bytes().all(|b| b.is_ascii_digit())
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        _ => false,
    }
}

// Extractors

/// Read the request body as a JSON object. An empty or non-object body counts
/// as an object with no fields; syntactically invalid JSON is a 400.
async fn json_object<S>(req: Request, state: &S) -> Result<Map<String, Value>, Response>
where
    S: Send + Sync,
{
    let bytes = Bytes::from_request(req, state)
        .await
        .map_err(|e| e.into_response())?;

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Ok(Map::new()),
        Err(e) => {
            tracing::debug!(error = %e, "Rejected malformed JSON body");
            Err(AppError::BadRequest("Malformed JSON body".to_string()).into_response())
        }
    }
}

async fn raw_id<S>(parts: &mut Parts, state: &S) -> Result<String, Response>
where
    S: Send + Sync,
{
    let Path(id) = Path::<String>::from_request_parts(parts, state)
        .await
        .map_err(|e| e.into_response())?;
    Ok(id)
}

/// Validated `id` path parameter.
///
/// ```ignore
/// async fn get_product(ValidProductId(id): ValidProductId) -> String {
///     format!("Product ID: {}", id)
/// }
/// ```
pub struct ValidProductId(pub i32);

impl<S> FromRequestParts<S> for ValidProductId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = raw_id(parts, state).await?;
        let id = gate(id_param(&raw)).map_err(IntoResponse::into_response)?;
        Ok(ValidProductId(id))
    }
}

/// Validated body for product creation.
pub struct ValidNewProduct(pub CreateProduct);

impl<S> FromRequest<S> for ValidNewProduct
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = json_object(req, state).await?;
        let input = gate(create_rules(&body)).map_err(IntoResponse::into_response)?;
        Ok(ValidNewProduct(input))
    }
}

/// Validated `id` and body for a full update. Path and body findings are
/// reported together.
pub struct ValidProductUpdate {
    pub id: i32,
    pub input: UpdateProduct,
}

impl<S> FromRequest<S> for ValidProductUpdate
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();
        let raw = raw_id(&mut parts, state).await?;
        let body = json_object(Request::from_parts(parts, body), state).await?;

        let (id, input) = gate(update_rules(&raw, &body)).map_err(IntoResponse::into_response)?;
        Ok(ValidProductUpdate { id, input })
    }
}
