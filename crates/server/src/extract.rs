//! Validating extractors. Handlers list `ProductId` before `Valid<T>`, so a bad
//! id is reported before the body is even read.

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde_json::{Map, Value};
use service::product::validation::{self, RuleSet, ValidationError};

use crate::errors::ApiError;

/// A `:id` path segment shaped like a product id, lower-cased to match stored ids.
#[derive(Debug, Clone)]
pub struct ProductId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::InvalidParams(ValidationError::single("id", e.body_text())))?;
        validation::validate_product_id(&id).map_err(ApiError::InvalidParams)?;
        Ok(ProductId(id.to_ascii_lowercase()))
    }
}

/// A JSON body that passed the rule set `T`. An empty body counts as `{}`.
#[derive(Debug)]
pub struct Valid<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Valid<T>
where
    S: Send + Sync,
    T: RuleSet,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::Validation(ValidationError::single("", e.body_text())))?;
        let raw = parse_body(&bytes).map_err(ApiError::Validation)?;
        T::validate(&raw).map(Valid).map_err(ApiError::Validation)
    }
}

fn parse_body(bytes: &[u8]) -> Result<Value, ValidationError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(bytes).map_err(|e| ValidationError::single("", format!("Malformed JSON body: {e}")))
}
