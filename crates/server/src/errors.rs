use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::Envelope;
use service::errors::ServiceError;
use service::product::validation::ValidationError;
use thiserror::Error;
use tracing::error;

/// Every failure a product route can answer with, rendered as the `{success: false, ...}` envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body failed its rule set.
    #[error("Validation error")]
    Validation(ValidationError),
    /// `:id` failed its rule set.
    #[error("Invalid parameters")]
    InvalidParams(ValidationError),
    #[error("{0}")]
    NotFound(&'static str),
    /// `message` is the stable route-specific text; `detail` is whatever the store said.
    #[error("{message}: {detail}")]
    Internal { message: &'static str, detail: String },
}

impl ApiError {
    /// Map a service failure, using `context` as the 500 message.
    pub fn from_service(e: ServiceError, context: &'static str) -> Self {
        match e {
            ServiceError::Model(models::errors::ModelError::Validation(msg)) => {
                ApiError::Validation(ValidationError::single("", msg))
            }
            ServiceError::NotFound(_) => ApiError::NotFound("Product not found"),
            other => ApiError::Internal { message: context, detail: other.to_string() },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidParams(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(v) => Envelope::failure("Validation error").with_issues(v.issues),
            ApiError::InvalidParams(v) => Envelope::failure("Invalid parameters").with_error(v.to_string()),
            ApiError::NotFound(msg) => Envelope::failure(msg),
            ApiError::Internal { message, detail } => {
                error!(error = %detail, "{message}");
                Envelope::failure(message).with_error(detail)
            }
        };
        (status, Json(body)).into_response()
    }
}
