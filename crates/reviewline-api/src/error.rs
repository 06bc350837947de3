//! Error types for the aggregation API.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use reviewline_aggregator::AggregateError;

/// Errors that can occur in the aggregation API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body is not a well-formed review document.
    #[error(transparent)]
    InvalidInput(#[from] AggregateError),

    /// An invalid query parameter was provided.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, index) = match &self {
            Self::InvalidInput(AggregateError::InvalidInput { index, .. }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, *index)
            }
            Self::InvalidQuery(_) => (StatusCode::BAD_REQUEST, None),
        };

        let mut body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });
        if let (Some(index), Some(object)) = (index, body.as_object_mut()) {
            object.insert("index".to_owned(), serde_json::json!(index));
        }

        (status, axum::Json(body)).into_response()
    }
}
