//! Response helpers and the client-facing error type.
//!
//! # Design Decisions
//! - Every client error renders as `{"error": "<message>"}`
//! - 304 and 412 are outcomes, not errors: they carry no body
//! - Echo endpoints return the client's own bytes, not a re-serialization

use axum::{
    body::{Body, Bytes},
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::BytesRejection,
    },
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors a handler reports back to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A `/status` token is not an integer or not a recognized code.
    #[error("Unknown Http code: {0}")]
    UnknownStatusCode(String),

    /// A named cookie was not present in the request.
    #[error("Couldn't find cookie: {0}")]
    CookieNotFound(String),

    /// A cookie write request was missing `name`/`value` or had unusable values.
    #[error("Invalid cookie: {0}")]
    InvalidCookie(String),

    /// The request body could not be parsed in the format it claimed.
    #[error("Failed to parse request body: {0}")]
    MalformedBody(String),

    /// The framework refused to read the body (too large, bad multipart framing).
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::CookieNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UnknownStatusCode(_)
            | ApiError::InvalidCookie(_)
            | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Rejected { status, .. } => *status,
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        ApiError::Rejected {
            status: error.status(),
            message: error.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!(status = %self.status(), error = %self, "Rejecting request");
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// A response with the given status and no body.
pub fn empty(status: StatusCode) -> Response {
    (status, Body::empty()).into_response()
}

/// Echo previously validated JSON bytes back to the client unchanged.
///
/// An empty payload yields an empty body.
pub fn raw_json(status: StatusCode, payload: Bytes) -> Response {
    if payload.is_empty() {
        return empty(status);
    }
    (
        status,
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        )],
        payload,
    )
        .into_response()
}
