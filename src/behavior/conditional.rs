//! Conditional request simulation: `/cache` and `/etag/{etag}`.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::Response,
};

use crate::http::request::json_body;
use crate::http::response::{empty, raw_json, ApiError};
use crate::http::server::AppState;

/// Outcome of evaluating conditional headers against a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    NotModified,
    PreconditionFailed,
    Proceed,
}

/// 304 when `If-Modified-Since` or `If-None-Match` is present, whatever its value.
pub fn cache_validation(headers: &HeaderMap) -> Validation {
    if headers.contains_key(header::IF_MODIFIED_SINCE) || headers.contains_key(header::IF_NONE_MATCH)
    {
        Validation::NotModified
    } else {
        Validation::Proceed
    }
}

/// Compare `If-None-Match` then `If-Match` byte-for-byte against `etag`.
///
/// With `strict_if_match`, a missing `If-Match` never equals the etag and the
/// request fails with 412.
pub fn etag_validation(headers: &HeaderMap, etag: &str, strict_if_match: bool) -> Validation {
    let if_none_match = headers.get(header::IF_NONE_MATCH).map(|v| v.as_bytes());
    let if_match = headers.get(header::IF_MATCH).map(|v| v.as_bytes());

    if if_none_match == Some(etag.as_bytes()) {
        return Validation::NotModified;
    }

    match if_match {
        Some(value) if value != etag.as_bytes() => Validation::PreconditionFailed,
        None if strict_if_match => Validation::PreconditionFailed,
        _ => Validation::Proceed,
    }
}

/// Echo a JSON body byte-for-byte; anything that is not JSON echoes as empty.
fn echo(headers: &HeaderMap, body: Bytes) -> Result<Response, ApiError> {
    match json_body(headers, &body)? {
        Some(_) => Ok(raw_json(StatusCode::OK, body)),
        None => Ok(empty(StatusCode::OK)),
    }
}

pub async fn cache(headers: HeaderMap, body: Bytes) -> Result<Response, ApiError> {
    match cache_validation(&headers) {
        Validation::NotModified => Ok(empty(StatusCode::NOT_MODIFIED)),
        _ => echo(&headers, body),
    }
}

pub async fn etag(
    State(state): State<AppState>,
    Path(etag): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let outcome = etag_validation(&headers, &etag, state.compat.strict_if_match);
    tracing::debug!(etag = %etag, outcome = ?outcome, "ETag evaluated");

    match outcome {
        Validation::NotModified => Ok(empty(StatusCode::NOT_MODIFIED)),
        Validation::PreconditionFailed => Ok(empty(StatusCode::PRECONDITION_FAILED)),
        Validation::Proceed => echo(&headers, body),
    }
}
