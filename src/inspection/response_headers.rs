//! `/response_headers`: report the headers an empty response would carry.
//!
//! Best effort: only headers the response itself holds are visible here;
//! anything added later by middleware or the transport (`date`,
//! `x-request-id`) is not.

use axum::{
    http::{header, HeaderValue},
    response::IntoResponse,
    Json,
};
use serde_json::{Map, Value};

use crate::http::request::collapse_headers;

pub async fn response_headers() -> Json<Map<String, Value>> {
    let body = "";
    let mut probe = body.into_response();
    probe
        .headers_mut()
        .insert(header::CONTENT_LENGTH, HeaderValue::from(body.len()));

    Json(collapse_headers(probe.headers()))
}
