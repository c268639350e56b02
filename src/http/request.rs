//! Request handling: correlation IDs and the read-only request view.
//!
//! # Responsibilities
//! - Assign every request an `X-Request-ID` (reuse the client's if present)
//! - Project headers, cookies, query and body into JSON-friendly shapes
//!
//! # Design Decisions
//! - The request ID lives in extensions and on the response only; the
//!   request's own header map is left exactly as the client sent it
//! - Headers collapse to one value per name, last occurrence wins
//! - Cookies keep the first occurrence of a repeated name

use std::collections::BTreeMap;
use std::convert::Infallible;

use axum::{
    body::{Body, Bytes},
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use cookie::Cookie;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::http::response::ApiError;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Correlation ID attached to each request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

/// Access the request ID stored by [`assign_request_id`].
pub trait RequestIdExt {
    fn request_id(&self) -> Option<&RequestId>;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<&RequestId> {
        self.extensions().get::<RequestId>()
    }
}

/// Middleware that tags requests and responses with `X-Request-ID`.
pub async fn assign_request_id(mut req: Request<Body>, next: Next) -> Response {
    let id = req
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(|v| RequestId(v.to_string()))
        .unwrap_or_default();
    let header_value = HeaderValue::from_str(id.as_str()).ok();
    req.extensions_mut().insert(id);

    let mut response = next.run(req).await;
    if let Some(value) = header_value {
        response.headers_mut().insert(X_REQUEST_ID, value);
    }
    response
}

/// `user-agent` → `User-Agent`.
pub fn title_case(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// One JSON string per header name; repeated headers keep their last value.
pub fn collapse_headers(headers: &HeaderMap) -> Map<String, Value> {
    let mut collapsed = Map::new();
    for (name, value) in headers {
        collapsed.insert(
            title_case(name.as_str()),
            Value::String(String::from_utf8_lossy(value.as_bytes()).into_owned()),
        );
    }
    collapsed
}

/// Parse every `Cookie` header into name → value. First occurrence wins.
pub fn parse_cookies(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut cookies = BTreeMap::new();
    for value in headers.get_all(header::COOKIE) {
        let Ok(value) = value.to_str() else {
            continue;
        };
        for cookie in Cookie::split_parse(value).filter_map(Result::ok) {
            cookies
                .entry(cookie.name().to_string())
                .or_insert_with(|| cookie.value_trimmed().to_string());
        }
    }
    cookies
}

/// Cookies sent with the request.
#[derive(Debug, Clone, Default)]
pub struct Cookies(pub BTreeMap<String, String>);

impl Cookies {
    /// Value of a cookie that is present with a non-empty value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

impl<S> FromRequestParts<S> for Cookies
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Cookies(parse_cookies(&parts.headers)))
    }
}

/// Collect `key=value` pairs; a repeated key becomes an array in arrival order.
pub fn multi_map<I>(pairs: I) -> Map<String, Value>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut map = Map::new();
    for (key, value) in pairs {
        match map.get_mut(&key) {
            None => {
                map.insert(key, Value::String(value));
            }
            Some(Value::Array(values)) => values.push(Value::String(value)),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, Value::String(value)]);
            }
        }
    }
    map
}

/// Decoded query parameters.
pub fn query_args(query: Option<&str>) -> Map<String, Value> {
    let query = query.unwrap_or_default();
    multi_map(
        url::form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned())),
    )
}

/// Absolute URL of the request as the client addressed it.
pub fn full_url(parts: &Parts) -> String {
    let host = parts
        .headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .or_else(|| parts.uri.authority().map(|a| a.to_string()))
        .unwrap_or_else(|| "localhost".to_string());
    let path = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    format!("http://{host}{path}")
}

fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or_default().trim())
}

/// Whether the declared content type is JSON. No content type is not JSON.
pub fn is_json_content(headers: &HeaderMap) -> bool {
    content_type(headers).is_some_and(|mime| {
        let mime = mime.to_ascii_lowercase();
        mime == "application/json" || mime.ends_with("+json")
    })
}

/// Whether the body is `application/x-www-form-urlencoded`.
pub fn is_form_content(headers: &HeaderMap) -> bool {
    content_type(headers)
        .is_some_and(|mime| mime.eq_ignore_ascii_case("application/x-www-form-urlencoded"))
}

/// Whether the body is `multipart/form-data`.
pub fn is_multipart_content(headers: &HeaderMap) -> bool {
    content_type(headers).is_some_and(|mime| mime.eq_ignore_ascii_case("multipart/form-data"))
}

/// Parse the body as JSON when it claims to be JSON.
///
/// `Ok(None)` for an empty body or a non-JSON content type. A body that
/// claims JSON but does not parse is a client error.
pub fn json_body(headers: &HeaderMap, body: &Bytes) -> Result<Option<Value>, ApiError> {
    if body.is_empty() || !is_json_content(headers) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| ApiError::MalformedBody(e.to_string()))
}
