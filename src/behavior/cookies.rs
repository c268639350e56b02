//! Cookie jar handlers.
//!
//! Reads come from the request's `Cookie` header, writes go out as
//! `Set-Cookie`. A cookie sent with an empty value counts as missing.

use axum::{
    body::Bytes,
    extract::Path,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use cookie::Cookie;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::http::request::{json_body, Cookies};
use crate::http::response::{empty, raw_json, ApiError};

/// Body accepted by `POST /cookies` and `PUT /cookies/{name}`.
#[derive(Debug, Deserialize)]
struct CookieSpec {
    name: String,
    value: String,
}

impl CookieSpec {
    fn from_body(headers: &HeaderMap, body: &Bytes) -> Result<Self, ApiError> {
        let json = json_body(headers, body)?.ok_or_else(|| {
            ApiError::InvalidCookie("expected a JSON object with `name` and `value`".into())
        })?;
        if !json.is_object() {
            return Err(ApiError::InvalidCookie(
                "expected a JSON object with `name` and `value`".into(),
            ));
        }
        let spec: CookieSpec =
            serde_json::from_value(json).map_err(|e| ApiError::InvalidCookie(e.to_string()))?;

        if !is_token(&spec.name) {
            return Err(ApiError::InvalidCookie(format!(
                "`{}` is not a valid cookie name",
                spec.name
            )));
        }
        if !is_cookie_value(&spec.value) {
            return Err(ApiError::InvalidCookie(format!(
                "`{}` is not a valid cookie value",
                spec.value
            )));
        }
        Ok(spec)
    }

    /// `name=value` with no attributes.
    fn pair(&self) -> String {
        Cookie::new(self.name.as_str(), self.value.as_str()).to_string()
    }
}

/// RFC 6265 `cookie-name`: a non-empty HTTP token.
fn is_token(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&b)
        })
}

/// RFC 6265 `cookie-value`: cookie-octets, optionally wrapped in one pair of
/// double quotes. No whitespace, `"`, `,`, `;` or `\`.
fn is_cookie_value(value: &str) -> bool {
    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    inner
        .bytes()
        .all(|b| b.is_ascii_graphic() && !matches!(b, b'"' | b',' | b';' | b'\\'))
}

fn set_cookie(response: &mut Response, cookie: &str) -> Result<(), ApiError> {
    let value = HeaderValue::from_str(cookie).map_err(|_| {
        ApiError::InvalidCookie("cookie contains characters not allowed in a header".into())
    })?;
    response.headers_mut().append(header::SET_COOKIE, value);
    Ok(())
}

pub async fn list_cookies(cookies: Cookies) -> Json<Value> {
    Json(Value::Object(
        cookies
            .0
            .into_iter()
            .map(|(name, value)| (name, Value::String(value)))
            .collect(),
    ))
}

/// Echo the body with 201 and tell the client to store the cookie.
pub async fn create_cookie(headers: HeaderMap, body: Bytes) -> Result<Response, ApiError> {
    let spec = CookieSpec::from_body(&headers, &body)?;
    let mut response = raw_json(StatusCode::CREATED, body);
    set_cookie(&mut response, &spec.pair())?;

    tracing::debug!(cookie = %spec.name, "Cookie created");
    Ok(response)
}

pub async fn get_cookie(
    Path(name): Path<String>,
    cookies: Cookies,
) -> Result<Json<Value>, ApiError> {
    let value = cookies
        .get(&name)
        .ok_or_else(|| ApiError::CookieNotFound(name.clone()))?
        .to_string();

    let mut body = Map::new();
    body.insert(name, Value::String(value));
    Ok(Json(Value::Object(body)))
}

/// 200 if the path-named cookie exists, 201 otherwise.
///
/// The `Set-Cookie` written uses the body's name and value, which need not
/// match the path.
pub async fn upsert_cookie(
    Path(name): Path<String>,
    cookies: Cookies,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let status = if cookies.get(&name).is_some() {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    let spec = CookieSpec::from_body(&headers, &body)?;
    let pair = spec.pair();

    let mut response = (status, pair.clone()).into_response();
    set_cookie(&mut response, &pair)?;

    tracing::debug!(path_name = %name, cookie = %spec.name, status = %status, "Cookie upserted");
    Ok(response)
}

pub async fn delete_cookie(
    Path(name): Path<String>,
    cookies: Cookies,
) -> Result<Response, ApiError> {
    if cookies.get(&name).is_none() {
        return Err(ApiError::CookieNotFound(name));
    }

    let mut response = empty(StatusCode::OK);
    set_cookie(&mut response, &format!("{name}=; Expires=0"))?;

    tracing::debug!(cookie = %name, "Cookie expired");
    Ok(response)
}
