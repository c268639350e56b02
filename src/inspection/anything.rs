//! `/anything` and `/anything/{path}`: echo the whole request as JSON.

use std::net::SocketAddr;

use axum::{
    body::Bytes,
    extract::{ConnectInfo, FromRequest, Multipart, Request},
    http::request::Parts,
    Json,
};
use serde_json::{json, Map, Value};

use crate::http::request::{
    collapse_headers, full_url, is_form_content, is_multipart_content, json_body, multi_map,
    query_args,
};
use crate::http::response::ApiError;

/// Parsed request body, split the way the echo reports it.
#[derive(Debug, Default)]
struct Payload {
    form: Map<String, Value>,
    files: Map<String, Value>,
    json: Option<Value>,
}

impl Payload {
    async fn read(parts: Parts, body: axum::body::Body) -> Result<Self, ApiError> {
        let mut payload = Payload::default();

        if is_multipart_content(&parts.headers) {
            let request = Request::from_parts(parts, body);
            let mut multipart = Multipart::from_request(request, &()).await?;
            let mut fields = Vec::new();

            while let Some(field) = multipart.next_field().await? {
                let name = field.name().unwrap_or_default().to_string();
                match field.file_name().map(str::to_owned) {
                    Some(filename) => {
                        let content_type = field.content_type().map(str::to_owned);
                        let data = field.bytes().await?;
                        payload.files.insert(
                            name,
                            json!({
                                "filename": filename,
                                "content_type": content_type,
                                "size": data.len(),
                            }),
                        );
                    }
                    None => fields.push((name, field.text().await?)),
                }
            }
            payload.form = multi_map(fields);
            return Ok(payload);
        }

        let is_form = is_form_content(&parts.headers);
        let headers = parts.headers.clone();
        let bytes = Bytes::from_request(Request::from_parts(parts, body), &()).await?;

        if is_form {
            payload.form = multi_map(
                url::form_urlencoded::parse(&bytes).map(|(k, v)| (k.into_owned(), v.into_owned())),
            );
        } else {
            payload.json = json_body(&headers, &bytes)?;
        }
        Ok(payload)
    }
}

/// Everything the server knows about the request.
///
/// The optional trailing path only has to match; it is not reported
/// separately (it is part of `url`).
pub async fn anything(
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request,
) -> Result<Json<Value>, ApiError> {
    let (parts, body) = request.into_parts();

    let args = query_args(parts.uri.query());
    let headers = collapse_headers(&parts.headers);
    let method = parts.method.to_string();
    let url = full_url(&parts);

    let payload = Payload::read(parts, body).await?;

    Ok(Json(json!({
        "args": args,
        "files": payload.files,
        "form": payload.form,
        "headers": headers,
        "json": payload.json,
        "method": method,
        "origin": peer.ip().to_string(),
        "url": url,
    })))
}
