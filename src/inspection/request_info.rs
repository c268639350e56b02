//! Facts about the caller: headers, peer address, user agent.

use std::net::SocketAddr;

use axum::{
    extract::ConnectInfo,
    http::{header, HeaderMap},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::http::request::collapse_headers;

#[derive(Debug, Serialize)]
pub struct IpAddress {
    pub ip_address: String,
}

#[derive(Debug, Serialize)]
pub struct UserAgent {
    pub user_agent: String,
}

pub async fn headers(headers: HeaderMap) -> Json<Map<String, Value>> {
    Json(collapse_headers(&headers))
}

/// Peer address of the TCP connection. Forwarding headers are not consulted.
pub async fn ip(ConnectInfo(peer): ConnectInfo<SocketAddr>) -> Json<IpAddress> {
    Json(IpAddress {
        ip_address: peer.ip().to_string(),
    })
}

pub async fn user_agent(headers: HeaderMap) -> Json<UserAgent> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default();
    Json(UserAgent { user_agent })
}
