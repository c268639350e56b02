//! Metrics collection and exposition.
//!
//! # Metrics
//! - `inspector_requests_total` (counter): requests by method, route, status
//! - `inspector_request_duration_seconds` (histogram): latency by method, route
//!
//! # Design Decisions
//! - Route label is the matched template (`/cookies/{name}`), never the raw
//!   path, so label cardinality stays bounded. Requests that match no route
//!   share the `unmatched` label

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::http::request::RequestIdExt;

pub const REQUESTS_TOTAL: &str = "inspector_requests_total";
pub const REQUEST_DURATION: &str = "inspector_request_duration_seconds";

/// Route label for requests that reached the fallback.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one finished request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];
    let latency_labels = [("method", method.to_string()), ("route", route.to_string())];

    metrics::counter!(REQUESTS_TOTAL, &labels).increment(1);
    metrics::histogram!(REQUEST_DURATION, &latency_labels).record(start.elapsed().as_secs_f64());
}

/// Route template the request matched, or [`UNMATCHED_ROUTE`].
pub fn route_label(request: &Request) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map_or(UNMATCHED_ROUTE, MatchedPath::as_str)
        .to_owned()
}

/// Middleware that times each request and records it under its route template.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = route_label(&request);
    let request_id = request
        .request_id()
        .map(|id| id.as_str().to_owned())
        .unwrap_or_default();

    let response = next.run(request).await;
    let status = response.status().as_u16();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        route = %route,
        status,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Request completed"
    );
    record_request(&method, &route, status, start);
    response
}
