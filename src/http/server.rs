//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request ID, metrics, timeout, body limit)
//! - Bind server to listener and serve until shutdown

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    handler::Handler,
    http::StatusCode,
    middleware,
    routing::{get, MethodRouter},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::behavior;
use crate::config::{CompatConfig, ServiceConfig};
use crate::http::landing;
use crate::http::request::assign_request_id;
use crate::inspection;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub compat: CompatConfig,
}

/// GET, POST, PUT, DELETE, PATCH and TRACE all routed to `handler`.
fn six_methods<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    get(handler.clone())
        .post(handler.clone())
        .put(handler.clone())
        .delete(handler.clone())
        .patch(handler.clone())
        .trace(handler)
}

/// Build the complete application router with all middleware layers.
pub fn app(config: &ServiceConfig) -> Router {
    let state = AppState {
        compat: config.compat,
    };

    Router::new()
        .route("/", get(landing::index))
        .route("/headers", get(inspection::headers))
        .route("/ip", get(inspection::ip))
        .route("/user_agent", get(inspection::user_agent))
        .route("/response_headers", six_methods(inspection::response_headers))
        .route("/anything", six_methods(inspection::anything))
        .route("/anything/", six_methods(inspection::anything))
        .route("/anything/{*path}", six_methods(inspection::anything))
        .route("/status/{codes}", six_methods(behavior::status))
        .route("/cache", get(behavior::cache))
        .route("/etag/{etag}", get(behavior::etag))
        .route(
            "/cookies",
            get(behavior::list_cookies).post(behavior::create_cookie),
        )
        .route(
            "/cookies/{name}",
            get(behavior::get_cookie)
                .put(behavior::upsert_cookie)
                .delete(behavior::delete_cookie),
        )
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.timeouts.request_secs),
        ))
        .layer(middleware::from_fn(metrics::track_requests))
        .layer(middleware::from_fn(assign_request_id))
        .layer(TraceLayer::new_for_http())
}

/// HTTP server for the inspection service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Self {
        let router = app(&config);
        Self { router, config }
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            strict_if_match = self.config.compat.strict_if_match,
            validate_all_status_codes = self.config.compat.validate_all_status_codes,
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Resolve once the shutdown coordinator fires (or is dropped).
async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    let _ = shutdown.recv().await;
    tracing::info!("Shutdown signal received");
}
