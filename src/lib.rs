//! HTTP inspection and echo service library.

pub mod behavior;
pub mod config;
pub mod http;
pub mod inspection;
pub mod lifecycle;
pub mod observability;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
