//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, route table)
//!     → request.rs (request ID, header/cookie/body projections)
//!     → inspection / behavior handlers
//!     → response.rs (error rendering, empty and echo responses)
//!     → Send to client
//! ```

pub mod landing;
pub mod request;
pub mod response;
pub mod server;
pub mod status_codes;

pub use request::{RequestId, RequestIdExt, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{app, AppState, HttpServer};
