//! Inspection handlers: report what the server sees of a request.
//!
//! # Data Flow
//! ```text
//! request
//!     → request_info.rs     (/headers, /ip, /user_agent)
//!     → response_headers.rs (/response_headers)
//!     → anything.rs         (/anything[/{path}])
//!     → JSON body
//! ```
//!
//! # Design Decisions
//! - Pure functions of the request: same request, same body
//! - Header names are reported Title-Case with one value per name

pub mod anything;
pub mod request_info;
pub mod response_headers;

pub use anything::anything;
pub use request_info::{headers, ip, user_agent};
pub use response_headers::response_headers;
