//! Behavior handlers: responses whose status or content depends on the request.
//!
//! # Data Flow
//! ```text
//! request
//!     → status.rs       (/status/{codes}: pick a code, answer with it)
//!     → conditional.rs  (/cache, /etag/{etag}: 304 / 412 / echo)
//!     → cookies.rs      (/cookies…: read via Cookie, write via Set-Cookie)
//!     → response
//! ```
//!
//! # Design Decisions
//! - No server-side state; cookies live only in the client's jar
//! - Legacy quirks are kept by default and switchable via `CompatConfig`

pub mod conditional;
pub mod cookies;
pub mod status;

pub use conditional::{cache, etag};
pub use cookies::{create_cookie, delete_cookie, get_cookie, list_cookies, upsert_cookie};
pub use status::status;
