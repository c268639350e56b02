//! The recognized HTTP status code set.
//!
//! IANA-registered codes plus 418. Sorted so membership is a binary search;
//! the table is a `const`, so concurrent readers need no synchronization.

use axum::http::StatusCode;

use crate::http::response::ApiError;

pub const RECOGNIZED_STATUS_CODES: &[u16] = &[
    100, 101, 102, 103, //
    200, 201, 202, 203, 204, 205, 206, 207, 208, 226, //
    300, 301, 302, 303, 304, 305, 307, 308, //
    400, 401, 402, 403, 404, 405, 406, 407, 408, 409, 410, 411, 412, 413, 414, 415, 416, 417,
    418, 421, 422, 423, 424, 425, 426, 428, 429, 431, 451, //
    500, 501, 502, 503, 504, 505, 506, 507, 508, 510, 511,
];

pub fn is_recognized(code: u16) -> bool {
    RECOGNIZED_STATUS_CODES.binary_search(&code).is_ok()
}

/// Turn a caller-supplied token into a status code.
///
/// Non-integers, out-of-range integers and unregistered codes all fail with
/// the token echoed back verbatim.
pub fn parse_status_token(token: &str) -> Result<StatusCode, ApiError> {
    token
        .parse::<u16>()
        .ok()
        .filter(|code| is_recognized(*code))
        .and_then(|code| StatusCode::from_u16(code).ok())
        .ok_or_else(|| ApiError::UnknownStatusCode(token.to_string()))
}
