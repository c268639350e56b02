//! `/status/{codes}`: answer with a caller-chosen status code.

use axum::{
    extract::{Path, State},
    response::Response,
};
use rand::seq::SliceRandom;

use crate::config::CompatConfig;
use crate::http::response::{empty, ApiError};
use crate::http::server::AppState;
use crate::http::status_codes::parse_status_token;

/// Pick one comma-separated token uniformly at random and respond with it.
///
/// By default only the drawn token is validated; see
/// [`CompatConfig::validate_all_status_codes`].
pub async fn status(
    State(state): State<AppState>,
    Path(codes): Path<String>,
) -> Result<Response, ApiError> {
    let token = select_token(&codes, &state.compat)?;
    let status = parse_status_token(token)?;

    tracing::debug!(codes = %codes, selected = %status.as_u16(), "Status selected");
    Ok(empty(status))
}

fn select_token<'a>(codes: &'a str, compat: &CompatConfig) -> Result<&'a str, ApiError> {
    let tokens: Vec<&str> = codes.split(',').collect();

    if compat.validate_all_status_codes {
        if let Some(bad) = tokens.iter().find(|t| parse_status_token(t).is_err()) {
            return Err(ApiError::UnknownStatusCode(bad.to_string()));
        }
    }

    // `split` always yields at least one item
    tokens
        .choose(&mut rand::thread_rng())
        .copied()
        .ok_or_else(|| ApiError::UnknownStatusCode(codes.to_string()))
}
