//! Request handlers, one module per area

pub mod claims;
pub mod documents;
pub mod health;
pub mod hr;
pub mod review;

use std::str::FromStr;

use crate::error::ApiError;

/// Parses a path id, with or without its display prefix
pub(crate) fn parse_id<T: FromStr>(raw: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid id: {raw}")))
}
