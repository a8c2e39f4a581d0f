//! Route handlers.

pub mod health;
pub mod items;
pub mod metrics;
pub mod orders;

use std::str::FromStr;

use crate::error::ApiError;

/// Parses a path identifier, rejecting anything that is not an integer.
fn parse_id<T: FromStr>(raw: &str, what: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid {what} ID")))
}
