//! Typed path parameter helpers.

use bulldog_core::error::AppError;

/// Parses a numeric id from a path segment or query value.
pub fn parse_id(s: &str) -> Result<i64, AppError> {
    s.parse::<i64>()
        .map_err(|_| AppError::validation(format!("Invalid id: {s}")))
}
