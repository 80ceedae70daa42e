//! Convenience result type alias for Bulldog.

use crate::error::AppError;

/// A specialized `Result` type for Bulldog operations.
pub type AppResult<T> = Result<T, AppError>;
