//! PostgreSQL implementations of the store traits.

pub mod expense;
pub mod pet;
pub mod user;

pub use expense::ExpenseRepository;
pub use pet::PetRepository;
pub use user::UserRepository;

use bulldog_core::error::{AppError, ErrorKind};

/// Postgres SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";
/// Postgres SQLSTATE for foreign key violations.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Maps a sqlx error onto the application taxonomy.
///
/// Constraint violations become client errors; everything else is a
/// database failure carrying `context`.
pub(crate) fn map_db_error(err: sqlx::Error, context: &'static str) -> AppError {
    if let Some(db_err) = err.as_database_error() {
        match db_err.code().as_deref() {
            Some(UNIQUE_VIOLATION) => {
                return AppError::conflict("A user with this email already exists");
            }
            Some(FOREIGN_KEY_VIOLATION) => return AppError::not_found("User not found"),
            _ => {}
        }
    }
    AppError::with_source(ErrorKind::Database, context, err)
}
