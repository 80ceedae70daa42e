//! # bulldog-api
//!
//! HTTP API layer for Bulldog built on Axum.
//!
//! Provides the auth and resource endpoints, the `AuthUser` extractor,
//! request DTOs with validation, CORS and request logging middleware, and
//! the mapping from `AppError` to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
