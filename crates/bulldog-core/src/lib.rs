//! # bulldog-core
//!
//! Core crate for Bulldog. Contains configuration schemas, the account
//! store trait consumed by the authentication core, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other Bulldog crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
