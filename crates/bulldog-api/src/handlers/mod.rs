//! Route handlers organized by resource.

pub mod auth;
pub mod expense;
pub mod health;
pub mod pet;
pub mod user;
