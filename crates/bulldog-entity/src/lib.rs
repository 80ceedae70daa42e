//! # bulldog-entity
//!
//! Domain entity models for Bulldog. Every struct in this crate
//! represents a database table row or the input needed to write one.
//! Row types derive `sqlx::FromRow`.

pub mod expense;
pub mod pet;
pub mod user;
