//! # bulldog-database
//!
//! Store traits for users, pets, and expenses, with a PostgreSQL
//! implementation backed by sqlx and an in-memory implementation for
//! local runs and tests.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryDatabase;
pub use store::{ExpenseStore, PetStore, Stores, UserStore};
