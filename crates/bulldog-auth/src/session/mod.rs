//! Login, refresh, and logout flows.

pub mod manager;

pub use manager::{LoginOutcome, SessionManager};
