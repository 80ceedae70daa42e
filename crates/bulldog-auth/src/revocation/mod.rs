//! Revoked-token tracking.

pub mod store;
pub mod sweeper;

pub use store::RevocationStore;
pub use sweeper::RevocationSweeper;
