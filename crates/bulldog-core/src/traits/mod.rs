//! Trait definitions for collaborators injected into the auth core.

pub mod account;

pub use account::{AccountStore, CredentialRecord};
