//! # bulldog-auth
//!
//! Authentication core for Bulldog.
//!
//! ## Modules
//!
//! - `password`: Argon2id hashing and credential verification
//! - `jwt`: token issuance and validation
//! - `revocation`: revoked-token set with expiry and background sweep
//! - `session`: login, refresh, and logout flows

pub mod error;
pub mod identity;
pub mod jwt;
pub mod password;
pub mod revocation;
pub mod session;

pub use error::{AuthError, TokenError};
pub use identity::Identity;
pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenKind, TokenPair};
pub use password::{CredentialVerifier, PasswordHasher};
pub use revocation::{RevocationStore, RevocationSweeper};
pub use session::{LoginOutcome, SessionManager};
