//! Credential verification against the account store.

use std::sync::Arc;

use tracing::debug;

use bulldog_core::traits::AccountStore;

use super::hasher::PasswordHasher;
use crate::error::AuthError;
use crate::identity::Identity;

/// Plaintext hashed once at startup; verified against on unknown
/// identifiers so both failure paths cost one Argon2 verification.
const DUMMY_PASSWORD: &str = "bulldog-dummy-password";

/// Checks an (identifier, secret) pair against the stored hash.
#[derive(Clone)]
pub struct CredentialVerifier {
    accounts: Arc<dyn AccountStore>,
    hasher: PasswordHasher,
    dummy_hash: String,
}

impl std::fmt::Debug for CredentialVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialVerifier").finish_non_exhaustive()
    }
}

impl CredentialVerifier {
    /// Creates a verifier reading from `accounts`.
    pub fn new(accounts: Arc<dyn AccountStore>, hasher: PasswordHasher) -> Result<Self, AuthError> {
        let dummy_hash = hasher.hash_password(DUMMY_PASSWORD)?;
        Ok(Self {
            accounts,
            hasher,
            dummy_hash,
        })
    }

    /// Returns the identity for a matching pair, or `InvalidCredentials`.
    ///
    /// Unknown identifiers and wrong secrets are indistinguishable to the
    /// caller. Store failures surface as `AuthError::Internal`.
    pub async fn verify(&self, identifier: &str, secret: &str) -> Result<Identity, AuthError> {
        let Some(record) = self.accounts.find_by_identifier(identifier).await? else {
            let _ = self.hasher.verify_password(secret, &self.dummy_hash);
            debug!("Login attempt for unknown identifier");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify_password(secret, &record.password_hash)? {
            debug!(account_id = record.account_id, "Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(Identity::new(record.account_id, record.identifier))
    }
}
