//! Account store seam consumed by credential verification.

use async_trait::async_trait;

use crate::result::AppResult;

/// The stored credential for one account.
///
/// The auth core reads this record to verify a login attempt; it never
/// sees or stores a plaintext secret.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    /// Numeric account identifier.
    pub account_id: i64,
    /// Login identifier (the account email).
    pub identifier: String,
    /// PHC-formatted one-way hash of the secret.
    pub password_hash: String,
}

impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("account_id", &self.account_id)
            .field("identifier", &self.identifier)
            .finish_non_exhaustive()
    }
}

/// Looks up credential records by login identifier.
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// Returns the credential record for `identifier`, or `None` when no
    /// account uses it. Lookup errors are reported as `Err`.
    async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<CredentialRecord>>;
}
