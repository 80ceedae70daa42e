//! Session flow orchestrator: login, refresh, logout, and request
//! authentication.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use bulldog_core::config::AuthConfig;
use bulldog_core::traits::AccountStore;

use crate::error::{AuthError, TokenError};
use crate::identity::Identity;
use crate::jwt::{JwtDecoder, JwtEncoder, TokenKind, TokenPair};
use crate::password::{CredentialVerifier, PasswordHasher};
use crate::revocation::RevocationStore;

/// Result of a successful login or refresh.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Newly issued tokens.
    pub tokens: TokenPair,
    /// The identity they are bound to.
    pub identity: Identity,
}

/// Composes verification, issuance, validation, and revocation.
#[derive(Debug, Clone)]
pub struct SessionManager {
    verifier: Arc<CredentialVerifier>,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
    revocations: Arc<RevocationStore>,
}

impl SessionManager {
    /// Creates a session manager from its parts.
    pub fn new(
        verifier: Arc<CredentialVerifier>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        revocations: Arc<RevocationStore>,
    ) -> Self {
        Self {
            verifier,
            encoder,
            decoder,
            revocations,
        }
    }

    /// Builds the full auth system from configuration and an account store.
    ///
    /// The returned revocation store is the one the decoder consults; hand
    /// it to a [`crate::RevocationSweeper`].
    pub fn from_config(
        config: &AuthConfig,
        accounts: Arc<dyn AccountStore>,
    ) -> Result<Self, AuthError> {
        config.validate()?;
        let revocations = Arc::new(RevocationStore::new());
        let verifier = CredentialVerifier::new(accounts, PasswordHasher::new())?;
        Ok(Self::new(
            Arc::new(verifier),
            Arc::new(JwtEncoder::new(config)),
            Arc::new(JwtDecoder::new(config, revocations.clone())),
            revocations,
        ))
    }

    /// The shared revocation store.
    pub fn revocations(&self) -> &Arc<RevocationStore> {
        &self.revocations
    }

    /// Verifies credentials and issues a token pair.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<LoginOutcome, AuthError> {
        let identity = match self.verifier.verify(identifier, secret).await {
            Ok(identity) => identity,
            Err(AuthError::InvalidCredentials) => {
                warn!("Login failed: invalid credentials");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        let tokens = self.encoder.issue(&identity)?;
        info!(account_id = identity.account_id, "Login successful");
        Ok(LoginOutcome { tokens, identity })
    }

    /// Exchanges a refresh token for a new pair, revoking the one consumed.
    pub fn refresh(&self, refresh_token: Option<&str>) -> Result<LoginOutcome, AuthError> {
        self.refresh_at(refresh_token, Utc::now())
    }

    /// [`Self::refresh`] as if the current time were `now`.
    ///
    /// The consumed token is claimed in the revocation store before the new
    /// pair is signed; a concurrent refresh with the same token loses the
    /// claim and gets `Revoked`.
    pub fn refresh_at(
        &self,
        refresh_token: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<LoginOutcome, AuthError> {
        let claims = self
            .decoder
            .validate_at(refresh_token, TokenKind::Refresh, now)
            .inspect_err(|e| warn!(reason = ?e, "Refresh rejected"))?;

        let token = refresh_token.ok_or(TokenError::Missing)?;
        if !self.revocations.revoke(token, claims.expires_at()) {
            warn!(account_id = claims.uid, "Refresh rejected: token already consumed");
            return Err(TokenError::Revoked.into());
        }

        let identity = claims.identity();
        let tokens = self.encoder.issue_at(&identity, now)?;

        info!(account_id = identity.account_id, "Tokens refreshed");
        Ok(LoginOutcome { tokens, identity })
    }

    /// Revokes the presented token.
    ///
    /// Only `token` is revoked; its paired token stays valid until expiry
    /// unless the caller also passes it via [`Self::revoke`]. Tokens that
    /// could never validate are not recorded.
    pub fn logout(&self, token: Option<&str>) -> Result<(), AuthError> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::Token(TokenError::Missing))?;

        let account_id = self.revoke(token);
        info!(account_id, "Logout completed");
        Ok(())
    }

    /// Adds `token` to the revocation store until its own expiry and
    /// returns its account id.
    ///
    /// Tokens with a bad signature or an expiry already past are skipped and
    /// yield `None`; they fail validation without an entry.
    pub fn revoke(&self, token: &str) -> Option<i64> {
        let claims = self.decoder.decode_claims(token).ok()?;
        if claims.is_expired_at(Utc::now()) {
            return None;
        }
        self.revocations.revoke(token, claims.expires_at());
        Some(claims.uid)
    }

    /// Validates an access token for a protected request.
    pub fn authenticate(&self, token: Option<&str>) -> Result<Identity, TokenError> {
        self.decoder.validate(token, TokenKind::Access)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Barrier;

    use async_trait::async_trait;
    use chrono::Duration;

    use bulldog_core::result::AppResult;
    use bulldog_core::traits::CredentialRecord;

    use super::*;

    struct OneAccount(CredentialRecord);

    #[async_trait]
    impl AccountStore for OneAccount {
        async fn find_by_identifier(
            &self,
            identifier: &str,
        ) -> AppResult<Option<CredentialRecord>> {
            Ok((identifier == self.0.identifier).then(|| self.0.clone()))
        }
    }

    fn manager() -> SessionManager {
        let hash = PasswordHasher::new().hash_password("hunter22").unwrap();
        let accounts = Arc::new(OneAccount(CredentialRecord {
            account_id: 1,
            identifier: "grey@example.com".to_string(),
            password_hash: hash,
        }));
        let config = AuthConfig::with_secret("0123456789abcdef0123456789abcdef");
        SessionManager::from_config(&config, accounts).unwrap()
    }

    #[tokio::test]
    async fn test_login_issues_usable_access_token() {
        let manager = manager();
        let outcome = manager.login("grey@example.com", "hunter22").await.unwrap();

        assert_eq!(outcome.identity.account_id, 1);
        let identity = manager
            .authenticate(Some(&outcome.tokens.access_token))
            .unwrap();
        assert_eq!(identity, outcome.identity);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let err = manager()
            .login("grey@example.com", "nope")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_refresh_token_rejected_as_access() {
        let manager = manager();
        let outcome = manager.login("grey@example.com", "hunter22").await.unwrap();
        assert_eq!(
            manager
                .authenticate(Some(&outcome.tokens.refresh_token))
                .unwrap_err(),
            TokenError::Malformed
        );
    }

    #[tokio::test]
    async fn test_refresh_rotates_and_revokes_consumed_token() {
        let manager = manager();
        let first = manager.login("grey@example.com", "hunter22").await.unwrap();

        let second = manager.refresh(Some(&first.tokens.refresh_token)).unwrap();
        assert_ne!(second.tokens.access_token, first.tokens.access_token);
        assert_ne!(second.tokens.refresh_token, first.tokens.refresh_token);
        assert!(manager.authenticate(Some(&second.tokens.access_token)).is_ok());

        let replay = manager
            .refresh(Some(&first.tokens.refresh_token))
            .unwrap_err();
        assert!(matches!(replay, AuthError::Token(TokenError::Revoked)));
    }

    #[tokio::test]
    async fn test_expired_refresh_fails() {
        let manager = manager();
        let first = manager.login("grey@example.com", "hunter22").await.unwrap();

        let err = manager
            .refresh_at(
                Some(&first.tokens.refresh_token),
                Utc::now() + Duration::hours(25),
            )
            .unwrap_err();
        assert!(matches!(err, AuthError::Token(TokenError::Expired)));
    }

    #[tokio::test]
    async fn test_refresh_without_token_is_missing() {
        let err = manager().refresh(None).unwrap_err();
        assert!(matches!(err, AuthError::Token(TokenError::Missing)));
    }

    #[tokio::test]
    async fn test_logout_revokes_only_presented_token() {
        let manager = manager();
        let outcome = manager.login("grey@example.com", "hunter22").await.unwrap();

        manager.logout(Some(&outcome.tokens.access_token)).unwrap();

        assert_eq!(
            manager
                .authenticate(Some(&outcome.tokens.access_token))
                .unwrap_err(),
            TokenError::Revoked
        );
        assert!(manager.refresh(Some(&outcome.tokens.refresh_token)).is_ok());
    }

    #[tokio::test]
    async fn test_logout_twice_is_idempotent() {
        let manager = manager();
        let outcome = manager.login("grey@example.com", "hunter22").await.unwrap();

        manager.logout(Some(&outcome.tokens.access_token)).unwrap();
        manager.logout(Some(&outcome.tokens.access_token)).unwrap();
        assert_eq!(manager.revocations().len(), 1);
    }

    #[test]
    fn test_logout_garbage_token_is_not_recorded() {
        let manager = manager();
        for i in 0..100 {
            manager
                .logout(Some(&format!("garbage-{i}-{}", "x".repeat(1000))))
                .unwrap();
        }
        assert_eq!(manager.revocations().len(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_refresh_issues_once() {
        let manager = Arc::new(manager());

        for round in 0..20 {
            let outcome = manager.login("grey@example.com", "hunter22").await.unwrap();
            let token = outcome.tokens.refresh_token;
            let barrier = Arc::new(Barrier::new(8));

            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let manager = manager.clone();
                    let barrier = barrier.clone();
                    let token = token.clone();
                    std::thread::spawn(move || {
                        barrier.wait();
                        manager.refresh(Some(&token))
                    })
                })
                .collect();

            let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
            let issued = results.iter().filter(|r| r.is_ok()).count();
            assert_eq!(issued, 1, "round {round}");
            assert!(
                results
                    .iter()
                    .filter_map(|r| r.as_ref().err())
                    .all(|e| matches!(e, AuthError::Token(TokenError::Revoked)))
            );
        }
    }

    #[test]
    fn test_logout_without_token() {
        let err = manager().logout(None).unwrap_err();
        assert!(matches!(err, AuthError::Token(TokenError::Missing)));
    }
}
