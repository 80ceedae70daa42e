//! JWT token validation and revocation checking.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use bulldog_core::config::AuthConfig;

use super::claims::{Claims, TokenKind};
use crate::error::TokenError;
use crate::identity::Identity;
use crate::revocation::RevocationStore;

/// Verifies tokens and checks them against the revocation store.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
    revocations: Arc<RevocationStore>,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl JwtDecoder {
    /// Creates a decoder sharing `revocations` with the session flows.
    pub fn new(config: &AuthConfig, revocations: Arc<RevocationStore>) -> Self {
        // Expiry is compared against an explicit `now` in `validate_at`.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            revocations,
        }
    }

    /// Validates `token` as `kind` at the current time.
    pub fn validate(&self, token: Option<&str>, kind: TokenKind) -> Result<Identity, TokenError> {
        self.validate_at(token, kind, Utc::now())
            .map(|claims| claims.identity())
    }

    /// Validates `token` as `kind` as if the current time were `now`.
    ///
    /// Checks, in order: presence, revocation (by exact string), signature
    /// and structure, expiry, kind.
    pub fn validate_at(
        &self,
        token: Option<&str>,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<Claims, TokenError> {
        let token = token.filter(|t| !t.is_empty()).ok_or(TokenError::Missing)?;

        if self.revocations.is_revoked_at(token, now) {
            return Err(TokenError::Revoked);
        }

        let claims = self.decode_claims(token)?;

        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }
        if claims.kind != kind {
            return Err(TokenError::Malformed);
        }

        Ok(claims)
    }

    /// Verifies the signature and returns the claims without checking
    /// expiry, kind, or revocation.
    pub fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::Malformed)
    }
}
