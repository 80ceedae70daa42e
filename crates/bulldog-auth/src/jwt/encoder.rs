//! JWT token creation with configurable TTLs.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bulldog_core::config::AuthConfig;
use bulldog_core::config::auth::{MAX_ACCESS_TTL_MINUTES, MAX_REFRESH_TTL_HOURS};

use super::claims::{Claims, TokenKind};
use crate::error::AuthError;
use crate::identity::Identity;

/// Signs access and refresh tokens with HS256.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

/// A freshly issued access/refresh pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration.
    pub refresh_expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates an encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl: Duration::minutes(
                config.access_ttl_minutes.min(MAX_ACCESS_TTL_MINUTES) as i64,
            ),
            refresh_ttl: Duration::hours(
                config.refresh_ttl_hours.min(MAX_REFRESH_TTL_HOURS) as i64,
            ),
        }
    }

    /// Issues a pair for `identity` at the current time.
    pub fn issue(&self, identity: &Identity) -> Result<TokenPair, AuthError> {
        self.issue_at(identity, Utc::now())
    }

    /// Issues a pair as if the current time were `now`.
    pub fn issue_at(&self, identity: &Identity, now: DateTime<Utc>) -> Result<TokenPair, AuthError> {
        let access_expires_at = now + self.access_ttl;
        let refresh_expires_at = now + self.refresh_ttl;

        Ok(TokenPair {
            access_token: self.sign(identity, TokenKind::Access, now, access_expires_at)?,
            refresh_token: self.sign(identity, TokenKind::Refresh, now, refresh_expires_at)?,
            access_expires_at,
            refresh_expires_at,
        })
    }

    fn sign(
        &self,
        identity: &Identity,
        kind: TokenKind,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let claims = Claims {
            sub: identity.identifier.clone(),
            uid: identity.account_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
            kind,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(AuthError::SigningFailure)
    }
}
