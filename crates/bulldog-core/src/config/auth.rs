//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Minimum signing secret length in bytes for HMAC-SHA256.
pub const MIN_SECRET_BYTES: usize = 32;

/// Upper bound on the access token lifetime (one day).
pub const MAX_ACCESS_TTL_MINUTES: u64 = 24 * 60;

/// Upper bound on the refresh token lifetime (one year).
pub const MAX_REFRESH_TTL_HOURS: u64 = 365 * 24;

/// Authentication, token, and refresh-cookie configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256). No default: it must be
    /// supplied through a config overlay or `BULLDOG__AUTH__JWT_SECRET`.
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh token TTL in hours.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_hours: u64,
    /// Name of the cookie carrying the refresh token.
    #[serde(default = "default_cookie_name")]
    pub refresh_cookie_name: String,
    /// Path attribute of the refresh cookie.
    #[serde(default = "default_cookie_path")]
    pub refresh_cookie_path: String,
    /// Whether the refresh cookie is marked `Secure`.
    #[serde(default)]
    pub refresh_cookie_secure: bool,
    /// Interval between sweeps that purge expired revocation entries.
    #[serde(default = "default_sweep_interval")]
    pub revocation_sweep_interval_seconds: u64,
    /// Also revoke the refresh cookie presented on logout.
    #[serde(default)]
    pub revoke_refresh_on_logout: bool,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[redacted]")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .field("refresh_ttl_hours", &self.refresh_ttl_hours)
            .field("refresh_cookie_name", &self.refresh_cookie_name)
            .field("refresh_cookie_path", &self.refresh_cookie_path)
            .field("refresh_cookie_secure", &self.refresh_cookie_secure)
            .field(
                "revocation_sweep_interval_seconds",
                &self.revocation_sweep_interval_seconds,
            )
            .field("revoke_refresh_on_logout", &self.revoke_refresh_on_logout)
            .finish()
    }
}

impl AuthConfig {
    /// Builds a configuration with default settings and the given secret.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
            access_ttl_minutes: default_access_ttl(),
            refresh_ttl_hours: default_refresh_ttl(),
            refresh_cookie_name: default_cookie_name(),
            refresh_cookie_path: default_cookie_path(),
            refresh_cookie_secure: false,
            revocation_sweep_interval_seconds: default_sweep_interval(),
            revoke_refresh_on_logout: false,
        }
    }

    /// Rejects missing or weak secrets and zero lifetimes.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.len() < MIN_SECRET_BYTES {
            return Err(AppError::configuration(format!(
                "auth.jwt_secret must be at least {MIN_SECRET_BYTES} bytes"
            )));
        }
        if self.access_ttl_minutes == 0 || self.refresh_ttl_hours == 0 {
            return Err(AppError::configuration(
                "auth token lifetimes must be greater than zero",
            ));
        }
        if self.access_ttl_minutes > MAX_ACCESS_TTL_MINUTES {
            return Err(AppError::configuration(format!(
                "auth.access_ttl_minutes must be at most {MAX_ACCESS_TTL_MINUTES}"
            )));
        }
        if self.refresh_ttl_hours > MAX_REFRESH_TTL_HOURS {
            return Err(AppError::configuration(format!(
                "auth.refresh_ttl_hours must be at most {MAX_REFRESH_TTL_HOURS}"
            )));
        }
        if self.revocation_sweep_interval_seconds == 0 {
            return Err(AppError::configuration(
                "auth.revocation_sweep_interval_seconds must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Refresh token lifetime in seconds, used as the refresh cookie Max-Age.
    pub fn refresh_ttl_seconds(&self) -> i64 {
        self.refresh_ttl_hours.min(MAX_REFRESH_TTL_HOURS) as i64 * 3600
    }
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    24
}

fn default_cookie_name() -> String {
    "refresh_token".to_string()
}

fn default_cookie_path() -> String {
    "/auth".to_string()
}

fn default_sweep_interval() -> u64 {
    60
}
