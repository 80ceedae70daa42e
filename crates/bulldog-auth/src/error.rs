//! Authentication error taxonomy.
//!
//! Client-facing messages are deliberately generic: malformed and expired
//! tokens share one message, and unknown accounts share the wrong-password
//! message.

use thiserror::Error;

use bulldog_core::error::{AppError, ErrorKind};

/// Why a token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// No token was supplied.
    #[error("Missing token")]
    Missing,
    /// Bad structure, bad signature, or the wrong token kind.
    #[error("Invalid token")]
    Malformed,
    /// `now >= exp`.
    #[error("Invalid token")]
    Expired,
    /// The exact token string is in the revocation store.
    #[error("Token revoked")]
    Revoked,
}

/// Failures of the login, refresh, and logout flows.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown identifier or wrong secret.
    #[error("Invalid email or password")]
    InvalidCredentials,
    /// The presented token was rejected.
    #[error(transparent)]
    Token(#[from] TokenError),
    /// A token could not be signed.
    #[error("Failed to sign token")]
    SigningFailure(#[source] jsonwebtoken::errors::Error),
    /// The account store or hasher failed.
    #[error(transparent)]
    Internal(#[from] AppError),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        AppError::authentication(err.to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => AppError::authentication(err.to_string()),
            AuthError::Token(token) => token.into(),
            AuthError::SigningFailure(source) => {
                AppError::with_source(ErrorKind::Internal, "Failed to sign token", source)
            }
            AuthError::Internal(app) => app,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_messages() {
        assert_eq!(TokenError::Missing.to_string(), "Missing token");
        assert_eq!(TokenError::Revoked.to_string(), "Token revoked");
        assert_eq!(TokenError::Malformed.to_string(), "Invalid token");
        assert_eq!(TokenError::Expired.to_string(), "Invalid token");
    }

    #[test]
    fn test_auth_errors_map_to_app_kinds() {
        let app: AppError = AuthError::InvalidCredentials.into();
        assert_eq!(app.kind, ErrorKind::Authentication);
        assert_eq!(app.message, "Invalid email or password");

        let app: AppError = AuthError::Token(TokenError::Revoked).into();
        assert_eq!(app.kind, ErrorKind::Authentication);
        assert_eq!(app.message, "Token revoked");

        let app: AppError = AuthError::Internal(AppError::database("down")).into();
        assert_eq!(app.kind, ErrorKind::Database);
    }
}
