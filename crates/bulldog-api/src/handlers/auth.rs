//! Auth handlers: login, refresh, logout, me.
//!
//! The refresh token never appears in a response body; it is carried in an
//! HttpOnly cookie scoped to the auth routes.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::info;

use bulldog_auth::{AuthError, TokenError};
use bulldog_core::config::AuthConfig;
use bulldog_core::error::AppError;

use crate::dto::request::LoginRequest;
use crate::dto::response::{LoginResponse, MeResponse, MessageResponse, RefreshResponse};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{AuthUser, ValidatedJson, bearer_token};
use crate::state::AppState;

/// Builds the refresh cookie carrying `token`.
pub fn refresh_cookie(config: &AuthConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.refresh_cookie_name.clone(), token))
        .http_only(true)
        .path(config.refresh_cookie_path.clone())
        .max_age(time::Duration::seconds(config.refresh_ttl_seconds()))
        .same_site(SameSite::Lax)
        .secure(config.refresh_cookie_secure)
        .build()
}

/// Builds a cookie that expires the refresh cookie in the browser.
pub fn clear_refresh_cookie(config: &AuthConfig) -> Cookie<'static> {
    let mut cookie = refresh_cookie(config, String::new());
    cookie.make_removal();
    cookie
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<LoginResponse>)> {
    let outcome = state.session_manager.login(&req.email, &req.password).await?;

    let jar = jar.add(refresh_cookie(
        &state.config.auth,
        outcome.tokens.refresh_token,
    ));

    Ok((
        jar,
        Json(LoginResponse {
            access_token: outcome.tokens.access_token,
            user_id: outcome.identity.account_id,
        }),
    ))
}

/// POST /auth/refresh
///
/// A rejected cookie is cleared along with the 401.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<RefreshResponse>), (CookieJar, ApiError)> {
    let presented = jar
        .get(&state.config.auth.refresh_cookie_name)
        .map(|cookie| cookie.value().to_string());

    let outcome = match state.session_manager.refresh(presented.as_deref()) {
        Ok(outcome) => outcome,
        Err(e) if presented.is_some() => {
            let jar = jar.add(clear_refresh_cookie(&state.config.auth));
            return Err((jar, e.into()));
        }
        Err(e) => return Err((jar, e.into())),
    };

    let jar = jar.add(refresh_cookie(
        &state.config.auth,
        outcome.tokens.refresh_token,
    ));

    Ok((
        jar,
        Json(RefreshResponse {
            access_token: outcome.tokens.access_token,
        }),
    ))
}

/// POST /auth/logout
///
/// Requires the token in the `Authorization` header (400 when absent) and
/// revokes exactly that token. With `auth.revoke_refresh_on_logout` the
/// refresh cookie sent alongside is revoked too.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<MessageResponse>)> {
    let auth_config = &state.config.auth;

    match state.session_manager.logout(bearer_token(&headers)) {
        Ok(()) => {}
        Err(AuthError::Token(TokenError::Missing)) => {
            return Err(ApiError(AppError::validation("Missing token")));
        }
        Err(e) => return Err(e.into()),
    }

    if auth_config.revoke_refresh_on_logout {
        if let Some(cookie) = jar.get(&auth_config.refresh_cookie_name) {
            state.session_manager.revoke(cookie.value());
            info!("Refresh cookie revoked on logout");
        }
    }

    let jar = jar.add(clear_refresh_cookie(auth_config));
    Ok((jar, Json(MessageResponse::new("Logged out"))))
}

/// GET /auth/me
pub async fn me(auth: AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        user_id: auth.account_id,
        email: auth.identifier.clone(),
    })
}
