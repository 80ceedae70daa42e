//! User handlers. Registration is public; the rest require a token.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::info;

use bulldog_core::error::AppError;
use bulldog_entity::user::{CreateUser, UpdateUser, User};

use crate::dto::request::{CreateUserRequest, UpdateUserRequest};
use crate::dto::response::MessageResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson, parse_id};
use crate::state::AppState;

fn user_not_found() -> AppError {
    AppError::not_found("User not found")
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let password_hash = state.password_hasher.hash_password(&req.password)?;

    let user = state
        .stores
        .users
        .create(&CreateUser {
            name: req.name,
            email: req.email,
            age: req.age,
            password_hash,
        })
        .await?;

    info!(user_id = user.id, "User registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users
pub async fn list_users(_auth: AuthUser, State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.stores.users.find_all().await?))
}

/// GET /users/{id}
pub async fn get_user(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<User>> {
    let id = parse_id(&id)?;
    let user = state
        .stores
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(user_not_found)?;
    Ok(Json(user))
}

/// PUT /users/{id}
pub async fn update_user(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<User>> {
    let id = parse_id(&id)?;
    let password_hash = req
        .password
        .as_deref()
        .map(|password| state.password_hasher.hash_password(password))
        .transpose()?;

    let changes = UpdateUser {
        name: req.name,
        email: req.email,
        age: req.age,
        password_hash,
    };

    let user = state
        .stores
        .users
        .update(id, &changes)
        .await?
        .ok_or_else(user_not_found)?;
    Ok(Json(user))
}

/// DELETE /users/{id}
pub async fn delete_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    if !state.stores.users.delete(id).await? {
        return Err(user_not_found().into());
    }

    info!(user_id = id, by = auth.account_id, "User deleted");
    Ok(Json(MessageResponse::new("User deleted")))
}
