//! Pet CRUD handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use bulldog_core::error::AppError;
use bulldog_entity::pet::{Pet, PetInput};

use crate::dto::request::PetRequest;
use crate::dto::response::MessageResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson, parse_id};
use crate::state::AppState;

fn pet_not_found() -> AppError {
    AppError::not_found("Pet not found")
}

/// POST /pets
pub async fn create_pet(
    _auth: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<PetRequest>,
) -> ApiResult<(StatusCode, Json<Pet>)> {
    let pet = state.stores.pets.create(&PetInput::from(req)).await?;
    Ok((StatusCode::CREATED, Json(pet)))
}

/// GET /pets
pub async fn list_pets(_auth: AuthUser, State(state): State<AppState>) -> ApiResult<Json<Vec<Pet>>> {
    Ok(Json(state.stores.pets.find_all().await?))
}

/// GET /pets/{id}
pub async fn get_pet(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Pet>> {
    let id = parse_id(&id)?;
    let pet = state
        .stores
        .pets
        .find_by_id(id)
        .await?
        .ok_or_else(pet_not_found)?;
    Ok(Json(pet))
}

/// PUT /pets/{id}
pub async fn update_pet(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<PetRequest>,
) -> ApiResult<Json<Pet>> {
    let id = parse_id(&id)?;
    let pet = state
        .stores
        .pets
        .update(id, &PetInput::from(req))
        .await?
        .ok_or_else(pet_not_found)?;
    Ok(Json(pet))
}

/// DELETE /pets/{id}
pub async fn delete_pet(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    if !state.stores.pets.delete(id).await? {
        return Err(pet_not_found().into());
    }
    Ok(Json(MessageResponse::new("Pet deleted")))
}
