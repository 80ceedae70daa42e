//! Expense CRUD handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use bulldog_core::error::AppError;
use bulldog_entity::expense::{Expense, ExpenseInput};

use crate::dto::request::{ExpenseFilter, ExpenseRequest};
use crate::dto::response::MessageResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson, parse_id};
use crate::state::AppState;

fn expense_not_found() -> AppError {
    AppError::not_found("Expense not found")
}

/// Resolves the owning user (defaulting to the caller) and checks it exists.
async fn expense_input(
    state: &AppState,
    auth: &AuthUser,
    req: ExpenseRequest,
) -> Result<ExpenseInput, AppError> {
    let user_id = req.user_id.unwrap_or(auth.account_id);
    if state.stores.users.find_by_id(user_id).await?.is_none() {
        return Err(AppError::not_found("User not found"));
    }

    Ok(ExpenseInput {
        user_id,
        amount: req.amount,
        category: req.category,
        date: req.date,
        description: req.description,
    })
}

/// POST /expenses
pub async fn create_expense(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ExpenseRequest>,
) -> ApiResult<(StatusCode, Json<Expense>)> {
    let input = expense_input(&state, &auth, req).await?;
    let expense = state.stores.expenses.create(&input).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

/// GET /expenses
pub async fn list_expenses(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<ExpenseFilter>,
) -> ApiResult<Json<Vec<Expense>>> {
    let user_id = filter.user_id.as_deref().map(parse_id).transpose()?;
    Ok(Json(state.stores.expenses.find_all(user_id).await?))
}

/// GET /expenses/{id}
pub async fn get_expense(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Expense>> {
    let id = parse_id(&id)?;
    let expense = state
        .stores
        .expenses
        .find_by_id(id)
        .await?
        .ok_or_else(expense_not_found)?;
    Ok(Json(expense))
}

/// PUT /expenses/{id}
pub async fn update_expense(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<ExpenseRequest>,
) -> ApiResult<Json<Expense>> {
    let id = parse_id(&id)?;
    let input = expense_input(&state, &auth, req).await?;
    let expense = state
        .stores
        .expenses
        .update(id, &input)
        .await?
        .ok_or_else(expense_not_found)?;
    Ok(Json(expense))
}

/// DELETE /expenses/{id}
pub async fn delete_expense(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    if !state.stores.expenses.delete(id).await? {
        return Err(expense_not_found().into());
    }
    Ok(Json(MessageResponse::new("Expense deleted")))
}
