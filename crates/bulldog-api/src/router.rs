//! Route definitions for the Bulldog HTTP API.
//!
//! Protection is per handler: any handler taking `AuthUser` requires a
//! valid access token.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Builds the router with every route and the shared state applied.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(pet_routes())
        .merge(expense_routes())
        .merge(health_routes())
        .with_state(state)
}

/// Auth endpoints: login, refresh, logout, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(handlers::user::list_users).post(handlers::user::create_user),
        )
        .route(
            "/users/{id}",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        )
}

fn pet_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/pets",
            get(handlers::pet::list_pets).post(handlers::pet::create_pet),
        )
        .route(
            "/pets/{id}",
            get(handlers::pet::get_pet)
                .put(handlers::pet::update_pet)
                .delete(handlers::pet::delete_pet),
        )
}

fn expense_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/expenses",
            get(handlers::expense::list_expenses).post(handlers::expense::create_expense),
        )
        .route(
            "/expenses/{id}",
            get(handlers::expense::get_expense)
                .put(handlers::expense::update_expense)
                .delete(handlers::expense::delete_expense),
        )
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
