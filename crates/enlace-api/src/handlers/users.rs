//! CRUD handlers for user records.
//!
//! Thin pass-through over the user repository following the shared CRUD
//! error convention.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use enlace_core::{NewUser, UpdateUser, UserId};
use tracing::instrument;
use uuid::Uuid;

use super::{message_response, storage_error_response};
use crate::AppState;

/// `POST /api/users`
#[instrument(name = "create_user", skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> Response {
    match state.storage.users.create(&payload).await {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(e) => message_response(StatusCode::BAD_REQUEST, e.to_string()),
    }
}

/// `GET /api/users`
#[instrument(name = "list_users", skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Response {
    match state.storage.users.list_all().await {
        Ok(users) => Json(users).into_response(),
        Err(e) => storage_error_response(&e),
    }
}

/// `GET /api/users/{id}`
#[instrument(name = "get_user", skip(state))]
pub async fn get_user(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.storage.users.find_by_id(UserId::from(id)).await {
        Ok(Some(user)) => Json(user).into_response(),
        Ok(None) => message_response(StatusCode::NOT_FOUND, "User not found"),
        Err(e) => storage_error_response(&e),
    }
}

/// `PUT | PATCH /api/users/{id}`
#[instrument(name = "update_user", skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUser>,
) -> Response {
    match state.storage.users.update(UserId::from(id), &payload).await {
        Ok(Some(user)) => Json(user).into_response(),
        Ok(None) => message_response(StatusCode::NOT_FOUND, "User not found"),
        Err(e) => message_response(StatusCode::BAD_REQUEST, e.to_string()),
    }
}

/// `DELETE /api/users/{id}`
#[instrument(name = "delete_user", skip(state))]
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.storage.users.delete(UserId::from(id)).await {
        Ok(Some(_)) => message_response(StatusCode::OK, "User deleted successfully"),
        Ok(None) => message_response(StatusCode::NOT_FOUND, "User not found"),
        Err(e) => storage_error_response(&e),
    }
}
