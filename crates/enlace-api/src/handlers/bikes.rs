//! CRUD handlers for bike records.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use enlace_core::{BikeId, NewBike, UpdateBike};
use tracing::instrument;
use uuid::Uuid;

use super::{message_response, storage_error_response};
use crate::AppState;

/// `POST /api/bikes`
#[instrument(name = "create_bike", skip(state, payload))]
pub async fn create_bike(
    State(state): State<AppState>,
    Json(payload): Json<NewBike>,
) -> Response {
    match state.storage.bikes.create(&payload).await {
        Ok(bike) => (StatusCode::CREATED, Json(bike)).into_response(),
        Err(e) => message_response(StatusCode::BAD_REQUEST, e.to_string()),
    }
}

/// `GET /api/bikes`
#[instrument(name = "list_bikes", skip(state))]
pub async fn list_bikes(State(state): State<AppState>) -> Response {
    match state.storage.bikes.list_all().await {
        Ok(bikes) => Json(bikes).into_response(),
        Err(e) => storage_error_response(&e),
    }
}

/// `GET /api/bikes/{id}`
#[instrument(name = "get_bike", skip(state))]
pub async fn get_bike(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.storage.bikes.find_by_id(BikeId::from(id)).await {
        Ok(Some(bike)) => Json(bike).into_response(),
        Ok(None) => message_response(StatusCode::NOT_FOUND, "Bike not found"),
        Err(e) => storage_error_response(&e),
    }
}

/// `PUT | PATCH /api/bikes/{id}`
#[instrument(name = "update_bike", skip(state, payload))]
pub async fn update_bike(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBike>,
) -> Response {
    match state.storage.bikes.update(BikeId::from(id), &payload).await {
        Ok(Some(bike)) => Json(bike).into_response(),
        Ok(None) => message_response(StatusCode::NOT_FOUND, "Bike not found"),
        Err(e) => message_response(StatusCode::BAD_REQUEST, e.to_string()),
    }
}

/// `DELETE /api/bikes/{id}`
#[instrument(name = "delete_bike", skip(state))]
pub async fn delete_bike(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.storage.bikes.delete(BikeId::from(id)).await {
        Ok(Some(_)) => message_response(StatusCode::OK, "Bike deleted successfully"),
        Ok(None) => message_response(StatusCode::NOT_FOUND, "Bike not found"),
        Err(e) => storage_error_response(&e),
    }
}
