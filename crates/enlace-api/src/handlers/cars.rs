//! CRUD handlers for car records.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use enlace_core::{CarId, NewCar, UpdateCar};
use tracing::instrument;
use uuid::Uuid;

use super::{message_response, storage_error_response};
use crate::AppState;

/// `POST /api/cars`
#[instrument(name = "create_car", skip(state, payload))]
pub async fn create_car(State(state): State<AppState>, Json(payload): Json<NewCar>) -> Response {
    match state.storage.cars.create(&payload).await {
        Ok(car) => (StatusCode::CREATED, Json(car)).into_response(),
        Err(e) => message_response(StatusCode::BAD_REQUEST, e.to_string()),
    }
}

/// `GET /api/cars`
#[instrument(name = "list_cars", skip(state))]
pub async fn list_cars(State(state): State<AppState>) -> Response {
    match state.storage.cars.list_all().await {
        Ok(cars) => Json(cars).into_response(),
        Err(e) => storage_error_response(&e),
    }
}

/// `GET /api/cars/{id}`
#[instrument(name = "get_car", skip(state))]
pub async fn get_car(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.storage.cars.find_by_id(CarId::from(id)).await {
        Ok(Some(car)) => Json(car).into_response(),
        Ok(None) => message_response(StatusCode::NOT_FOUND, "Car not found"),
        Err(e) => storage_error_response(&e),
    }
}

/// `PUT | PATCH /api/cars/{id}`
#[instrument(name = "update_car", skip(state, payload))]
pub async fn update_car(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCar>,
) -> Response {
    match state.storage.cars.update(CarId::from(id), &payload).await {
        Ok(Some(car)) => Json(car).into_response(),
        Ok(None) => message_response(StatusCode::NOT_FOUND, "Car not found"),
        Err(e) => message_response(StatusCode::BAD_REQUEST, e.to_string()),
    }
}

/// `DELETE /api/cars/{id}`
#[instrument(name = "delete_car", skip(state))]
pub async fn delete_car(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.storage.cars.delete(CarId::from(id)).await {
        Ok(Some(_)) => message_response(StatusCode::OK, "Car deleted successfully"),
        Ok(None) => message_response(StatusCode::NOT_FOUND, "Car not found"),
        Err(e) => storage_error_response(&e),
    }
}
