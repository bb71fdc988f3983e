//! HTTP request handlers for the Enlace API.
//!
//! Handlers are grouped by functionality:
//! - `health` - service health reporting
//! - `relay` - coordinator webhook entry and state reset
//! - `users` / `bikes` / `cars` - thin CRUD pass-through over the
//!   repository layer
//!
//! CRUD handlers share one error convention: `{ "message": <string> }`
//! bodies with 400 for invalid input, 404 for missing entities and 500 for
//! storage failures. The relay endpoints use the coordinator wire shapes
//! instead.

use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use enlace_core::CoreError;
use serde_json::json;

pub mod bikes;
pub mod cars;
pub mod health;
pub mod relay;
pub mod users;

pub use bikes::{create_bike, delete_bike, get_bike, list_bikes, update_bike};
pub use cars::{create_car, delete_car, get_car, list_cars, update_car};
pub use health::health_check;
pub use relay::{coordinator_webhook, reset_relay};
pub use users::{create_user, delete_user, get_user, list_users, update_user};

/// Builds the standard `{ "message": ... }` error response.
pub(crate) fn message_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "message": message.into() }))).into_response()
}

/// Maps a storage error to the CRUD error convention.
pub(crate) fn storage_error_response(err: &CoreError) -> Response {
    let status = match err {
        CoreError::NotFound(_) => StatusCode::NOT_FOUND,
        CoreError::InvalidInput(_) | CoreError::ConstraintViolation(_) => StatusCode::BAD_REQUEST,
        CoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    message_response(status, err.to_string())
}
