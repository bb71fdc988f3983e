//! Coordinator webhook entry point and state reset.
//!
//! `POST /webhook` hands the inbound message to the relay state machine;
//! `GET /reset` restarts the handshake. Internal failures surface as HTTP
//! 500 with an `{ "error": ... }` body but never crash the process.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::{error, info, instrument};

use crate::AppState;

/// Webhook endpoint invoked by the coordinator.
///
/// The body is an arbitrary JSON message; the relay decides per its current
/// state whether to forward a fail-flagged delivery, a clean delivery, or
/// nothing at all.
#[instrument(name = "coordinator_webhook", skip(state, inbound))]
pub async fn coordinator_webhook(
    State(state): State<AppState>,
    Json(inbound): Json<Value>,
) -> Response {
    info!("Coordinator webhook received");

    match state.relay.handle_webhook(inbound).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(json!({ "status": outcome.status, "message": outcome.message })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Webhook processing failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": e.to_string() })))
                .into_response()
        },
    }
}

/// Resets the relay to its initial state.
///
/// Always succeeds; the response names the state that was replaced.
#[instrument(name = "reset_relay", skip(state))]
pub async fn reset_relay(State(state): State<AppState>) -> Response {
    let previous = state.relay.reset().await;

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": format!("Relay state reset to waiting (was {previous})"),
        })),
    )
        .into_response()
}
