//! Health check handler for service monitoring.
//!
//! The health surface stays up through database and downstream outages:
//! a store failure degrades the reported status but never takes the
//! endpoint down, so platform health checks keep passing while the relay
//! runs in fallback mode.

use axum::{extract::State, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::AppState;

/// Health check response structure.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status: `"ok"` or `"degraded"`.
    pub status: &'static str,
    /// Human-readable summary.
    pub message: &'static str,
    /// When the check was performed.
    pub timestamp: DateTime<Utc>,
    /// Deployment environment name.
    pub environment: String,
    /// Backing store connectivity.
    pub database: DatabaseHealth,
}

/// Database component health.
#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
    /// `"up"` or `"down"`.
    pub status: &'static str,
    /// Failure detail when down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Health check endpoint handler.
///
/// Always responds 200; a database outage is reported as a degraded status
/// rather than a failing check.
#[instrument(name = "health_check", skip(state))]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    debug!("Performing health check");

    let database = match state.storage.health_check().await {
        Ok(()) => DatabaseHealth { status: "up", message: None },
        Err(e) => {
            warn!(error = %e, "Database health check failed");
            DatabaseHealth { status: "down", message: Some(e.to_string()) }
        },
    };

    let degraded = database.status == "down";

    Json(HealthResponse {
        status: if degraded { "degraded" } else { "ok" },
        message: if degraded { "API is running in limited mode" } else { "API is running" },
        timestamp: state.clock.now_utc(),
        environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        database,
    })
}
