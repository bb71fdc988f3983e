//! Health check endpoint tests.
//!
//! Verifies the health surface stays up and reports a degraded status when
//! the backing store is unreachable, rather than failing the check.

use std::{sync::Arc, time::Duration};

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use enlace_api::{create_router, AppState};
use enlace_core::{storage::Storage, TestClock};
use enlace_relay::{CoordinatorNotifier, RelayService, StoreAggregator};
use serde_json::Value;
use tower::ServiceExt;

#[tokio::test]
async fn health_check_survives_database_outage() {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(200))
        .connect_lazy("postgresql://127.0.0.1:1/enlace")
        .unwrap();
    let storage = Storage::new(pool);

    let notifier =
        CoordinatorNotifier::new("http://127.0.0.1:1/send".to_string(), Duration::from_secs(1))
            .unwrap();
    let relay = Arc::new(RelayService::new(
        Arc::new(StoreAggregator::new(storage.clone())),
        notifier,
        Arc::new(TestClock::new()),
    ));

    let app = create_router(AppState { storage, relay, clock: Arc::new(TestClock::new()) });

    for uri in ["/health", "/api/health"] {
        let request = Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.expect("request succeeds");

        // The endpoint itself never goes down with the database.
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).expect("health response is JSON");

        assert_eq!(body["status"], "degraded");
        assert_eq!(body["database"]["status"], "down");
        assert!(body["timestamp"].is_string());
        assert!(body["environment"].is_string());
    }
}
