//! End-to-end tests for the coordinator webhook endpoints.
//!
//! Drives the full handshake through the HTTP router with an unreachable
//! backing store (so the relay runs on the fallback snapshot) and a mock
//! coordinator on the outbound side.

use std::{sync::Arc, time::Duration};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use enlace_api::{create_router, AppState};
use enlace_core::{storage::Storage, TestClock};
use enlace_relay::{CoordinatorNotifier, RelayService, StoreAggregator};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

/// Builds a router whose store is unreachable and whose coordinator is the
/// given mock server.
fn test_app(coordinator: &MockServer) -> Router {
    // Short acquire timeout keeps the unreachable-store path fast.
    let pool = sqlx::postgres::PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(200))
        .connect_lazy("postgresql://127.0.0.1:1/enlace")
        .expect("lazy pool always builds");
    let storage = Storage::new(pool);

    let notifier =
        CoordinatorNotifier::new(format!("{}/send", coordinator.uri()), Duration::from_secs(5))
            .expect("client builds");
    let relay = Arc::new(RelayService::new(
        Arc::new(StoreAggregator::new(storage.clone())),
        notifier,
        Arc::new(TestClock::new()),
    ));

    create_router(AppState { storage, relay, clock: Arc::new(TestClock::new()) })
}

async fn post_webhook(app: &Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.expect("request succeeds");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).expect("response is JSON"))
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap();

    let response = app.clone().oneshot(request).await.expect("request succeeds");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).expect("response is JSON"))
}

#[tokio::test]
async fn full_scenario_reset_then_three_webhooks() {
    let coordinator = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/send"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&coordinator)
        .await;

    let app = test_app(&coordinator);

    let (status, body) = get_json(&app, "/reset").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = post_webhook(&app, json!({"orderId": 42})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "failSent");

    let (status, body) = post_webhook(&app, json!({"orderId": 42})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "done");

    let (status, body) = post_webhook(&app, json!({"orderId": 42})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "done");
    assert_eq!(body["message"], "No further action taken.");

    // Exactly two outbound deliveries: one per handshake leg.
    let requests = coordinator.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);

    let envelope: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let first: Value = serde_json::from_str(envelope["message"].as_str().unwrap()).unwrap();
    assert_eq!(first["orderId"], 42);
    assert_eq!(first["failOn"], "queue-reprocessed");
    assert_eq!(first["error"], "");

    let envelope: Value = serde_json::from_slice(&requests[1].body).unwrap();
    let second: Value = serde_json::from_str(envelope["message"].as_str().unwrap()).unwrap();
    assert!(second.get("failOn").is_none());
    assert!(second.get("error").is_none());
}

#[tokio::test]
async fn store_outage_still_reports_fail_sent() {
    let coordinator = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&coordinator)
        .await;

    // The pool points at nothing, so the aggregator fails and the fallback
    // snapshot takes over; the caller never sees the store failure.
    let app = test_app(&coordinator);

    let (status, body) = post_webhook(&app, json!({"orderId": 7})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "failSent");

    let requests = coordinator.received_requests().await.unwrap();
    let envelope: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let message: Value = serde_json::from_str(envelope["message"].as_str().unwrap()).unwrap();

    let expected = serde_json::to_value(enlace_relay::fallback_snapshot()).unwrap();
    assert_eq!(message["data"]["step3"]["users"], expected["users"]);
    assert_eq!(message["data"]["step3"]["bikes"], expected["bikes"]);
    assert_eq!(message["data"]["step3"]["cars"], expected["cars"]);
}

#[tokio::test]
async fn non_object_body_is_internal_error() {
    let coordinator = MockServer::start().await;
    let app = test_app(&coordinator);

    let (status, body) = post_webhook(&app, json!([1, 2, 3])).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("JSON object"));

    // The failed call must not advance the handshake.
    let (_, body) = post_webhook(&app, json!({"orderId": 1})).await;
    assert_eq!(body["status"], "failSent");
}

#[tokio::test]
async fn reset_reports_the_prior_state() {
    let coordinator = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&coordinator)
        .await;

    let app = test_app(&coordinator);

    post_webhook(&app, json!({})).await;

    let (status, body) = get_json(&app, "/reset").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["message"].as_str().unwrap().contains("failSent"));

    let (_, body) = get_json(&app, "/reset").await;
    assert!(body["message"].as_str().unwrap().contains("waiting"));
}
