//! Outbound HTTP notifier for the coordinator.
//!
//! Posts the two-field envelope `{ "message": <stringified JSON> }` to the
//! configured coordinator endpoint. The stringified form is part of the wire
//! contract: the coordinator expects the message serialized to a string, not
//! a structured body.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{RelayError, Result};

/// Wire envelope sent to the coordinator.
#[derive(Debug, Serialize)]
struct EnrichedMessage {
    /// The mutated inbound message, serialized to a string.
    message: String,
}

/// HTTP client for delivering enriched messages to the coordinator.
///
/// Fire-and-forget: no retry is attempted on failure and no timeout is
/// applied beyond the client default.
#[derive(Debug, Clone)]
pub struct CoordinatorNotifier {
    client: reqwest::Client,
    send_url: String,
}

impl CoordinatorNotifier {
    /// Creates a notifier targeting the given coordinator send URL.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::Internal` if the HTTP client cannot be built.
    pub fn new(send_url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("Enlace-Relay/1.0")
            .build()
            .map_err(|e| RelayError::internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, send_url })
    }

    /// Sends the mutated inbound message to the coordinator.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::DeliveryFailed` when the request errors, times
    /// out, or the coordinator responds with a non-2xx status.
    pub async fn send(&self, message: &Value) -> Result<()> {
        let envelope = EnrichedMessage { message: message.to_string() };

        debug!(url = %self.send_url, "Sending enriched message to coordinator");

        let response = self
            .client
            .post(&self.send_url)
            .header("Content-Type", "application/json")
            .json(&envelope)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RelayError::delivery(format!("request timed out: {e}"))
                } else {
                    RelayError::delivery(format!("request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::delivery(format!("coordinator responded with HTTP {status}")));
        }

        info!(status = status.as_u16(), "Message sent to coordinator");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn notifier_for(server: &MockServer) -> CoordinatorNotifier {
        CoordinatorNotifier::new(
            format!("{}/api/v2/send-message", server.uri()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn sends_stringified_envelope() {
        let server = MockServer::start().await;

        // The body must be {"message": "<json string>"}, not a nested object.
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/api/v2/send-message"))
            .and(matchers::header("Content-Type", "application/json"))
            .and(matchers::body_json(json!({
                "message": "{\"orderId\":42}"
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = notifier_for(&server).await;
        notifier.send(&json!({"orderId": 42})).await.unwrap();
    }

    #[tokio::test]
    async fn non_success_status_is_delivery_failure() {
        let server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let notifier = notifier_for(&server).await;
        let err = notifier.send(&json!({"orderId": 42})).await.unwrap_err();
        assert!(matches!(err, RelayError::DeliveryFailed { .. }));
    }

    #[tokio::test]
    async fn unreachable_coordinator_is_delivery_failure() {
        let notifier =
            CoordinatorNotifier::new("http://127.0.0.1:1/send".to_string(), Duration::from_secs(1))
                .unwrap();

        let err = notifier.send(&json!({})).await.unwrap_err();
        assert!(matches!(err, RelayError::DeliveryFailed { .. }));
    }
}
