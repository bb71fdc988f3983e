//! The relay state machine.
//!
//! Orchestrates the two-phase handshake with the coordinator. State lives in
//! a single service instance behind a mutex rather than a module-level
//! global, and the lock is held for the whole webhook cycle so concurrent
//! deliveries cannot skip or double-apply a transition.

use std::{fmt, sync::Arc};

use enlace_core::Clock;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};

use crate::{
    error::{RelayError, Result},
    fallback::fallback_snapshot,
    notifier::CoordinatorNotifier,
    snapshot::{Snapshot, SnapshotSource},
};

/// Relay handshake state.
///
/// Transitions are strictly linear: `Waiting` → `FailSent` → `Done`, with
/// `Done` absorbing until an explicit [`RelayService::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    /// No delivery made yet; the next webhook triggers the fail-flagged leg.
    Waiting,
    /// Fail-flagged delivery sent; the next webhook triggers the clean leg.
    FailSent,
    /// Both legs complete; webhooks are no-ops until reset.
    Done,
}

impl RelayState {
    /// Wire representation used in webhook responses.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::FailSent => "failSent",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for RelayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of handling one inbound webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookOutcome {
    /// Reported handshake status: `"failSent"` or `"done"`.
    pub status: &'static str,
    /// Human-readable description of what happened.
    pub message: String,
}

/// The coordinator relay.
///
/// Holds the handshake state, decides between real and fallback data,
/// enriches inbound messages and drives the outbound notifier.
pub struct RelayService {
    state: Mutex<RelayState>,
    source: Arc<dyn SnapshotSource>,
    notifier: CoordinatorNotifier,
    clock: Arc<dyn Clock>,
}

impl RelayService {
    /// Creates a relay in the `Waiting` state.
    pub fn new(
        source: Arc<dyn SnapshotSource>,
        notifier: CoordinatorNotifier,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { state: Mutex::new(RelayState::Waiting), source, notifier, clock }
    }

    /// Returns the current relay state.
    pub async fn state(&self) -> RelayState {
        *self.state.lock().await
    }

    /// Handles one inbound coordinator webhook.
    ///
    /// The inbound message passes through unmodified except for the
    /// `data`/`failOn`/`error` mutations. The state lock is held for the
    /// full cycle, serializing concurrent webhook deliveries.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::Internal` when the inbound message is not a
    /// JSON object or enrichment fails. Store outages are masked by the
    /// fallback snapshot and notifier failures are logged without rolling
    /// the state back.
    #[instrument(name = "handle_webhook", skip(self, inbound))]
    pub async fn handle_webhook(&self, mut inbound: Value) -> Result<WebhookOutcome> {
        let mut state = self.state.lock().await;

        match *state {
            RelayState::Done => {
                info!("Handshake already complete, ignoring webhook");
                Ok(WebhookOutcome {
                    status: "done",
                    message: "No further action taken.".to_string(),
                })
            },
            RelayState::Waiting => {
                let snapshot = match self.source.fetch_snapshot().await {
                    Ok(snapshot) => snapshot,
                    Err(RelayError::BackingStoreUnavailable { message }) => {
                        warn!(reason = %message, "Backing store unavailable, using fallback snapshot");
                        fallback_snapshot()
                    },
                    Err(e) => return Err(e),
                };

                self.enrich(&mut inbound, &snapshot)?;
                attach_fail_flag(&mut inbound)?;

                self.notify(&inbound).await;

                // State advances even when delivery failed; the coordinator
                // re-sends and the next leg picks up from FailSent.
                *state = RelayState::FailSent;
                info!(state = %*state, "Fail-flagged delivery handled");

                Ok(WebhookOutcome {
                    status: "failSent",
                    message: "Fail-flagged message forwarded to coordinator.".to_string(),
                })
            },
            RelayState::FailSent => {
                // Second leg never touches the real store, avoiding a second
                // database dependency on the critical path.
                let snapshot = fallback_snapshot();

                remove_fail_flag(&mut inbound)?;
                self.enrich(&mut inbound, &snapshot)?;

                self.notify(&inbound).await;

                *state = RelayState::Done;
                info!(state = %*state, "Clean delivery handled, handshake complete");

                Ok(WebhookOutcome {
                    status: "done",
                    message: "Clean message forwarded to coordinator.".to_string(),
                })
            },
        }
    }

    /// Resets the relay to `Waiting`, returning the prior state.
    ///
    /// Callable at any time, including mid-cycle.
    pub async fn reset(&self) -> RelayState {
        let mut state = self.state.lock().await;
        let previous = *state;
        *state = RelayState::Waiting;
        info!(previous = %previous, "Relay state reset to waiting");
        previous
    }

    /// Attaches the snapshot and timestamp under `data.step3`.
    fn enrich(&self, inbound: &mut Value, snapshot: &Snapshot) -> Result<()> {
        let mut step3 = json!({
            "timestamp": self.clock.now_utc().to_rfc3339(),
        });

        let snapshot_value = serde_json::to_value(snapshot)
            .map_err(|e| RelayError::internal(format!("failed to serialize snapshot: {e}")))?;
        if let (Some(step3_obj), Some(snapshot_obj)) =
            (step3.as_object_mut(), snapshot_value.as_object())
        {
            step3_obj.extend(snapshot_obj.clone());
        }

        let obj = as_object(inbound)?;
        obj.insert("data".to_string(), json!({ "step3": step3 }));
        Ok(())
    }

    /// Sends the mutated message, logging delivery failures without
    /// propagating them.
    async fn notify(&self, message: &Value) {
        if let Err(e) = self.notifier.send(message).await {
            error!(error = %e, "Delivery to coordinator failed");
        }
    }
}

fn as_object(inbound: &mut Value) -> Result<&mut serde_json::Map<String, Value>> {
    inbound
        .as_object_mut()
        .ok_or_else(|| RelayError::internal("inbound message must be a JSON object"))
}

/// Marks the message as a deliberate failure for the coordinator's
/// reprocessing path.
fn attach_fail_flag(inbound: &mut Value) -> Result<()> {
    let obj = as_object(inbound)?;
    obj.insert("failOn".to_string(), json!("queue-reprocessed"));
    obj.insert("error".to_string(), json!(""));
    Ok(())
}

/// Removes the failure marker fields entirely (not left as empty values).
fn remove_fail_flag(inbound: &mut Value) -> Result<()> {
    let obj = as_object(inbound)?;
    obj.remove("failOn");
    obj.remove("error");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_wire_names() {
        assert_eq!(RelayState::Waiting.as_str(), "waiting");
        assert_eq!(RelayState::FailSent.as_str(), "failSent");
        assert_eq!(RelayState::Done.as_str(), "done");
    }

    #[test]
    fn fail_flag_round_trip() {
        let mut message = json!({"orderId": 42});

        attach_fail_flag(&mut message).unwrap();
        assert_eq!(message["failOn"], "queue-reprocessed");
        assert_eq!(message["error"], "");

        remove_fail_flag(&mut message).unwrap();
        assert!(message.get("failOn").is_none());
        assert!(message.get("error").is_none());
        assert_eq!(message["orderId"], 42);
    }

    #[test]
    fn non_object_inbound_is_rejected() {
        let mut message = json!([1, 2, 3]);
        let err = attach_fail_flag(&mut message).unwrap_err();
        assert!(matches!(err, RelayError::Internal { .. }));
    }
}
