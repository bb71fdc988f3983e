//! Error types for the coordinator relay.
//!
//! The taxonomy mirrors how each failure is handled: a store outage is
//! recovered via the fallback snapshot, a delivery failure is logged and
//! deliberately does not roll the state machine back, and anything else
//! surfaces to the webhook caller as an internal error.

use thiserror::Error;

/// Result type alias for relay operations.
pub type Result<T> = std::result::Result<T, RelayError>;

/// Error types for coordinator relay operations.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The backing store is unreachable or a collection read failed.
    ///
    /// Recovered by substituting the synthetic fallback snapshot.
    #[error("backing store unavailable: {message}")]
    BackingStoreUnavailable {
        /// Description of the store failure.
        message: String,
    },

    /// The outbound HTTP call to the coordinator failed.
    ///
    /// Logged by the caller and treated as non-fatal; the state machine
    /// still advances.
    #[error("delivery to coordinator failed: {reason}")]
    DeliveryFailed {
        /// Description of the delivery failure.
        reason: String,
    },

    /// Unexpected failure during webhook processing.
    ///
    /// Surfaced to the webhook caller as HTTP 500; the process keeps
    /// running.
    #[error("internal relay error: {message}")]
    Internal {
        /// Internal error message.
        message: String,
    },
}

impl RelayError {
    /// Creates a store-unavailable error from a message.
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::BackingStoreUnavailable { message: message.into() }
    }

    /// Creates a delivery error from a message.
    pub fn delivery(reason: impl Into<String>) -> Self {
        Self::DeliveryFailed { reason: reason.into() }
    }

    /// Creates an internal error from a message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }
}

impl From<enlace_core::CoreError> for RelayError {
    fn from(err: enlace_core::CoreError) -> Self {
        // Any repository failure during aggregation means the snapshot is
        // unusable; the fallback path takes over.
        Self::store_unavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_store_unavailable() {
        let core = enlace_core::CoreError::Database("connection refused".to_string());
        let err = RelayError::from(core);
        assert!(matches!(err, RelayError::BackingStoreUnavailable { .. }));
    }

    #[test]
    fn messages_are_descriptive() {
        let err = RelayError::delivery("HTTP 502 from coordinator");
        assert_eq!(err.to_string(), "delivery to coordinator failed: HTTP 502 from coordinator");
    }
}
