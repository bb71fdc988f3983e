//! Coordinator webhook relay for the Enlace fleet service.
//!
//! This crate implements the stateful bridge between the external
//! coordinator and the fleet database. Each coordinator message triggers a
//! two-phase handshake:
//!
//! 1. **First leg** - the message is enriched with a snapshot of all three
//!    collections and delivered back flagged as a deliberate failure, so the
//!    coordinator exercises its reprocessing path.
//! 2. **Second leg** - the same message is delivered clean, with the flag
//!    fields removed, using the synthetic fallback snapshot to avoid a second
//!    database dependency.
//!
//! After both legs the relay goes quiet until explicitly reset.
//!
//! # Architecture
//!
//! - [`RelayService`] owns the relay state and orchestrates each webhook.
//! - [`SnapshotSource`] abstracts the three-collection read; the production
//!   [`StoreAggregator`] fans out over the repositories concurrently with
//!   all-or-nothing failure semantics.
//! - [`fallback_snapshot`] supplies synthetic data when the store is down.
//! - [`CoordinatorNotifier`] posts the enriched envelope downstream.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod fallback;
pub mod notifier;
pub mod service;
pub mod snapshot;

pub use error::{RelayError, Result};
pub use fallback::fallback_snapshot;
pub use notifier::CoordinatorNotifier;
pub use service::{RelayService, RelayState, WebhookOutcome};
pub use snapshot::{Snapshot, SnapshotSource, StoreAggregator};
