//! Enlace HTTP API.
//!
//! Axum router, configuration and request handlers for the fleet CRUD
//! endpoints and the coordinator webhook relay.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::sync::Arc;

use enlace_core::{storage::Storage, Clock};
use enlace_relay::RelayService;

pub mod config;
pub mod handlers;
pub mod server;

pub use config::Config;
pub use server::{create_router, start_server};

/// Shared application state injected into all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository layer over the backing store.
    pub storage: Storage,
    /// The coordinator relay state machine.
    pub relay: Arc<RelayService>,
    /// Clock for timestamps in responses.
    pub clock: Arc<dyn Clock>,
}
