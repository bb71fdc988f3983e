//! Point-in-time snapshots of the three fleet collections.
//!
//! The aggregator issues all three collection reads concurrently and fails
//! the whole snapshot if any single read fails. No partial snapshots are
//! produced; the caller falls back to synthetic data instead.

use enlace_core::{storage::Storage, Bike, Car, User};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// A fresh read of all three record collections.
///
/// Produced per webhook invocation and never cached.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// All user records.
    pub users: Vec<User>,
    /// All bike records.
    pub bikes: Vec<Bike>,
    /// All car records.
    pub cars: Vec<Car>,
}

impl Snapshot {
    /// Total number of records across all collections.
    pub fn record_count(&self) -> usize {
        self.users.len() + self.bikes.len() + self.cars.len()
    }
}

/// Source of fleet snapshots.
///
/// The production implementation reads the database; tests can inject a
/// stub to simulate store outages without a live database.
#[async_trait::async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetches a fresh snapshot of all three collections.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::BackingStoreUnavailable` when the store
    /// connection is down or any single collection read fails.
    async fn fetch_snapshot(&self) -> Result<Snapshot>;
}

/// Snapshot source backed by the repository layer.
///
/// Fans out over the three repositories concurrently; any single failure
/// fails the whole aggregation.
pub struct StoreAggregator {
    storage: Storage,
}

impl StoreAggregator {
    /// Creates an aggregator over the given storage.
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

#[async_trait::async_trait]
impl SnapshotSource for StoreAggregator {
    async fn fetch_snapshot(&self) -> Result<Snapshot> {
        let (users, bikes, cars) = tokio::try_join!(
            self.storage.users.list_all(),
            self.storage.bikes.list_all(),
            self.storage.cars.list_all(),
        )?;

        let snapshot = Snapshot { users, bikes, cars };
        debug!(records = snapshot.record_count(), "Aggregated fleet snapshot");

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RelayError;

    #[test]
    fn record_count_sums_all_collections() {
        let snapshot = crate::fallback::fallback_snapshot();
        assert_eq!(snapshot.record_count(), 6);
    }

    #[tokio::test]
    async fn unreachable_store_fails_the_whole_snapshot() {
        // A lazily-connected pool with no server behind it makes every read
        // fail, which must surface as a store-unavailable error. The short
        // acquire timeout keeps the test fast.
        let pool = sqlx::postgres::PgPoolOptions::new()
            .acquire_timeout(std::time::Duration::from_millis(200))
            .connect_lazy("postgresql://127.0.0.1:1/enlace")
            .unwrap();
        let aggregator = StoreAggregator::new(Storage::new(pool));

        let err = aggregator.fetch_snapshot().await.unwrap_err();
        assert!(matches!(err, RelayError::BackingStoreUnavailable { .. }));
    }
}
