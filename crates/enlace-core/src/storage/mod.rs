//! Database access layer implementing the repository pattern for the fleet
//! entities.
//!
//! The repository layer acts as an anti-corruption layer, translating between
//! domain models and database schemas. All database operations go through
//! these repositories; direct SQL outside this module is forbidden.

use std::sync::Arc;

use sqlx::PgPool;

pub mod bikes;
pub mod cars;
pub mod users;

use crate::error::Result;

/// Container for all repository instances providing unified database access.
///
/// Manages a shared connection pool and provides type-safe access to each
/// entity repository.
#[derive(Clone)]
pub struct Storage {
    /// Repository for user records.
    pub users: Arc<users::Repository>,

    /// Repository for bike records.
    pub bikes: Arc<bikes::Repository>,

    /// Repository for car records.
    pub cars: Arc<cars::Repository>,
}

impl Storage {
    /// Creates a new storage instance with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        let pool = Arc::new(pool);

        Self {
            users: Arc::new(users::Repository::new(pool.clone())),
            bikes: Arc::new(bikes::Repository::new(pool.clone())),
            cars: Arc::new(cars::Repository::new(pool)),
        }
    }

    /// Performs a health check on the database connection.
    ///
    /// Executes a simple query to verify database connectivity. Used by the
    /// `/health` endpoint and by the relay to decide whether the backing
    /// store is reachable.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Database` if the connection is unhealthy or the
    /// query times out.
    pub async fn health_check(&self) -> Result<()> {
        let _: (i32,) = sqlx::query_as("SELECT 1").fetch_one(&*self.users.pool()).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn storage_can_be_created() {
        // Instantiation only; queries are exercised in integration tests
        // against a live database.
        let pool = sqlx::PgPool::connect_lazy("postgresql://test").unwrap();
        let _storage = Storage::new(pool);
    }
}
