//! Repository for bike database operations.

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    error::Result,
    models::{Bike, BikeId, NewBike, UpdateBike},
};

/// Repository for bike database operations.
pub struct Repository {
    pool: Arc<PgPool>,
}

impl Repository {
    /// Creates a new repository instance.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Returns a reference to the database pool.
    pub fn pool(&self) -> Arc<PgPool> {
        self.pool.clone()
    }

    /// Creates a new bike.
    ///
    /// # Errors
    ///
    /// Returns error if the insert fails.
    pub async fn create(&self, new_bike: &NewBike) -> Result<Bike> {
        let bike = sqlx::query_as::<_, Bike>(
            r"
            INSERT INTO bikes (id, name, model)
            VALUES ($1, $2, $3)
            RETURNING id, name, model, created_at, updated_at
            ",
        )
        .bind(BikeId::new().0)
        .bind(&new_bike.name)
        .bind(&new_bike.model)
        .fetch_one(&*self.pool)
        .await?;

        Ok(bike)
    }

    /// Lists all bikes.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Bike>> {
        let bikes = sqlx::query_as::<_, Bike>(
            r"
            SELECT id, name, model, created_at, updated_at
            FROM bikes
            ORDER BY created_at
            ",
        )
        .fetch_all(&*self.pool)
        .await?;

        Ok(bikes)
    }

    /// Finds a bike by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    pub async fn find_by_id(&self, id: BikeId) -> Result<Option<Bike>> {
        let bike = sqlx::query_as::<_, Bike>(
            r"
            SELECT id, name, model, created_at, updated_at
            FROM bikes
            WHERE id = $1
            ",
        )
        .bind(id.0)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(bike)
    }

    /// Applies a partial update, returning the updated record.
    ///
    /// Returns `None` when no bike with the given ID exists.
    ///
    /// # Errors
    ///
    /// Returns error if the update fails.
    pub async fn update(&self, id: BikeId, update: &UpdateBike) -> Result<Option<Bike>> {
        let bike = sqlx::query_as::<_, Bike>(
            r"
            UPDATE bikes
            SET name = COALESCE($2, name),
                model = COALESCE($3, model),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, model, created_at, updated_at
            ",
        )
        .bind(id.0)
        .bind(update.name.as_deref())
        .bind(update.model.as_deref())
        .fetch_optional(&*self.pool)
        .await?;

        Ok(bike)
    }

    /// Deletes a bike, returning the deleted record.
    ///
    /// Returns `None` when no bike with the given ID exists.
    ///
    /// # Errors
    ///
    /// Returns error if the delete fails.
    pub async fn delete(&self, id: BikeId) -> Result<Option<Bike>> {
        let bike = sqlx::query_as::<_, Bike>(
            r"
            DELETE FROM bikes
            WHERE id = $1
            RETURNING id, name, model, created_at, updated_at
            ",
        )
        .bind(id.0)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(bike)
    }
}
