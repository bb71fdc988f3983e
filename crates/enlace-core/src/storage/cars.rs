//! Repository for car database operations.

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    error::Result,
    models::{Car, CarId, NewCar, UpdateCar},
};

/// Repository for car database operations.
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

    /// Creates a new car.
    ///
    /// # Errors
    ///
    /// Returns error if the insert fails.
    pub async fn create(&self, new_car: &NewCar) -> Result<Car> {
        let car = sqlx::query_as::<_, Car>(
            r"
            INSERT INTO cars (id, name, model)
            VALUES ($1, $2, $3)
            RETURNING id, name, model, created_at, updated_at
            ",
        )
        .bind(CarId::new().0)
        .bind(&new_car.name)
        .bind(&new_car.model)
        .fetch_one(&*self.pool)
        .await?;

        Ok(car)
    }

    /// Lists all cars.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Car>> {
        let cars = sqlx::query_as::<_, Car>(
            r"
            SELECT id, name, model, created_at, updated_at
            FROM cars
            ORDER BY created_at
            ",
        )
        .fetch_all(&*self.pool)
        .await?;

        Ok(cars)
    }

    /// Finds a car by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    pub async fn find_by_id(&self, id: CarId) -> Result<Option<Car>> {
        let car = sqlx::query_as::<_, Car>(
            r"
            SELECT id, name, model, created_at, updated_at
            FROM cars
            WHERE id = $1
            ",
        )
        .bind(id.0)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(car)
    }

    /// Applies a partial update, returning the updated record.
    ///
    /// Returns `None` when no car with the given ID exists.
    ///
    /// # Errors
    ///
    /// Returns error if the update fails.
    pub async fn update(&self, id: CarId, update: &UpdateCar) -> Result<Option<Car>> {
        let car = sqlx::query_as::<_, Car>(
            r"
            UPDATE cars
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

        Ok(car)
    }

    /// Deletes a car, returning the deleted record.
    ///
    /// Returns `None` when no car with the given ID exists.
    ///
    /// # Errors
    ///
    /// Returns error if the delete fails.
    pub async fn delete(&self, id: CarId) -> Result<Option<Car>> {
        let car = sqlx::query_as::<_, Car>(
            r"
            DELETE FROM cars
            WHERE id = $1
            RETURNING id, name, model, created_at, updated_at
            ",
        )
        .bind(id.0)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(car)
    }
}
