//! Repository for user database operations.
//!
//! Provides the full CRUD surface plus the `list_all` read the relay's
//! snapshot aggregator depends on.

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    error::Result,
    models::{NewUser, UpdateUser, User, UserId},
};

/// Repository for user database operations.
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

    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns error if the insert fails or constraints are violated.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r"
            INSERT INTO users (id, name, email)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, created_at, updated_at
            ",
        )
        .bind(UserId::new().0)
        .bind(&new_user.name)
        .bind(&new_user.email)
        .fetch_one(&*self.pool)
        .await?;

        Ok(user)
    }

    /// Lists all users.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    pub async fn list_all(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r"
            SELECT id, name, email, created_at, updated_at
            FROM users
            ORDER BY created_at
            ",
        )
        .fetch_all(&*self.pool)
        .await?;

        Ok(users)
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r"
            SELECT id, name, email, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.0)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(user)
    }

    /// Applies a partial update, returning the updated record.
    ///
    /// Returns `None` when no user with the given ID exists.
    ///
    /// # Errors
    ///
    /// Returns error if the update fails.
    pub async fn update(&self, id: UserId, update: &UpdateUser) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r"
            UPDATE users
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, email, created_at, updated_at
            ",
        )
        .bind(id.0)
        .bind(update.name.as_deref())
        .bind(update.email.as_deref())
        .fetch_optional(&*self.pool)
        .await?;

        Ok(user)
    }

    /// Deletes a user, returning the deleted record.
    ///
    /// Returns `None` when no user with the given ID exists.
    ///
    /// # Errors
    ///
    /// Returns error if the delete fails.
    pub async fn delete(&self, id: UserId) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r"
            DELETE FROM users
            WHERE id = $1
            RETURNING id, name, email, created_at, updated_at
            ",
        )
        .bind(id.0)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(user)
    }
}
