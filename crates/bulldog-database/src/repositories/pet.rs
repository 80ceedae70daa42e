//! Pet repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use bulldog_core::error::{AppError, ErrorKind};
use bulldog_core::result::AppResult;
use bulldog_entity::pet::{Pet, PetInput};

use crate::store::PetStore;

/// Repository for pet CRUD.
#[derive(Debug, Clone)]
pub struct PetRepository {
    pool: PgPool,
}

impl PetRepository {
    /// Create a new pet repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PetStore for PetRepository {
    async fn create(&self, pet: &PetInput) -> AppResult<Pet> {
        sqlx::query_as::<_, Pet>("INSERT INTO pets (name, type) VALUES ($1, $2) RETURNING *")
            .bind(&pet.name)
            .bind(&pet.species)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create pet", e))
    }

    async fn find_all(&self) -> AppResult<Vec<Pet>> {
        sqlx::query_as::<_, Pet>("SELECT * FROM pets ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list pets", e))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Pet>> {
        sqlx::query_as::<_, Pet>("SELECT * FROM pets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find pet", e))
    }

    async fn update(&self, id: i64, pet: &PetInput) -> AppResult<Option<Pet>> {
        sqlx::query_as::<_, Pet>(
            "UPDATE pets SET name = $1, type = $2, updated_at = NOW() WHERE id = $3 RETURNING *",
        )
        .bind(&pet.name)
        .bind(&pet.species)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update pet", e))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM pets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete pet", e))?;

        Ok(result.rows_affected() > 0)
    }
}
