//! Expense repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use bulldog_core::error::{AppError, ErrorKind};
use bulldog_core::result::AppResult;
use bulldog_entity::expense::{Expense, ExpenseInput};

use super::map_db_error;
use crate::store::ExpenseStore;

/// Repository for expense CRUD.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    pool: PgPool,
}

impl ExpenseRepository {
    /// Create a new expense repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExpenseStore for ExpenseRepository {
    async fn create(&self, expense: &ExpenseInput) -> AppResult<Expense> {
        sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (user_id, amount, category, date, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(expense.user_id)
        .bind(expense.amount)
        .bind(&expense.category)
        .bind(expense.date)
        .bind(expense.description.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to create expense"))
    }

    async fn find_all(&self, user_id: Option<i64>) -> AppResult<Vec<Expense>> {
        sqlx::query_as::<_, Expense>(
            r#"
            SELECT * FROM expenses
            WHERE ($1::BIGINT IS NULL OR user_id = $1)
            ORDER BY date, id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list expenses", e))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Expense>> {
        sqlx::query_as::<_, Expense>("SELECT * FROM expenses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find expense", e))
    }

    async fn update(&self, id: i64, expense: &ExpenseInput) -> AppResult<Option<Expense>> {
        sqlx::query_as::<_, Expense>(
            r#"
            UPDATE expenses
            SET user_id = $1, amount = $2, category = $3, date = $4, description = $5,
                updated_at = NOW()
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(expense.user_id)
        .bind(expense.amount)
        .bind(&expense.category)
        .bind(expense.date)
        .bind(expense.description.as_deref())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to update expense"))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete expense", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
