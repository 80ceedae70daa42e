//! Expense entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single expense recorded against a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Expense {
    /// Unique expense identifier.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Amount spent; always positive.
    pub amount: f64,
    /// Free-form category, e.g. "groceries".
    pub category: String,
    /// Calendar date of the expense, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Optional note.
    pub description: Option<String>,
    /// When the expense was created.
    pub created_at: DateTime<Utc>,
    /// When the expense was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Fields written on create and full update.
#[derive(Debug, Clone)]
pub struct ExpenseInput {
    /// Owning user.
    pub user_id: i64,
    /// Amount spent.
    pub amount: f64,
    /// Category.
    pub category: String,
    /// Calendar date.
    pub date: NaiveDate,
    /// Optional note.
    pub description: Option<String>,
}
