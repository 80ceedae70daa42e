//! Pet entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A pet record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Pet {
    /// Unique pet identifier.
    pub id: i64,
    /// Pet name.
    pub name: String,
    /// Species, e.g. "dog".
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub species: String,
    /// When the pet was created.
    pub created_at: DateTime<Utc>,
    /// When the pet was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Fields written on create and full update.
#[derive(Debug, Clone)]
pub struct PetInput {
    /// Pet name.
    pub name: String,
    /// Species.
    pub species: String,
}
