//! Store traits and the provider-selected bundle handed to the API layer.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use bulldog_core::config::{DatabaseConfig, DatabaseProvider};
use bulldog_core::result::AppResult;
use bulldog_core::traits::AccountStore;
use bulldog_entity::expense::{Expense, ExpenseInput};
use bulldog_entity::pet::{Pet, PetInput};
use bulldog_entity::user::{CreateUser, UpdateUser, User};

use crate::connection::DatabasePool;
use crate::memory::MemoryDatabase;
use crate::repositories::{ExpenseRepository, PetRepository, UserRepository};

/// User persistence.
///
/// Email uniqueness is case-insensitive; violating it yields a
/// `Conflict` error from `create` and `update`.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Insert a user and return the stored row.
    async fn create(&self, user: &CreateUser) -> AppResult<User>;

    /// List all users ordered by id.
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Apply a partial update. Returns `None` if the user does not exist.
    async fn update(&self, id: i64, changes: &UpdateUser) -> AppResult<Option<User>>;

    /// Delete a user and their expenses. Returns `true` if a row was removed.
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

/// Pet persistence.
#[async_trait]
pub trait PetStore: Send + Sync + 'static {
    /// Insert a pet and return the stored row.
    async fn create(&self, pet: &PetInput) -> AppResult<Pet>;

    /// List all pets ordered by id.
    async fn find_all(&self) -> AppResult<Vec<Pet>>;

    /// Find a pet by primary key.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Pet>>;

    /// Replace a pet's fields. Returns `None` if the pet does not exist.
    async fn update(&self, id: i64, pet: &PetInput) -> AppResult<Option<Pet>>;

    /// Delete a pet. Returns `true` if a row was removed.
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

/// Expense persistence.
#[async_trait]
pub trait ExpenseStore: Send + Sync + 'static {
    /// Insert an expense. An unknown `user_id` yields `NotFound`.
    async fn create(&self, expense: &ExpenseInput) -> AppResult<Expense>;

    /// List expenses ordered by date then id, optionally for one user.
    async fn find_all(&self, user_id: Option<i64>) -> AppResult<Vec<Expense>>;

    /// Find an expense by primary key.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Expense>>;

    /// Replace an expense's fields. Returns `None` if it does not exist.
    async fn update(&self, id: i64, expense: &ExpenseInput) -> AppResult<Option<Expense>>;

    /// Delete an expense. Returns `true` if a row was removed.
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

/// All stores for one provider, plus the account lookup the auth core uses.
#[derive(Clone)]
pub struct Stores {
    /// User store.
    pub users: Arc<dyn UserStore>,
    /// Pet store.
    pub pets: Arc<dyn PetStore>,
    /// Expense store.
    pub expenses: Arc<dyn ExpenseStore>,
    /// Credential lookup backed by the user store.
    pub accounts: Arc<dyn AccountStore>,
    /// Present for the PostgreSQL provider.
    pub pool: Option<DatabasePool>,
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores")
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

impl Stores {
    /// Builds the stores selected by `config.provider`.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        info!(provider = %config.provider, "Initializing stores");
        match config.provider {
            DatabaseProvider::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                Ok(Self::postgres(pool))
            }
            DatabaseProvider::Memory => Ok(Self::memory(Arc::new(MemoryDatabase::new()))),
        }
    }

    /// Stores backed by PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: DatabasePool) -> Self {
        let users = Arc::new(UserRepository::new(pool.pool().clone()));
        Self {
            users: users.clone(),
            pets: Arc::new(PetRepository::new(pool.pool().clone())),
            expenses: Arc::new(ExpenseRepository::new(pool.pool().clone())),
            accounts: users,
            pool: Some(pool),
        }
    }

    /// Stores backed by a single in-memory database.
    pub fn memory(db: Arc<MemoryDatabase>) -> Self {
        Self {
            users: db.clone(),
            pets: db.clone(),
            expenses: db.clone(),
            accounts: db,
            pool: None,
        }
    }

    /// Reports whether the backing store is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }

    /// Releases pooled connections, if any.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
