//! In-memory store provider.
//!
//! Mirrors the PostgreSQL schema's constraints (case-insensitive unique
//! email, expense foreign key with cascade on user delete) so handlers
//! behave identically against either provider.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use bulldog_core::error::AppError;
use bulldog_core::result::AppResult;
use bulldog_core::traits::{AccountStore, CredentialRecord};
use bulldog_entity::expense::{Expense, ExpenseInput};
use bulldog_entity::pet::{Pet, PetInput};
use bulldog_entity::user::{CreateUser, UpdateUser, User};

use crate::store::{ExpenseStore, PetStore, UserStore};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    pets: BTreeMap<i64, Pet>,
    expenses: BTreeMap<i64, Expense>,
    next_user_id: i64,
    next_pet_id: i64,
    next_expense_id: i64,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| Some(u.id) != except && u.email.eq_ignore_ascii_case(email))
    }
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

fn duplicate_email() -> AppError {
    AppError::conflict("A user with this email already exists")
}

/// All tables behind one lock; ids start at 1 per table.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    tables: RwLock<Tables>,
}

impl MemoryDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryDatabase {
    async fn create(&self, user: &CreateUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&user.email, None) {
            return Err(duplicate_email());
        }

        let now = Utc::now();
        let row = User {
            id: next_id(&mut tables.next_user_id),
            name: user.name.clone(),
            email: user.email.clone(),
            age: user.age,
            password_hash: user.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn update(&self, id: i64, changes: &UpdateUser) -> AppResult<Option<User>> {
        let mut tables = self.tables.write().await;
        if let Some(email) = &changes.email {
            if tables.email_taken(email, Some(id)) {
                return Err(duplicate_email());
            }
        }

        let Some(user) = tables.users.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply_to(user);
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        tables.expenses.retain(|_, e| e.user_id != id);
        Ok(true)
    }
}

#[async_trait]
impl PetStore for MemoryDatabase {
    async fn create(&self, pet: &PetInput) -> AppResult<Pet> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let row = Pet {
            id: next_id(&mut tables.next_pet_id),
            name: pet.name.clone(),
            species: pet.species.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.pets.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_all(&self) -> AppResult<Vec<Pet>> {
        Ok(self.tables.read().await.pets.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Pet>> {
        Ok(self.tables.read().await.pets.get(&id).cloned())
    }

    async fn update(&self, id: i64, pet: &PetInput) -> AppResult<Option<Pet>> {
        let mut tables = self.tables.write().await;
        Ok(tables.pets.get_mut(&id).map(|row| {
            row.name = pet.name.clone();
            row.species = pet.species.clone();
            row.updated_at = Utc::now();
            row.clone()
        }))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.tables.write().await.pets.remove(&id).is_some())
    }
}

#[async_trait]
impl ExpenseStore for MemoryDatabase {
    async fn create(&self, expense: &ExpenseInput) -> AppResult<Expense> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&expense.user_id) {
            return Err(AppError::not_found("User not found"));
        }

        let now = Utc::now();
        let row = Expense {
            id: next_id(&mut tables.next_expense_id),
            user_id: expense.user_id,
            amount: expense.amount,
            category: expense.category.clone(),
            date: expense.date,
            description: expense.description.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.expenses.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_all(&self, user_id: Option<i64>) -> AppResult<Vec<Expense>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Expense> = tables
            .expenses
            .values()
            .filter(|e| user_id.is_none_or(|uid| e.user_id == uid))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Expense>> {
        Ok(self.tables.read().await.expenses.get(&id).cloned())
    }

    async fn update(&self, id: i64, expense: &ExpenseInput) -> AppResult<Option<Expense>> {
        let mut tables = self.tables.write().await;
        if !tables.expenses.contains_key(&id) {
            return Ok(None);
        }
        if !tables.users.contains_key(&expense.user_id) {
            return Err(AppError::not_found("User not found"));
        }

        Ok(tables.expenses.get_mut(&id).map(|row| {
            row.user_id = expense.user_id;
            row.amount = expense.amount;
            row.category = expense.category.clone();
            row.date = expense.date;
            row.description = expense.description.clone();
            row.updated_at = Utc::now();
            row.clone()
        }))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.tables.write().await.expenses.remove(&id).is_some())
    }
}

#[async_trait]
impl AccountStore for MemoryDatabase {
    async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<CredentialRecord>> {
        Ok(UserStore::find_by_email(self, identifier)
            .await?
            .map(|user| user.credential_record()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bulldog_core::error::ErrorKind;
    use chrono::NaiveDate;

    fn new_user(email: &str) -> CreateUser {
        CreateUser {
            name: "Grey".to_string(),
            email: email.to_string(),
            age: 30,
            password_hash: "hash".to_string(),
        }
    }

    fn expense_for(user_id: i64, day: u32) -> ExpenseInput {
        ExpenseInput {
            user_id,
            amount: 9.99,
            category: "food".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_user_ids_are_sequential() {
        let db = MemoryDatabase::new();
        let a = UserStore::create(&db, &new_user("a@example.com")).await.unwrap();
        let b = UserStore::create(&db, &new_user("b@example.com")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_case_insensitive() {
        let db = MemoryDatabase::new();
        UserStore::create(&db, &new_user("grey@example.com")).await.unwrap();
        let err = UserStore::create(&db, &new_user("GREY@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_update_to_taken_email_conflicts() {
        let db = MemoryDatabase::new();
        UserStore::create(&db, &new_user("a@example.com")).await.unwrap();
        let b = UserStore::create(&db, &new_user("b@example.com")).await.unwrap();

        let changes = UpdateUser {
            email: Some("A@example.com".to_string()),
            ..Default::default()
        };
        let err = UserStore::update(&db, b.id, &changes).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        // Re-submitting your own email is fine.
        let same = UpdateUser {
            email: Some("b@example.com".to_string()),
            ..Default::default()
        };
        assert!(UserStore::update(&db, b.id, &same).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_missing_user_returns_none() {
        let db = MemoryDatabase::new();
        let result = UserStore::update(&db, 42, &UpdateUser::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_user_cascades_expenses() {
        let db = MemoryDatabase::new();
        let a = UserStore::create(&db, &new_user("a@example.com")).await.unwrap();
        let b = UserStore::create(&db, &new_user("b@example.com")).await.unwrap();
        ExpenseStore::create(&db, &expense_for(a.id, 1)).await.unwrap();
        ExpenseStore::create(&db, &expense_for(b.id, 2)).await.unwrap();

        assert!(UserStore::delete(&db, a.id).await.unwrap());
        let remaining = ExpenseStore::find_all(&db, None).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].user_id, b.id);

        assert!(!UserStore::delete(&db, a.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_expense_requires_existing_user() {
        let db = MemoryDatabase::new();
        let err = ExpenseStore::create(&db, &expense_for(99, 1))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_expenses_filtered_and_ordered_by_date() {
        let db = MemoryDatabase::new();
        let a = UserStore::create(&db, &new_user("a@example.com")).await.unwrap();
        let b = UserStore::create(&db, &new_user("b@example.com")).await.unwrap();
        ExpenseStore::create(&db, &expense_for(a.id, 20)).await.unwrap();
        ExpenseStore::create(&db, &expense_for(b.id, 5)).await.unwrap();
        ExpenseStore::create(&db, &expense_for(a.id, 3)).await.unwrap();

        let mine = ExpenseStore::find_all(&db, Some(a.id)).await.unwrap();
        let days: Vec<_> = mine.iter().map(|e| e.date.to_string()).collect();
        assert_eq!(days, vec!["2024-01-03", "2024-01-20"]);
    }

    #[tokio::test]
    async fn test_account_lookup_by_email() {
        let db = MemoryDatabase::new();
        let user = UserStore::create(&db, &new_user("grey@example.com")).await.unwrap();

        let record = db
            .find_by_identifier("Grey@Example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.account_id, user.id);
        assert!(db.find_by_identifier("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_pet_crud() {
        let db = MemoryDatabase::new();
        let pet = PetStore::create(
            &db,
            &PetInput {
                name: "Rex".to_string(),
                species: "dog".to_string(),
            },
        )
        .await
        .unwrap();

        let updated = PetStore::update(
            &db,
            pet.id,
            &PetInput {
                name: "Rex".to_string(),
                species: "wolf".to_string(),
            },
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(updated.species, "wolf");

        assert!(PetStore::delete(&db, pet.id).await.unwrap());
        assert!(PetStore::find_by_id(&db, pet.id).await.unwrap().is_none());
    }
}
