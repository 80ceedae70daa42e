//! Request DTOs with validation.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use bulldog_entity::pet::PetInput;

/// Login request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Account email.
    #[serde(alias = "identifier")]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Plaintext password.
    #[serde(alias = "secret")]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// User registration body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Display name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Email address.
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    /// Age in years.
    #[validate(range(min = 1, message = "Age must be greater than 0"))]
    pub age: i32,
    /// Plaintext password.
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Partial user update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New display name.
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    /// New email address.
    #[validate(email(message = "Invalid email"))]
    pub email: Option<String>,
    /// New age.
    #[validate(range(min = 1, message = "Age must be greater than 0"))]
    pub age: Option<i32>,
    /// New plaintext password.
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
}

/// Pet create/update body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PetRequest {
    /// Pet name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Species.
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type is required"))]
    pub species: String,
}

impl From<PetRequest> for PetInput {
    fn from(req: PetRequest) -> Self {
        Self {
            name: req.name,
            species: req.species,
        }
    }
}

/// Expense create/update body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExpenseRequest {
    /// Owning user; defaults to the caller.
    pub user_id: Option<i64>,
    /// Amount spent.
    #[validate(range(exclusive_min = 0.0, message = "Amount must be greater than 0"))]
    pub amount: f64,
    /// Category.
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Optional note.
    pub description: Option<String>,
}

/// `GET /expenses` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpenseFilter {
    /// Only expenses for this user.
    pub user_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_accepts_aliases() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"identifier":"a@b.co","secret":"pw"}"#).unwrap();
        assert_eq!(req.email, "a@b.co");
        assert_eq!(req.password, "pw");
    }

    #[test]
    fn test_create_user_rules() {
        let mut req = CreateUserRequest {
            name: "Grey".to_string(),
            email: "grey@example.com".to_string(),
            age: 30,
            password: "hunter22".to_string(),
        };
        assert!(req.validate().is_ok());

        req.age = 0;
        assert!(req.validate().is_err());
        req.age = 30;

        req.password = "short".to_string();
        assert!(req.validate().is_err());
        req.password = "hunter22".to_string();

        req.email = "not-an-email".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_user_skips_absent_fields() {
        assert!(UpdateUserRequest::default().validate().is_ok());

        let req = UpdateUserRequest {
            age: Some(-1),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_expense_amount_must_be_positive() {
        let req: ExpenseRequest = serde_json::from_str(
            r#"{"amount":0,"category":"food","date":"2024-01-02"}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_expense_rejects_bad_date() {
        let parsed = serde_json::from_str::<ExpenseRequest>(
            r#"{"amount":3.5,"category":"food","date":"2024-13-40"}"#,
        );
        assert!(parsed.is_err());
    }
}
