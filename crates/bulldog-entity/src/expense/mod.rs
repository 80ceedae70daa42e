//! Expense domain entities.

pub mod model;

pub use model::{Expense, ExpenseInput};
