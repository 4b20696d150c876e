//! `shopledger-expenses` — expense tracking domain.

pub mod expense;

pub use expense::{Expense, ExpenseDraft};
