//! Core data models for Pocket Budget
//!
//! This module contains the data structures that make up the budget ledger:
//! monthly budgets, their categories and expenses, and the figures derived
//! from them.

pub mod budget;
pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod month;
pub mod state;
pub mod summary;

pub use budget::Budget;
pub use category::{AnnualCategory, MonthlyCategory};
pub use expense::{Expense, ExpenseType};
pub use ids::{CategoryId, ExpenseId};
pub use money::Money;
pub use month::MonthKey;
pub use state::StateTree;
pub use summary::{AnnualCategorySummary, MonthOverview, MonthlyCategorySummary};
