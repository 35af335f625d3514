//! Service layer for Pocket Budget
//!
//! The service layer provides business logic on top of the storage layer:
//! the audited mutation operations, the pure aggregation functions, and
//! month resolution for user input.

pub mod aggregator;
pub mod budget;
pub mod month;

pub use budget::{BudgetService, CategoryRef};
pub use month::MonthResolver;
