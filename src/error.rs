//! Error type shared by every layer of Pocket Budget
//!
//! Non-numeric amounts are not an error path: they are normalized to zero at
//! the input boundary by [`Money::normalize`](crate::models::Money::normalize).

use thiserror::Error;

use crate::models::MonthKey;

/// The main error type for Pocket Budget operations
#[derive(Error, Debug)]
pub enum BudgetError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    /// Malformed JSON outside the ledger file, such as an audit log line
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input (e.g. a malformed month key)
    #[error("Validation error: {0}")]
    Validation(String),

    /// An operation referenced a month with no budget
    #[error("No budget exists for {0}")]
    NoSuchMonth(MonthKey),

    /// A budget already exists for the month being created
    #[error("A budget already exists for {0}")]
    DuplicateMonth(MonthKey),

    /// The ledger or account file could not be read or replaced
    #[error("Storage error: {0}")]
    Persistence(String),

    /// Account/session errors, including the sign-in gate
    #[error("Account error: {0}")]
    Identity(String),
}

impl BudgetError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Shorthand used throughout the crate
pub type BudgetResult<T> = Result<T, BudgetError>;
