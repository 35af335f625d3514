//! Pocket Budget - a personal monthly budgeting ledger
//!
//! Each calendar month holds an income, monthly spending categories, annual
//! savings categories, and the expenses logged against them. Derived figures
//! (spent, remaining, left to spend) are computed on demand from the stored
//! ledger and never persisted.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (months, categories, expenses, money)
//! - `storage`: JSON file storage layer
//! - `services`: Mutations, aggregation, and month resolution
//! - `audit`: Audit logging system
//! - `identity`: Local account and session handling
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use pocket_budget::config::paths::BudgetPaths;
//! use pocket_budget::services::BudgetService;
//! use pocket_budget::storage::Storage;
//!
//! let mut storage = Storage::new(BudgetPaths::new()?)?;
//! storage.load_all()?;
//! let overview = BudgetService::new(&storage).overview(&"2024-03".parse()?)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod identity;
pub mod models;
pub mod services;
pub mod storage;

pub use error::BudgetError;
