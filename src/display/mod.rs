//! Display formatting for terminal output
//!
//! Provides utilities for formatting budget figures for terminal display.

pub mod budget;

pub use budget::{
    format_category_list, format_expense_list, format_missing_month, format_month_list,
    format_month_overview,
};
