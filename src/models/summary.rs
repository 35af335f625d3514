//! Derived budget figures
//!
//! These are computed from a state tree snapshot and never stored.

use std::fmt;

use super::category::{AnnualCategory, MonthlyCategory};
use super::money::Money;
use super::month::MonthKey;

/// A monthly category's spending for its month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyCategorySummary {
    pub category: MonthlyCategory,

    /// Sum of monthly expenses charged to this category
    pub spent: Money,

    /// budgeted - spent (may be negative)
    pub remaining: Money,
}

impl MonthlyCategorySummary {
    /// Check if this category is overspent (remaining is negative)
    pub fn is_overspent(&self) -> bool {
        self.remaining.is_negative()
    }
}

impl fmt::Display for MonthlyCategorySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Budgeted: {} | Spent: {} | Remaining: {}",
            self.category.budgeted, self.spent, self.remaining
        )
    }
}

/// An annual category's spending over its calendar year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnualCategorySummary {
    pub category: AnnualCategory,

    /// The year the spending was rolled up over
    pub year: i32,

    /// target + boost
    pub available: Money,

    /// Sum of annual expenses charged to this category in any month of the year
    pub spent: Money,

    /// available - spent (may be negative)
    pub remaining: Money,
}

impl AnnualCategorySummary {
    /// Check if this category is overspent (remaining is negative)
    pub fn is_overspent(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// Everything shown for one month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthOverview {
    pub month: MonthKey,
    pub income: Money,

    /// Sum of budgeted over monthly categories
    pub total_budgeted: Money,

    /// Sum of spent over monthly categories
    pub total_spent: Money,

    /// income - total_budgeted
    pub planned_remaining: Money,

    /// income - total_spent
    pub left_to_spend: Money,

    pub monthly: Vec<MonthlyCategorySummary>,
    pub annual: Vec<AnnualCategorySummary>,

    /// Number of expenses in the month that match no category
    pub orphaned_expenses: usize,
}

impl MonthOverview {
    /// Overspent means left to spend is below zero; exactly zero is not overspent
    pub fn is_overspent(&self) -> bool {
        self.left_to_spend.is_negative()
    }
}
