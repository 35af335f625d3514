//! Budget model
//!
//! One budget per calendar month: its income, its monthly and annual
//! categories, and the expenses logged in that month.

use serde::{Deserialize, Serialize};

use super::category::{AnnualCategory, MonthlyCategory};
use super::expense::Expense;
use super::ids::CategoryId;
use super::money::Money;

/// A month's budget
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    #[serde(default)]
    pub income: Money,

    #[serde(default)]
    pub monthly_categories: Vec<MonthlyCategory>,

    #[serde(default)]
    pub annual_categories: Vec<AnnualCategory>,

    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl Budget {
    /// An empty budget: zero income, no categories, no expenses
    pub fn new() -> Self {
        Self::default()
    }

    /// Total planned across all monthly categories
    pub fn total_budgeted(&self) -> Money {
        self.monthly_categories.iter().map(|c| c.budgeted).sum()
    }

    /// Find a monthly category by id
    pub fn monthly_category(&self, id: &CategoryId) -> Option<&MonthlyCategory> {
        self.monthly_categories.iter().find(|c| &c.id == id)
    }

    /// Find an annual category defined in this month by id
    pub fn annual_category(&self, id: &CategoryId) -> Option<&AnnualCategory> {
        self.annual_categories.iter().find(|c| &c.id == id)
    }

    /// Find a monthly category by name or id
    pub fn find_monthly_category(&self, input: &str) -> Option<&MonthlyCategory> {
        self.monthly_categories.iter().find(|c| c.matches(input))
    }

    /// Check if this budget has no categories and no expenses
    pub fn is_empty(&self) -> bool {
        self.monthly_categories.is_empty()
            && self.annual_categories.is_empty()
            && self.expenses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_budget_is_empty() {
        let budget = Budget::new();
        assert!(budget.income.is_zero());
        assert!(budget.is_empty());
    }

    #[test]
    fn test_total_budgeted() {
        let mut budget = Budget::new();
        budget
            .monthly_categories
            .push(MonthlyCategory::new("Rent", Money::from_cents(120000)));
        budget
            .monthly_categories
            .push(MonthlyCategory::new("Groceries", Money::from_cents(40000)));

        assert_eq!(budget.total_budgeted(), Money::from_cents(160000));
        assert!(budget.find_monthly_category("rent").is_some());
        assert!(budget.find_monthly_category("Fuel").is_none());
    }

    #[test]
    fn test_reads_camel_case_blob() {
        let json = r#"{
            "income": 3000,
            "monthlyCategories": [{"id": "m1", "name": "Groceries", "budgeted": 400}],
            "annualCategories": [{"id": "a1", "name": "Travel", "target": 1200, "boost": 0}],
            "expenses": [{"id": "e1", "type": "monthly", "categoryId": "m1", "amount": 45.5}]
        }"#;

        let budget: Budget = serde_json::from_str(json).unwrap();
        assert_eq!(budget.income, Money::from_cents(300000));
        assert_eq!(budget.monthly_categories.len(), 1);
        assert_eq!(budget.annual_categories[0].name, "Travel");
        assert_eq!(budget.expenses[0].amount, Money::from_cents(4550));
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let budget: Budget = serde_json::from_str(r#"{"income": "abc"}"#).unwrap();
        assert!(budget.income.is_zero());
        assert!(budget.is_empty());
    }
}
