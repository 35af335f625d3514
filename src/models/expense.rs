//! Expense model
//!
//! An expense is logged in a month and points at a category by id. The
//! reference is not checked: an expense whose category does not exist is
//! kept but counts toward no total.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, ExpenseId};
use super::money::Money;

/// Which kind of category an expense is charged to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseType {
    Monthly,
    Annual,
}

impl ExpenseType {
    /// Parse "monthly" or "annual" (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" | "m" => Some(Self::Monthly),
            "annual" | "yearly" | "year" | "a" => Some(Self::Annual),
            _ => None,
        }
    }
}

impl fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpenseType::Monthly => write!(f, "monthly"),
            ExpenseType::Annual => write!(f, "annual"),
        }
    }
}

/// A single logged expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,

    #[serde(rename = "type")]
    pub expense_type: ExpenseType,

    pub category_id: CategoryId,

    #[serde(default)]
    pub amount: Money,
}

impl Expense {
    /// Create a new expense with a fresh id
    pub fn new(expense_type: ExpenseType, category_id: CategoryId, amount: Money) -> Self {
        Self {
            id: ExpenseId::new(),
            expense_type,
            category_id,
            amount,
        }
    }

    /// Check whether this expense is charged to the given category
    pub fn is_for(&self, expense_type: ExpenseType, category_id: &CategoryId) -> bool {
        self.expense_type == expense_type && &self.category_id == category_id
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {}",
            self.expense_type, self.amount, self.category_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_type_parse() {
        assert_eq!(ExpenseType::parse("Monthly"), Some(ExpenseType::Monthly));
        assert_eq!(ExpenseType::parse("annual"), Some(ExpenseType::Annual));
        assert_eq!(ExpenseType::parse("weekly"), None);
    }

    #[test]
    fn test_is_for() {
        let category = CategoryId::from("c1");
        let expense = Expense::new(ExpenseType::Monthly, category.clone(), Money::from_cents(100));

        assert!(expense.is_for(ExpenseType::Monthly, &category));
        assert!(!expense.is_for(ExpenseType::Annual, &category));
        assert!(!expense.is_for(ExpenseType::Monthly, &CategoryId::from("c2")));
    }

    #[test]
    fn test_wire_format() {
        let expense = Expense {
            id: ExpenseId::from("e1"),
            expense_type: ExpenseType::Annual,
            category_id: CategoryId::from("c1"),
            amount: Money::from_cents(5000),
        };

        let value = serde_json::to_value(&expense).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": "e1", "type": "annual", "categoryId": "c1", "amount": 50})
        );
    }
}
