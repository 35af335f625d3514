//! The budget state tree
//!
//! `StateTree` is the whole persisted ledger: every month's budget keyed by
//! month. All mutation is additive. Months are only created on request,
//! categories and expenses are only appended, and nothing is ever removed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{BudgetError, BudgetResult};

use super::budget::Budget;
use super::category::{AnnualCategory, MonthlyCategory};
use super::expense::{Expense, ExpenseType};
use super::ids::CategoryId;
use super::money::Money;
use super::month::MonthKey;

/// Every month's budget, keyed by month
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTree {
    #[serde(default)]
    pub budgets: BTreeMap<MonthKey, Budget>,
}

impl StateTree {
    /// An empty tree with no months
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the budget for a month, if one has been created
    pub fn budget(&self, month: &MonthKey) -> Option<&Budget> {
        self.budgets.get(month)
    }

    /// Check if a budget exists for a month
    pub fn has_month(&self, month: &MonthKey) -> bool {
        self.budgets.contains_key(month)
    }

    /// All month keys in chronological order
    pub fn months(&self) -> impl Iterator<Item = &MonthKey> {
        self.budgets.keys()
    }

    /// Budgets of every month in the given calendar year, oldest first
    pub fn budgets_in_year(&self, year: i32) -> impl Iterator<Item = (&MonthKey, &Budget)> {
        self.budgets.iter().filter(move |(key, _)| key.in_year(year))
    }

    fn budget_mut(&mut self, month: &MonthKey) -> BudgetResult<&mut Budget> {
        self.budgets
            .get_mut(month)
            .ok_or(BudgetError::NoSuchMonth(*month))
    }

    /// Create an empty budget for a month
    ///
    /// Fails with `DuplicateMonth` if the month already has a budget.
    pub fn create_month(&mut self, month: MonthKey) -> BudgetResult<&Budget> {
        if self.budgets.contains_key(&month) {
            return Err(BudgetError::DuplicateMonth(month));
        }
        Ok(self.budgets.entry(month).or_insert_with(Budget::new))
    }

    /// Append a monthly category to an existing month
    pub fn add_monthly_category(
        &mut self,
        month: &MonthKey,
        name: impl Into<String>,
        budgeted: Money,
    ) -> BudgetResult<MonthlyCategory> {
        let budget = self.budget_mut(month)?;
        let category = MonthlyCategory::new(name, budgeted);
        budget.monthly_categories.push(category.clone());
        Ok(category)
    }

    /// Append an annual category (with zero boost) to an existing month
    pub fn add_annual_category(
        &mut self,
        month: &MonthKey,
        name: impl Into<String>,
        target: Money,
    ) -> BudgetResult<AnnualCategory> {
        let budget = self.budget_mut(month)?;
        let category = AnnualCategory::new(name, target);
        budget.annual_categories.push(category.clone());
        Ok(category)
    }

    /// Overwrite a month's income, returning the previous value
    pub fn set_income(&mut self, month: &MonthKey, income: Money) -> BudgetResult<Money> {
        let budget = self.budget_mut(month)?;
        Ok(std::mem::replace(&mut budget.income, income))
    }

    /// Append an expense to an existing month
    ///
    /// The category id is not checked against any category.
    pub fn log_expense(
        &mut self,
        month: &MonthKey,
        expense_type: ExpenseType,
        category_id: CategoryId,
        amount: Money,
    ) -> BudgetResult<Expense> {
        let budget = self.budget_mut(month)?;
        let expense = Expense::new(expense_type, category_id, amount);
        budget.expenses.push(expense.clone());
        Ok(expense)
    }
}
