//! Budget ledger repository for JSON storage
//!
//! Owns the in-memory state tree and its round-trips to `budgets.json`.
//! Loading never fails: a missing file is an empty ledger, and an unreadable
//! one is moved aside and replaced by an empty ledger.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    AnnualCategory, Budget, CategoryId, Expense, ExpenseType, MonthKey, MonthlyCategory, Money,
    StateTree,
};

use super::file_io::{quarantine, read_json, write_json_atomic};

/// What happened when the ledger was loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file was read successfully
    Loaded,
    /// No file existed yet; the ledger starts empty
    Missing,
    /// The file could not be read; the ledger starts empty
    Recovered {
        reason: String,
        /// Where the unreadable file was moved, if moving it succeeded
        moved_to: Option<PathBuf>,
    },
}

/// Repository for the budget ledger
pub struct LedgerRepository {
    path: PathBuf,
    tree: RwLock<StateTree>,
}

impl LedgerRepository {
    /// Create a new ledger repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            tree: RwLock::new(StateTree::new()),
        }
    }

    /// Path of the ledger file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the ledger from disk
    ///
    /// Only a poisoned lock is reported as an error.
    pub fn load(&self) -> BudgetResult<LoadOutcome> {
        let existed = self.path.exists();
        let (loaded, outcome) = match read_json::<StateTree, _>(&self.path) {
            Ok(tree) if existed => (tree, LoadOutcome::Loaded),
            Ok(tree) => (tree, LoadOutcome::Missing),
            Err(e) => {
                let moved_to = quarantine(&self.path).ok();
                (
                    StateTree::new(),
                    LoadOutcome::Recovered {
                        reason: e.to_string(),
                        moved_to,
                    },
                )
            }
        };

        *self.write_lock()? = loaded;
        Ok(outcome)
    }

    /// Save the whole ledger to disk atomically
    pub fn save(&self) -> BudgetResult<()> {
        let tree = self.read_lock()?;
        write_json_atomic(&self.path, &*tree)
    }

    /// A copy of the current state tree
    pub fn snapshot(&self) -> BudgetResult<StateTree> {
        Ok(self.read_lock()?.clone())
    }

    /// Get a copy of one month's budget
    pub fn get(&self, month: &MonthKey) -> BudgetResult<Option<Budget>> {
        Ok(self.read_lock()?.budget(month).cloned())
    }

    /// All months with a budget, oldest first
    pub fn months(&self) -> BudgetResult<Vec<MonthKey>> {
        Ok(self.read_lock()?.months().copied().collect())
    }

    /// Create an empty budget for a month
    pub fn create_month(&self, month: MonthKey) -> BudgetResult<Budget> {
        let mut tree = self.write_lock()?;
        let budget = tree.create_month(month)?.clone();
        Ok(budget)
    }

    /// Append a monthly category
    pub fn add_monthly_category(
        &self,
        month: &MonthKey,
        name: &str,
        budgeted: Money,
    ) -> BudgetResult<MonthlyCategory> {
        self.write_lock()?.add_monthly_category(month, name, budgeted)
    }

    /// Append an annual category
    pub fn add_annual_category(
        &self,
        month: &MonthKey,
        name: &str,
        target: Money,
    ) -> BudgetResult<AnnualCategory> {
        self.write_lock()?.add_annual_category(month, name, target)
    }

    /// Overwrite a month's income, returning the previous value
    pub fn set_income(&self, month: &MonthKey, income: Money) -> BudgetResult<Money> {
        self.write_lock()?.set_income(month, income)
    }

    /// Append an expense
    pub fn log_expense(
        &self,
        month: &MonthKey,
        expense_type: ExpenseType,
        category_id: CategoryId,
        amount: Money,
    ) -> BudgetResult<Expense> {
        self.write_lock()?
            .log_expense(month, expense_type, category_id, amount)
    }

    fn read_lock(&self) -> BudgetResult<std::sync::RwLockReadGuard<'_, StateTree>> {
        self.tree
            .read()
            .map_err(|e| BudgetError::Persistence(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_lock(&self) -> BudgetResult<std::sync::RwLockWriteGuard<'_, StateTree>> {
        self.tree
            .write()
            .map_err(|e| BudgetError::Persistence(format!("Failed to acquire write lock: {}", e)))
    }
}
