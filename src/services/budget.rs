//! Budget service
//!
//! One entry point per user operation. Each mutates the in-memory ledger,
//! saves it, and then records the change in the audit log. Missing or
//! duplicate months are reported before anything is written.

use crate::audit::{AuditEntry, EntityType};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    AnnualCategory, Budget, CategoryId, Expense, ExpenseType, MonthKey, MonthOverview,
    MonthlyCategory, Money, StateTree,
};
use crate::services::aggregator;
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

/// How user input for an expense's category was resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryRef {
    /// Matched a category by name or id
    Known { id: CategoryId, name: String },
    /// Matched nothing; the input is used as the id verbatim
    Unmatched(CategoryId),
}

impl CategoryRef {
    pub fn id(&self) -> &CategoryId {
        match self {
            CategoryRef::Known { id, .. } => id,
            CategoryRef::Unmatched(id) => id,
        }
    }
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create an empty budget for a month
    pub fn create_month(&self, month: MonthKey) -> BudgetResult<Budget> {
        let budget = self.storage.ledger.create_month(month)?;
        self.storage.ledger.save()?;

        self.storage.record(
            AuditEntry::created(month, EntityType::Month, month.to_string(), &budget)
                .with_label(month.friendly()),
        )?;

        Ok(budget)
    }

    /// Add a monthly spending category to an existing month
    pub fn add_monthly_category(
        &self,
        month: &MonthKey,
        name: &str,
        budgeted: Money,
    ) -> BudgetResult<MonthlyCategory> {
        let name = validate_name(name)?;
        let category = self
            .storage
            .ledger
            .add_monthly_category(month, name, budgeted)?;
        self.storage.ledger.save()?;

        self.storage.record(
            AuditEntry::created(*month, EntityType::MonthlyCategory, category.id.as_str(), &category)
                .with_label(category.name.clone()),
        )?;

        Ok(category)
    }

    /// Add an annual savings category to an existing month
    pub fn add_annual_category(
        &self,
        month: &MonthKey,
        name: &str,
        target: Money,
    ) -> BudgetResult<AnnualCategory> {
        let name = validate_name(name)?;
        let category = self
            .storage
            .ledger
            .add_annual_category(month, name, target)?;
        self.storage.ledger.save()?;

        self.storage.record(
            AuditEntry::created(*month, EntityType::AnnualCategory, category.id.as_str(), &category)
                .with_label(category.name.clone()),
        )?;

        Ok(category)
    }

    /// Set a month's income
    pub fn set_income(&self, month: &MonthKey, income: Money) -> BudgetResult<Money> {
        let before = self.storage.ledger.set_income(month, income)?;
        self.storage.ledger.save()?;

        self.storage.record(
            AuditEntry::changed(*month, EntityType::Income, month.to_string(), &before, &income)
                .with_note(format!("{} -> {}", before, income)),
        )?;

        Ok(before)
    }

    /// Log an expense in a month
    ///
    /// The category id is stored as given, whether or not it names a category.
    pub fn log_expense(
        &self,
        month: &MonthKey,
        expense_type: ExpenseType,
        category_id: CategoryId,
        amount: Money,
    ) -> BudgetResult<Expense> {
        let expense = self
            .storage
            .ledger
            .log_expense(month, expense_type, category_id, amount)?;
        self.storage.ledger.save()?;

        self.storage.record(
            AuditEntry::created(*month, EntityType::Expense, expense.id.as_str(), &expense)
                .with_label(format!("{} {}", expense.expense_type, expense.amount)),
        )?;

        Ok(expense)
    }

    /// Resolve user input to the category an expense should be charged to
    ///
    /// Monthly expenses look at the month's own categories. Annual expenses
    /// look at every annual category defined in the month's year.
    pub fn resolve_category(
        &self,
        month: &MonthKey,
        expense_type: ExpenseType,
        input: &str,
    ) -> BudgetResult<CategoryRef> {
        let tree = self.snapshot()?;
        let budget = tree
            .budget(month)
            .ok_or(BudgetError::NoSuchMonth(*month))?;

        let found = match expense_type {
            ExpenseType::Monthly => budget
                .find_monthly_category(input)
                .map(|c| (c.id.clone(), c.name.clone())),
            ExpenseType::Annual => aggregator::annual_categories_in_year(&tree, month.year())
                .into_iter()
                .find(|c| c.matches(input))
                .map(|c| (c.id.clone(), c.name.clone())),
        };

        Ok(match found {
            Some((id, name)) => CategoryRef::Known { id, name },
            None => CategoryRef::Unmatched(CategoryId::from_string(input.trim())),
        })
    }

    /// Get a copy of a month's budget
    pub fn get_budget(&self, month: &MonthKey) -> BudgetResult<Option<Budget>> {
        self.storage.ledger.get(month)
    }

    /// All months with a budget, oldest first
    pub fn list_months(&self) -> BudgetResult<Vec<MonthKey>> {
        self.storage.ledger.months()
    }

    /// Figures for one month, or `None` if the month has no budget
    pub fn overview(&self, month: &MonthKey) -> BudgetResult<Option<MonthOverview>> {
        let tree = self.snapshot()?;
        Ok(aggregator::month_overview(&tree, month))
    }

    /// A copy of the whole ledger
    pub fn snapshot(&self) -> BudgetResult<StateTree> {
        self.storage.ledger.snapshot()
    }
}

fn validate_name(name: &str) -> BudgetResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BudgetError::Validation(
            "Category name cannot be empty".into(),
        ));
    }
    Ok(name)
}
