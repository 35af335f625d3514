//! Expense CLI commands
//!
//! Implements CLI commands for logging expenses against monthly or annual
//! categories and listing a month's expenses.

use clap::Subcommand;

use super::month::print_overview;
use crate::config::settings::Settings;
use crate::display::budget::{format_expense_list, format_missing_month};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{ExpenseType, Money};
use crate::services::{aggregator, BudgetService, CategoryRef, MonthResolver};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Log an expense
    Log {
        /// Expense type (monthly, annual)
        kind: String,
        /// Category name or ID
        category: String,
        /// Amount spent (e.g., "45" or "45.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Month; defaults to the selected month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// List a month's expenses
    List {
        /// Month; defaults to the selected month
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> BudgetResult<()> {
    let service = BudgetService::new(storage);
    let resolver = MonthResolver::new(settings);
    let symbol = &settings.currency_symbol;

    match cmd {
        ExpenseCommands::Log {
            kind,
            category,
            amount,
            month,
        } => {
            let expense_type = ExpenseType::parse(&kind).ok_or_else(|| {
                BudgetError::Validation(format!(
                    "Invalid expense type: '{}'. Valid types: monthly, annual",
                    kind
                ))
            })?;
            let month = resolver.resolve(month.as_deref())?;

            let resolved = service.resolve_category(&month, expense_type, &category)?;
            let expense = service.log_expense(
                &month,
                expense_type,
                resolved.id().clone(),
                Money::normalize(&amount),
            )?;

            match &resolved {
                CategoryRef::Known { name, .. } => println!(
                    "Logged {} {} expense to '{}'",
                    expense.amount.format_with_symbol(symbol),
                    expense_type,
                    name
                ),
                CategoryRef::Unmatched(id) => {
                    println!(
                        "Logged {} {} expense to '{}'",
                        expense.amount.format_with_symbol(symbol),
                        expense_type,
                        id
                    );
                    println!(
                        "Note: no {} category matches '{}'; the expense is kept but not counted",
                        expense_type, id
                    );
                }
            }
            println!();
            print_overview(storage, settings, &month)?;
        }

        ExpenseCommands::List { month } => {
            let month = resolver.resolve(month.as_deref())?;
            let tree = service.snapshot()?;
            match tree.budget(&month) {
                Some(budget) => {
                    let annual = aggregator::annual_categories_in_year(&tree, month.year());
                    println!("{}", format_expense_list(&month, budget, &annual, symbol));
                }
                None => println!("{}", format_missing_month(&month)),
            }
        }
    }

    Ok(())
}
