//! Category CLI commands
//!
//! Implements CLI commands for adding monthly and annual categories to a
//! month and listing them.

use clap::Subcommand;

use super::month::print_overview;
use crate::config::settings::Settings;
use crate::display::budget::{format_category_list, format_missing_month};
use crate::error::BudgetResult;
use crate::models::Money;
use crate::services::{BudgetService, MonthResolver};
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Add a monthly spending category
    #[command(name = "add-monthly")]
    AddMonthly {
        /// Category name
        name: String,
        /// Amount budgeted for the month (e.g., "400" or "400.00")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Month; defaults to the selected month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Add an annual savings category
    #[command(name = "add-annual")]
    AddAnnual {
        /// Category name
        name: String,
        /// Target for the year (e.g., "1200")
        #[arg(allow_hyphen_values = true)]
        target: String,
        /// Month; defaults to the selected month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// List a month's categories
    List {
        /// Month; defaults to the selected month
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CategoryCommands,
) -> BudgetResult<()> {
    let service = BudgetService::new(storage);
    let resolver = MonthResolver::new(settings);

    match cmd {
        CategoryCommands::AddMonthly {
            name,
            amount,
            month,
        } => {
            let month = resolver.resolve(month.as_deref())?;
            let category =
                service.add_monthly_category(&month, &name, Money::normalize(&amount))?;
            println!(
                "Added monthly category '{}' with {} budgeted",
                category.name,
                category.budgeted.format_with_symbol(&settings.currency_symbol)
            );
            println!();
            print_overview(storage, settings, &month)?;
        }

        CategoryCommands::AddAnnual {
            name,
            target,
            month,
        } => {
            let month = resolver.resolve(month.as_deref())?;
            let category = service.add_annual_category(&month, &name, Money::normalize(&target))?;
            println!(
                "Added annual category '{}' with a target of {}",
                category.name,
                category.target.format_with_symbol(&settings.currency_symbol)
            );
            println!();
            print_overview(storage, settings, &month)?;
        }

        CategoryCommands::List { month } => {
            let month = resolver.resolve(month.as_deref())?;
            match service.get_budget(&month)? {
                Some(budget) => print!(
                    "{}",
                    format_category_list(&month, &budget, &settings.currency_symbol)
                ),
                None => println!("{}", format_missing_month(&month)),
            }
        }
    }

    Ok(())
}
