//! Month CLI commands
//!
//! Implements CLI commands for creating, selecting, and viewing monthly
//! budgets.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::budget::{format_missing_month, format_month_list, format_month_overview};
use crate::error::BudgetResult;
use crate::models::MonthKey;
use crate::services::{BudgetService, MonthResolver};
use crate::storage::Storage;

/// Month subcommands
#[derive(Subcommand)]
pub enum MonthCommands {
    /// Create an empty budget for a month
    Create {
        /// Month (e.g., "2025-01", "January", "next"); defaults to the selected month
        month: Option<String>,
    },

    /// Select the month other commands act on by default
    Select {
        /// Month (e.g., "2025-01", "January", "current")
        month: String,
    },

    /// Show the budget overview for a month
    Show {
        /// Month; defaults to the selected month
        month: Option<String>,
    },

    /// List all months that have a budget
    List,
}

/// Handle a month command
pub fn handle_month_command(
    storage: &Storage,
    settings: &mut Settings,
    cmd: MonthCommands,
) -> BudgetResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        MonthCommands::Create { month } => {
            let month = MonthResolver::new(settings).resolve(month.as_deref())?;
            service.create_month(month)?;
            println!("Created budget for {}", month.friendly());
            println!();
            print_overview(storage, settings, &month)?;
        }

        MonthCommands::Select { month } => {
            let month = MonthResolver::new(settings).parse(&month)?;
            settings.selected_month = Some(month);
            settings.save(storage.paths())?;
            println!("Selected {}", month.friendly());

            if service.get_budget(&month)?.is_none() {
                println!();
                println!("{}", format_missing_month(&month));
            }
        }

        MonthCommands::Show { month } => {
            let month = MonthResolver::new(settings).resolve(month.as_deref())?;
            print_overview(storage, settings, &month)?;
        }

        MonthCommands::List => {
            let months = service.list_months()?;
            print!(
                "{}",
                format_month_list(&months, settings.selected_month.as_ref())
            );
            if !months.is_empty() {
                println!();
            }
        }
    }

    Ok(())
}

/// Print a month's overview, or how to start one if it has no budget
pub(crate) fn print_overview(
    storage: &Storage,
    settings: &Settings,
    month: &MonthKey,
) -> BudgetResult<()> {
    match BudgetService::new(storage).overview(month)? {
        Some(overview) => print!(
            "{}",
            format_month_overview(&overview, &settings.currency_symbol)
        ),
        None => println!("{}", format_missing_month(month)),
    }
    Ok(())
}
