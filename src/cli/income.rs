//! Income CLI commands

use clap::Subcommand;

use super::month::print_overview;
use crate::config::settings::Settings;
use crate::error::BudgetResult;
use crate::models::Money;
use crate::services::{BudgetService, MonthResolver};
use crate::storage::Storage;

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Set a month's income
    Set {
        /// Income for the month (e.g., "3000" or "3000.00")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Month; defaults to the selected month
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle an income command
pub fn handle_income_command(
    storage: &Storage,
    settings: &Settings,
    cmd: IncomeCommands,
) -> BudgetResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        IncomeCommands::Set { amount, month } => {
            let month = MonthResolver::new(settings).resolve(month.as_deref())?;
            let income = Money::normalize(&amount);
            let before = service.set_income(&month, income)?;

            let symbol = &settings.currency_symbol;
            println!(
                "Income for {}: {} (was {})",
                month.friendly(),
                income.format_with_symbol(symbol),
                before.format_with_symbol(symbol)
            );
            println!();
            print_overview(storage, settings, &month)?;
        }
    }

    Ok(())
}
