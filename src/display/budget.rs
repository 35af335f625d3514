//! Month display formatting
//!
//! Renders a month overview, the list of budgeted months, and a month's
//! categories and expenses for the terminal.

use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use crate::models::{AnnualCategory, Budget, ExpenseType, MonthKey, MonthOverview, Money};

#[derive(Tabled)]
struct MonthlyRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Budgeted")]
    budgeted: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
}

#[derive(Tabled)]
struct AnnualRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Available")]
    available: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
}

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "ID")]
    id: String,
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::new(1..), Alignment::right());
    table.to_string()
}

/// Flag negative amounts so they stand out without color
fn flagged(amount: Money, symbol: &str) -> String {
    let text = amount.format_with_symbol(symbol);
    if amount.is_negative() {
        format!("{} !", text)
    } else {
        text
    }
}

/// Message shown when a month has no budget yet
pub fn format_missing_month(month: &MonthKey) -> String {
    format!(
        "No budget for {}.\n\nRun 'pocket month create {}' to start one.",
        month.friendly(),
        month
    )
}

/// Format everything shown for one month
pub fn format_month_overview(overview: &MonthOverview, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Budget: {}\n", overview.month.friendly()));
    output.push_str(&format!("{}\n", "=".repeat(48)));
    output.push_str(&format!(
        "Income:            {:>14}\n",
        overview.income.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Budgeted:          {:>14}\n",
        overview.total_budgeted.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Planned remaining: {:>14}\n",
        flagged(overview.planned_remaining, symbol)
    ));
    output.push_str(&format!(
        "Spent:             {:>14}\n",
        overview.total_spent.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Left to spend:     {:>14}\n",
        flagged(overview.left_to_spend, symbol)
    ));

    if overview.is_overspent() {
        output.push_str("\nOVERSPENT: spending exceeds income this month.\n");
    }

    output.push_str("\nMonthly categories\n");
    if overview.monthly.is_empty() {
        output.push_str("  (none)\n");
    } else {
        let rows: Vec<MonthlyRow> = overview
            .monthly
            .iter()
            .map(|s| MonthlyRow {
                name: s.category.name.clone(),
                budgeted: s.category.budgeted.format_with_symbol(symbol),
                spent: s.spent.format_with_symbol(symbol),
                remaining: flagged(s.remaining, symbol),
            })
            .collect();
        output.push_str(&render(rows));
        output.push('\n');
    }

    output.push_str(&format!("\nAnnual categories ({})\n", overview.month.year()));
    if overview.annual.is_empty() {
        output.push_str("  (none)\n");
    } else {
        let rows: Vec<AnnualRow> = overview
            .annual
            .iter()
            .map(|s| AnnualRow {
                name: s.category.name.clone(),
                available: s.available.format_with_symbol(symbol),
                spent: s.spent.format_with_symbol(symbol),
                remaining: flagged(s.remaining, symbol),
            })
            .collect();
        output.push_str(&render(rows));
        output.push('\n');
    }

    if overview.orphaned_expenses > 0 {
        output.push_str(&format!(
            "\n{} expense(s) match no category and are not counted above.\n",
            overview.orphaned_expenses
        ));
    }

    output
}

/// Format the list of months that have a budget
pub fn format_month_list(months: &[MonthKey], selected: Option<&MonthKey>) -> String {
    if months.is_empty() {
        return "No months budgeted yet.\n\nRun 'pocket month create' to start one.".to_string();
    }

    let mut output = String::from("Months:\n");
    for month in months {
        let marker = if Some(month) == selected { "*" } else { " " };
        output.push_str(&format!("{} {}  {}\n", marker, month, month.friendly()));
    }
    output
}

/// Format a month's categories
pub fn format_category_list(month: &MonthKey, budget: &Budget, symbol: &str) -> String {
    let mut output = format!("Categories for {}\n", month.friendly());

    output.push_str("\nMonthly\n");
    if budget.monthly_categories.is_empty() {
        output.push_str("  (none)\n");
    }
    for category in &budget.monthly_categories {
        output.push_str(&format!(
            "  {:<24} {:>12}  [{}]\n",
            category.name,
            category.budgeted.format_with_symbol(symbol),
            category.id.short()
        ));
    }

    output.push_str("\nAnnual\n");
    if budget.annual_categories.is_empty() {
        output.push_str("  (none)\n");
    }
    for category in &budget.annual_categories {
        output.push_str(&format!(
            "  {:<24} {:>12}  [{}]\n",
            category.name,
            category.available().format_with_symbol(symbol),
            category.id.short()
        ));
    }

    output
}

/// Format a month's expenses
///
/// `annual_categories` is every annual category of the month's year, so
/// annual expenses charged to a category defined in another month still
/// show its name.
pub fn format_expense_list(
    month: &MonthKey,
    budget: &Budget,
    annual_categories: &[&AnnualCategory],
    symbol: &str,
) -> String {
    if budget.expenses.is_empty() {
        return format!("No expenses logged for {}.", month.friendly());
    }

    let rows: Vec<ExpenseRow> = budget
        .expenses
        .iter()
        .map(|e| {
            let name = match e.expense_type {
                ExpenseType::Monthly => budget
                    .monthly_category(&e.category_id)
                    .map(|c| c.name.clone()),
                ExpenseType::Annual => annual_categories
                    .iter()
                    .find(|c| c.id == e.category_id)
                    .map(|c| c.name.clone()),
            };
            ExpenseRow {
                kind: e.expense_type.to_string(),
                category: name.unwrap_or_else(|| format!("{} (no category)", e.category_id)),
                amount: e.amount.format_with_symbol(symbol),
                id: e.id.short().to_string(),
            }
        })
        .collect();

    format!("Expenses for {}\n{}", month.friendly(), render(rows))
}
