//! Budget aggregation
//!
//! Pure functions over a state tree snapshot. Nothing here mutates or caches:
//! every figure is recomputed from the stored ledger on each call.
//!
//! Monthly figures only look at the selected month. Annual figures are the
//! exception: an annual category is defined in one month, but spending
//! against it is summed over every month of the same calendar year.

use crate::models::{
    AnnualCategory, AnnualCategorySummary, Budget, CategoryId, ExpenseType, MonthKey,
    MonthOverview, MonthlyCategory, MonthlyCategorySummary, Money, StateTree,
};

/// Monthly expenses charged to a category in one month
///
/// Zero when the month has no budget.
pub fn monthly_spent(tree: &StateTree, month: &MonthKey, category_id: &CategoryId) -> Money {
    tree.budget(month)
        .map(|budget| spent_in_budget(budget, ExpenseType::Monthly, category_id))
        .unwrap_or_default()
}

/// budgeted - spent
pub fn monthly_remaining(category: &MonthlyCategory, spent: Money) -> Money {
    category.budgeted - spent
}

/// income - sum of budgeted over the month's monthly categories
pub fn planned_remaining(budget: &Budget) -> Money {
    budget.income - budget.total_budgeted()
}

/// income - monthly spending that landed in one of the month's categories
///
/// Monthly expenses whose category does not exist are left out.
pub fn left_to_spend(budget: &Budget) -> Money {
    let spent: Money = budget
        .monthly_categories
        .iter()
        .map(|c| spent_in_budget(budget, ExpenseType::Monthly, &c.id))
        .sum();
    budget.income - spent
}

/// Annual expenses charged to a category across every month of a year
pub fn annual_spent(tree: &StateTree, year: i32, category_id: &CategoryId) -> Money {
    tree.budgets_in_year(year)
        .map(|(_, budget)| spent_in_budget(budget, ExpenseType::Annual, category_id))
        .sum()
}

/// target + boost
pub fn annual_available(category: &AnnualCategory) -> Money {
    category.available()
}

/// available - spent over the year
pub fn annual_remaining(category: &AnnualCategory, tree: &StateTree, year: i32) -> Money {
    annual_available(category) - annual_spent(tree, year, &category.id)
}

/// Every annual category defined in any month of a year, oldest month first
pub fn annual_categories_in_year(tree: &StateTree, year: i32) -> Vec<&AnnualCategory> {
    tree.budgets_in_year(year)
        .flat_map(|(_, budget)| budget.annual_categories.iter())
        .collect()
}

/// Summarize one monthly category
pub fn monthly_summary(
    tree: &StateTree,
    month: &MonthKey,
    category: &MonthlyCategory,
) -> MonthlyCategorySummary {
    let spent = monthly_spent(tree, month, &category.id);
    MonthlyCategorySummary {
        category: category.clone(),
        spent,
        remaining: monthly_remaining(category, spent),
    }
}

/// Summarize one annual category over a year
pub fn annual_summary(
    tree: &StateTree,
    year: i32,
    category: &AnnualCategory,
) -> AnnualCategorySummary {
    let available = annual_available(category);
    let spent = annual_spent(tree, year, &category.id);
    AnnualCategorySummary {
        category: category.clone(),
        year,
        available,
        spent,
        remaining: available - spent,
    }
}

/// All figures for one month
///
/// Returns `None` when the month has no budget. That is the "no data" state,
/// distinct from a budget whose figures are all zero.
/// The annual section lists the categories defined in this month, each
/// rolled up over the month's year.
pub fn month_overview(tree: &StateTree, month: &MonthKey) -> Option<MonthOverview> {
    let budget = tree.budget(month)?;
    let year = month.year();

    let monthly: Vec<_> = budget
        .monthly_categories
        .iter()
        .map(|c| monthly_summary(tree, month, c))
        .collect();

    let annual: Vec<_> = budget
        .annual_categories
        .iter()
        .map(|c| annual_summary(tree, year, c))
        .collect();

    let year_annual = annual_categories_in_year(tree, year);
    let orphaned_expenses = budget
        .expenses
        .iter()
        .filter(|e| match e.expense_type {
            ExpenseType::Monthly => budget.monthly_category(&e.category_id).is_none(),
            ExpenseType::Annual => !year_annual.iter().any(|c| c.id == e.category_id),
        })
        .count();

    let total_budgeted = budget.total_budgeted();
    let total_spent: Money = monthly.iter().map(|s| s.spent).sum();

    Some(MonthOverview {
        month: *month,
        income: budget.income,
        total_budgeted,
        total_spent,
        planned_remaining: planned_remaining(budget),
        left_to_spend: left_to_spend(budget),
        monthly,
        annual,
        orphaned_expenses,
    })
}

fn spent_in_budget(budget: &Budget, expense_type: ExpenseType, category_id: &CategoryId) -> Money {
    budget
        .expenses
        .iter()
        .filter(|e| e.is_for(expense_type, category_id))
        .map(|e| e.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(year: i32, month: u32) -> MonthKey {
        MonthKey::new(year, month).unwrap()
    }

    fn dollars(d: i64) -> Money {
        Money::from_units(d)
    }

    /// Budget 2024-03: income 3000, Groceries 400, expenses 120 and 45
    fn groceries_scenario() -> (StateTree, CategoryId) {
        let mut tree = StateTree::new();
        let march = month(2024, 3);
        tree.create_month(march).unwrap();
        tree.set_income(&march, dollars(3000)).unwrap();
        let groceries = tree
            .add_monthly_category(&march, "Groceries", dollars(400))
            .unwrap();
        tree.log_expense(&march, ExpenseType::Monthly, groceries.id.clone(), dollars(120))
            .unwrap();
        tree.log_expense(&march, ExpenseType::Monthly, groceries.id.clone(), dollars(45))
            .unwrap();
        (tree, groceries.id)
    }

    #[test]
    fn test_groceries_scenario() {
        let (tree, groceries) = groceries_scenario();
        let march = month(2024, 3);
        let budget = tree.budget(&march).unwrap();
        let category = budget.monthly_category(&groceries).unwrap();

        let spent = monthly_spent(&tree, &march, &groceries);
        assert_eq!(spent, dollars(165));
        assert_eq!(monthly_remaining(category, spent), dollars(235));
        assert_eq!(planned_remaining(budget), dollars(2600));
        assert_eq!(left_to_spend(budget), dollars(2835));
    }

    #[test]
    fn test_monthly_spent_without_budget_is_zero() {
        let tree = StateTree::new();
        assert_eq!(
            monthly_spent(&tree, &month(2024, 1), &CategoryId::from("x")),
            Money::zero()
        );
    }

    #[test]
    fn test_remaining_equals_budgeted_without_expenses() {
        let mut tree = StateTree::new();
        let jan = month(2024, 1);
        tree.create_month(jan).unwrap();
        for (name, amount) in [("Rent", 1200), ("Fuel", 80), ("Fun", 0)] {
            tree.add_monthly_category(&jan, name, dollars(amount)).unwrap();
        }

        let overview = month_overview(&tree, &jan).unwrap();
        assert_eq!(overview.monthly.len(), 3);
        for summary in &overview.monthly {
            assert_eq!(summary.remaining, summary.category.budgeted);
            assert!(summary.spent.is_zero());
        }
    }

    #[test]
    fn test_monthly_spent_ignores_other_months_and_annual_expenses() {
        let (mut tree, groceries) = groceries_scenario();
        let april = month(2024, 4);
        tree.create_month(april).unwrap();
        tree.log_expense(&april, ExpenseType::Monthly, groceries.clone(), dollars(10))
            .unwrap();
        tree.log_expense(&month(2024, 3), ExpenseType::Annual, groceries.clone(), dollars(7))
            .unwrap();

        assert_eq!(monthly_spent(&tree, &month(2024, 3), &groceries), dollars(165));
        assert_eq!(monthly_spent(&tree, &april, &groceries), dollars(10));
    }

    #[test]
    fn test_annual_spent_spans_the_year() {
        let mut tree = StateTree::new();
        let jan = month(2024, 1);
        let nov = month(2024, 11);
        tree.create_month(jan).unwrap();
        tree.create_month(nov).unwrap();

        let travel = tree
            .add_annual_category(&jan, "Travel", dollars(1200))
            .unwrap();
        tree.log_expense(&nov, ExpenseType::Annual, travel.id.clone(), dollars(50))
            .unwrap();

        assert_eq!(annual_spent(&tree, 2024, &travel.id), dollars(50));
        assert_eq!(annual_remaining(&travel, &tree, 2024), dollars(1150));

        // The January overview reports November's spending
        let overview = month_overview(&tree, &jan).unwrap();
        assert_eq!(overview.annual[0].spent, dollars(50));
        assert_eq!(overview.orphaned_expenses, 0);
    }

    #[test]
    fn test_annual_spent_excludes_other_years() {
        let mut tree = StateTree::new();
        let dec = month(2023, 12);
        let jan = month(2024, 1);
        tree.create_month(dec).unwrap();
        tree.create_month(jan).unwrap();

        let gifts = tree.add_annual_category(&jan, "Gifts", dollars(500)).unwrap();
        tree.log_expense(&dec, ExpenseType::Annual, gifts.id.clone(), dollars(100))
            .unwrap();
        tree.log_expense(&jan, ExpenseType::Annual, gifts.id.clone(), dollars(30))
            .unwrap();

        assert_eq!(annual_spent(&tree, 2024, &gifts.id), dollars(30));
        assert_eq!(annual_spent(&tree, 2023, &gifts.id), dollars(100));
    }

    #[test]
    fn test_annual_available_includes_boost() {
        let mut category = AnnualCategory::new("Car", dollars(1000));
        category.boost = dollars(200);
        assert_eq!(annual_available(&category), dollars(1200));
    }

    #[test]
    fn test_orphaned_expense_counts_nowhere() {
        let (mut tree, _) = groceries_scenario();
        let march = month(2024, 3);
        tree.log_expense(&march, ExpenseType::Monthly, CategoryId::from("ghost"), dollars(999))
            .unwrap();
        tree.log_expense(&march, ExpenseType::Annual, CategoryId::from("ghost"), dollars(5))
            .unwrap();

        let overview = month_overview(&tree, &march).unwrap();
        assert_eq!(overview.monthly[0].spent, dollars(165));
        assert_eq!(overview.total_spent, dollars(165));
        assert_eq!(overview.left_to_spend, dollars(2835));
        assert_eq!(overview.orphaned_expenses, 2);
    }

    #[test]
    fn test_overspent_threshold() {
        let mut tree = StateTree::new();
        let jan = month(2024, 1);
        tree.create_month(jan).unwrap();
        tree.set_income(&jan, dollars(100)).unwrap();
        let food = tree.add_monthly_category(&jan, "Food", dollars(100)).unwrap();

        tree.log_expense(&jan, ExpenseType::Monthly, food.id.clone(), dollars(100))
            .unwrap();
        let overview = month_overview(&tree, &jan).unwrap();
        assert!(overview.left_to_spend.is_zero());
        assert!(!overview.is_overspent());

        tree.log_expense(&jan, ExpenseType::Monthly, food.id.clone(), Money::from_cents(1))
            .unwrap();
        let overview = month_overview(&tree, &jan).unwrap();
        assert_eq!(overview.left_to_spend, Money::from_cents(-1));
        assert!(overview.is_overspent());
        assert!(overview.monthly[0].is_overspent());
    }

    #[test]
    fn test_huge_amounts_pin_instead_of_wrapping() {
        let mut tree = StateTree::new();
        let jan = month(2024, 1);
        tree.create_month(jan).unwrap();
        let huge = Money::normalize("92233720368547758");
        let rent = tree.add_monthly_category(&jan, "Rent", -huge).unwrap();
        tree.add_monthly_category(&jan, "Rent again", -huge).unwrap();
        tree.log_expense(&jan, ExpenseType::Monthly, rent.id.clone(), huge)
            .unwrap();
        tree.log_expense(&jan, ExpenseType::Monthly, rent.id.clone(), huge)
            .unwrap();

        let overview = month_overview(&tree, &jan).unwrap();
        assert_eq!(overview.total_spent, Money::from_cents(i64::MAX));
        assert_eq!(overview.left_to_spend, Money::from_cents(-i64::MAX));
        assert_eq!(overview.planned_remaining, Money::from_cents(i64::MAX));
        assert!(overview.is_overspent());
    }

    #[test]
    fn test_no_budget_means_no_data() {
        let mut tree = StateTree::new();
        assert!(month_overview(&tree, &month(2024, 5)).is_none());

        tree.create_month(month(2024, 5)).unwrap();
        let overview = month_overview(&tree, &month(2024, 5)).unwrap();
        assert!(overview.income.is_zero());
        assert!(overview.monthly.is_empty());
    }

    #[test]
    fn test_overview_is_deterministic() {
        let (tree, _) = groceries_scenario();
        let march = month(2024, 3);
        assert_eq!(month_overview(&tree, &march), month_overview(&tree, &march));
    }

    #[test]
    fn test_annual_categories_in_year() {
        let mut tree = StateTree::new();
        let jan = month(2024, 1);
        let jun = month(2024, 6);
        let next_jan = month(2025, 1);
        for m in [jan, jun, next_jan] {
            tree.create_month(m).unwrap();
        }
        tree.add_annual_category(&jun, "Car", dollars(1)).unwrap();
        tree.add_annual_category(&jan, "Travel", dollars(1)).unwrap();
        tree.add_annual_category(&next_jan, "Later", dollars(1)).unwrap();

        let names: Vec<_> = annual_categories_in_year(&tree, 2024)
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Travel", "Car"]);
    }
}
