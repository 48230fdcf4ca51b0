//! Builds the summaries shown on the expense dashboard.
//!
//! Each summary holds the numbers for one dashboard panel: the headline
//! amount, the pie chart slices and the date-sorted expense table. Rendering
//! is left to the caller.

use serde::Serialize;
use time::{Date, Month};

use crate::{
    Error,
    expense::ExpenseRecord,
    query::{
        GroupKey, Slice, breakdown, for_month, previous_month_of, sort_by_date_descending,
        top_category, total,
    },
};

/// Which set of expenses the dashboard summarises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DashboardView {
    /// A single person's expenses.
    Personal,
    /// Expenses shared by a group, broken down by spender as well as category.
    Group,
}

impl DashboardView {
    fn spender_breakdown(self, expenses: &[&ExpenseRecord]) -> Option<Vec<Slice>> {
        match self {
            DashboardView::Personal => None,
            DashboardView::Group => Some(breakdown(expenses.iter().copied(), GroupKey::Spender)),
        }
    }
}

/// The total, breakdowns and expense table for a set of expenses.
#[derive(Debug, PartialEq, Serialize)]
pub struct PeriodSummary<'a> {
    /// The amount spent.
    pub total: f64,
    /// The amount spent per category.
    pub by_category: Vec<Slice>,
    /// The amount spent per spender, only for group dashboards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_spender: Option<Vec<Slice>>,
    /// The expenses, most recent first.
    pub expenses: Vec<&'a ExpenseRecord>,
}

impl<'a> PeriodSummary<'a> {
    fn new(expenses: &[&'a ExpenseRecord], view: DashboardView) -> Self {
        Self {
            total: total(expenses.iter().copied()),
            by_category: breakdown(expenses.iter().copied(), GroupKey::Category),
            by_spender: view.spender_breakdown(expenses),
            expenses: sort_by_date_descending(expenses.iter().copied()),
        }
    }
}

/// The summary of one calendar month.
#[derive(Debug, PartialEq, Serialize)]
pub struct MonthSummary<'a> {
    /// The year of the month.
    pub year: i32,
    /// The calendar month.
    pub month: Month,
    /// The expenses in the month.
    #[serde(flatten)]
    pub summary: PeriodSummary<'a>,
}

impl<'a> MonthSummary<'a> {
    fn new(expenses: &'a [ExpenseRecord], year: i32, month: Month, view: DashboardView) -> Self {
        Self {
            year,
            month,
            summary: PeriodSummary::new(&for_month(expenses, year, month), view),
        }
    }
}

/// The most frequent category and where the money in it went.
#[derive(Debug, PartialEq, Serialize)]
pub struct TopCategorySummary<'a> {
    /// The category with the most expenses.
    pub category: String,
    /// The amount spent in the category.
    pub amount: f64,
    /// The number of expenses in the category.
    pub count: usize,
    /// The amount spent per description within the category.
    pub by_description: Vec<Slice>,
    /// The amount spent per spender within the category, only for group dashboards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_spender: Option<Vec<Slice>>,
    /// The expenses in the category, most recent first.
    pub expenses: Vec<&'a ExpenseRecord>,
}

/// Everything needed to render the expense dashboard.
#[derive(Debug, PartialEq, Serialize)]
pub struct Dashboard<'a> {
    /// Whether this is a personal or group dashboard.
    pub view: DashboardView,
    /// All expenses regardless of date. The category breakdown doubles as the
    /// overall expense distribution.
    pub all_time: PeriodSummary<'a>,
    /// The month containing `today`.
    pub this_month: MonthSummary<'a>,
    /// The month before `this_month`.
    pub last_month: MonthSummary<'a>,
    /// The most frequent category.
    pub top_category: TopCategorySummary<'a>,
}

/// Summarises `expenses` for the dashboard.
///
/// `today` determines the current and previous month. It is passed in rather
/// than read from the clock so the caller controls the timezone, see
/// [crate::today_in].
///
/// # Errors
///
/// Returns [Error::EmptyDataset] if `expenses` is empty, in which case the
/// caller should show an empty state instead of a dashboard.
pub fn build_dashboard(
    expenses: &[ExpenseRecord],
    today: Date,
    view: DashboardView,
) -> Result<Dashboard<'_>, Error> {
    let top = top_category(expenses)?;

    let (year, month) = (today.year(), today.month());
    let (last_year, last_month) = previous_month_of(year, month);

    let all_expenses: Vec<&ExpenseRecord> = expenses.iter().collect();
    let top_expenses: Vec<&ExpenseRecord> = expenses
        .iter()
        .filter(|expense| expense.category() == top.category)
        .collect();

    let dashboard = Dashboard {
        view,
        all_time: PeriodSummary::new(&all_expenses, view),
        this_month: MonthSummary::new(expenses, year, month, view),
        last_month: MonthSummary::new(expenses, last_year, last_month, view),
        top_category: TopCategorySummary {
            by_description: breakdown(top_expenses.iter().copied(), GroupKey::Description),
            by_spender: view.spender_breakdown(&top_expenses),
            expenses: sort_by_date_descending(top_expenses.iter().copied()),
            category: top.category,
            amount: top.amount,
            count: top.count,
        },
    };

    tracing::debug!(
        "Built {view:?} dashboard for {today} from {} expenses, {} this month and {} last month",
        expenses.len(),
        dashboard.this_month.summary.expenses.len(),
        dashboard.last_month.summary.expenses.len(),
    );

    Ok(dashboard)
}

#[cfg(test)]
mod tests {
    use time::{Date, Month, macros::date};

    use super::{DashboardView, build_dashboard};
    use crate::{Error, expense::ExpenseRecord};

    fn create_test_expense(
        date: Date,
        amount: f64,
        category: &str,
        description: &str,
        spender: &str,
    ) -> ExpenseRecord {
        ExpenseRecord::new(date, amount, category, description)
            .unwrap()
            .with_spender(spender)
    }

    fn test_expenses() -> Vec<ExpenseRecord> {
        vec![
            create_test_expense(date!(2023 - 12 - 20), 40.0, "Gifts", "Present", "Alice"),
            create_test_expense(date!(2024 - 01 - 05), 100.0, "Food", "Groceries", "Alice"),
            create_test_expense(date!(2024 - 01 - 10), 50.0, "Food", "Takeaway", "Bob"),
            create_test_expense(date!(2024 - 01 - 12), 75.0, "Travel", "Train", "Bob"),
            create_test_expense(date!(2024 - 01 - 14), 25.0, "Food", "Groceries", "Bob"),
        ]
    }

    #[test]
    fn empty_expenses_is_empty_dataset_error() {
        let expenses: Vec<ExpenseRecord> = vec![];

        let result = build_dashboard(&expenses, date!(2024 - 01 - 15), DashboardView::Personal);

        assert_eq!(result, Err(Error::EmptyDataset));
    }

    #[test]
    fn summarises_all_time_and_months() {
        let expenses = test_expenses();

        let dashboard =
            build_dashboard(&expenses, date!(2024 - 01 - 15), DashboardView::Personal).unwrap();

        assert_eq!(dashboard.all_time.total, 290.0);
        assert_eq!(dashboard.this_month.year, 2024);
        assert_eq!(dashboard.this_month.month, Month::January);
        assert_eq!(dashboard.this_month.summary.total, 250.0);
        assert_eq!(dashboard.last_month.year, 2023);
        assert_eq!(dashboard.last_month.month, Month::December);
        assert_eq!(dashboard.last_month.summary.total, 40.0);
    }

    #[test]
    fn month_with_no_expenses_has_zero_total() {
        let expenses = test_expenses();

        let dashboard =
            build_dashboard(&expenses, date!(2024 - 03 - 01), DashboardView::Personal).unwrap();

        assert_eq!(dashboard.this_month.summary.total, 0.0);
        assert!(dashboard.this_month.summary.expenses.is_empty());
        assert!(dashboard.this_month.summary.by_category.is_empty());
        assert_eq!(dashboard.last_month.month, Month::February);
        assert_eq!(dashboard.last_month.summary.total, 0.0);
    }

    #[test]
    fn expense_tables_are_most_recent_first() {
        let expenses = test_expenses();

        let dashboard =
            build_dashboard(&expenses, date!(2024 - 01 - 15), DashboardView::Personal).unwrap();

        let dates: Vec<_> = dashboard
            .this_month
            .summary
            .expenses
            .iter()
            .map(|expense| expense.date())
            .collect();
        assert_eq!(
            dates,
            vec![
                date!(2024 - 01 - 14),
                date!(2024 - 01 - 12),
                date!(2024 - 01 - 10),
                date!(2024 - 01 - 05)
            ]
        );
    }

    #[test]
    fn top_category_panel_breaks_down_by_description() {
        let expenses = test_expenses();

        let dashboard =
            build_dashboard(&expenses, date!(2024 - 01 - 15), DashboardView::Personal).unwrap();
        let top = &dashboard.top_category;

        assert_eq!(top.category, "Food");
        assert_eq!(top.amount, 175.0);
        assert_eq!(top.count, 3);
        assert_eq!(top.by_description.len(), 2);
        assert_eq!(top.by_description[0].label, "Groceries");
        assert_eq!(top.by_description[0].amount, 125.0);
        assert_eq!(top.by_description[1].label, "Takeaway");
        assert_eq!(top.expenses.len(), 3);
        assert_eq!(top.by_spender, None);
    }

    #[test]
    fn personal_dashboard_has_no_spender_breakdown() {
        let expenses = test_expenses();

        let dashboard =
            build_dashboard(&expenses, date!(2024 - 01 - 15), DashboardView::Personal).unwrap();

        assert_eq!(dashboard.all_time.by_spender, None);
        assert_eq!(dashboard.this_month.summary.by_spender, None);
    }

    #[test]
    fn group_dashboard_breaks_down_by_spender() {
        let expenses = test_expenses();

        let dashboard =
            build_dashboard(&expenses, date!(2024 - 01 - 15), DashboardView::Group).unwrap();

        let by_spender = dashboard.this_month.summary.by_spender.unwrap();
        assert_eq!(by_spender.len(), 2);
        assert_eq!(by_spender[0].label, "Alice");
        assert_eq!(by_spender[0].amount, 100.0);
        assert_eq!(by_spender[1].label, "Bob");
        assert_eq!(by_spender[1].amount, 150.0);

        let top_by_spender = dashboard.top_category.by_spender.unwrap();
        assert_eq!(top_by_spender[0].label, "Alice");
        assert_eq!(top_by_spender[0].amount, 100.0);
        assert_eq!(top_by_spender[1].label, "Bob");
        assert_eq!(top_by_spender[1].amount, 75.0);
    }

    #[test]
    fn all_time_breakdown_is_overall_distribution() {
        let expenses = test_expenses();

        let dashboard =
            build_dashboard(&expenses, date!(2024 - 01 - 15), DashboardView::Personal).unwrap();

        let labels: Vec<_> = dashboard
            .all_time
            .by_category
            .iter()
            .map(|slice| slice.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Gifts", "Food", "Travel"]);
    }
}
