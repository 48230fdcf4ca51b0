//! Metric cards for the headline numbers at the top of the dashboard.
//!
//! Provides cards showing:
//! - Total spent across all time
//! - Spending this month and last month
//! - The most frequent category and how much was spent on it

use serde::Serialize;

use crate::{
    dashboard::summary::{Dashboard, DashboardView},
    format::CurrencyFormat,
};

/// The text of a single metric card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricCard {
    /// What the card measures, e.g., "TOTAL SPENT".
    pub title: String,
    /// The headline value.
    pub value: String,
    /// Context for the value, e.g., the period it covers.
    pub subtitle: String,
}

impl MetricCard {
    fn new(title: &str, value: String, subtitle: String) -> Self {
        Self {
            title: title.to_owned(),
            value,
            subtitle,
        }
    }
}

/// Creates the four headline cards for `dashboard`, in display order.
pub fn metric_cards(dashboard: &Dashboard, currency: &CurrencyFormat) -> Vec<MetricCard> {
    let month_subtitle = match dashboard.view {
        DashboardView::Personal => "Expenses",
        DashboardView::Group => "Group Expenses",
    };

    vec![
        MetricCard::new(
            "TOTAL SPENT",
            currency.format(dashboard.all_time.total),
            "All Time".to_owned(),
        ),
        MetricCard::new(
            "THIS MONTH",
            currency.format(dashboard.this_month.summary.total),
            month_subtitle.to_owned(),
        ),
        MetricCard::new(
            "LAST MONTH",
            currency.format(dashboard.last_month.summary.total),
            month_subtitle.to_owned(),
        ),
        MetricCard::new(
            "TOP CATEGORY",
            dashboard.top_category.category.clone(),
            currency.format(dashboard.top_category.amount),
        ),
    ]
}
