//! Dashboard module
//!
//! Summarises expenses for the personal and group dashboards: headline
//! metric cards, per-period breakdowns and date-sorted expense tables.

mod cards;
mod summary;

pub use cards::{MetricCard, metric_cards};
pub use summary::{
    Dashboard, DashboardView, MonthSummary, PeriodSummary, TopCategorySummary, build_dashboard,
};
