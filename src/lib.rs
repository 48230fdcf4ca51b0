//! Expense dashboard is a library for summarising personal and group expenses.
//!
//! It answers the questions an expense dashboard asks (how much was spent in
//! total, this month and last month, which category comes up most often, and
//! where the money went) and leaves rendering to the caller.
//!
//! Expenses are loaded with [parse_csv] or built with [ExpenseRecord::new],
//! queried with the functions in [query], and summarised for display with
//! [dashboard::build_dashboard].

#![warn(missing_docs)]

mod csv;
pub mod dashboard;
mod error;
mod expense;
mod format;
pub mod query;
mod timezone;

pub use crate::csv::parse_csv;
pub use error::Error;
pub use expense::{ExpenseRecord, UNCATEGORIZED_LABEL};
pub use format::{CurrencyFormat, DEFAULT_CURRENCY_SYMBOL};
pub use timezone::{get_local_offset, today_in};
