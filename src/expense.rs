//! The expense record that every dashboard query operates on.

use serde::Serialize;
use time::Date;

use crate::Error;

/// The category assigned to expenses that were logged without one.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// A single logged expense.
///
/// Records are validated when they are created, so queries can assume that
/// the amount is a finite, non-negative number and that the category is not
/// empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseRecord {
    date: Date,
    amount: f64,
    category: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    spender: Option<String>,
}

impl ExpenseRecord {
    /// Create a validated expense record.
    ///
    /// A blank `category` is replaced with [UNCATEGORIZED_LABEL].
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidRecord] if `amount` is negative, NaN or infinite.
    pub fn new(date: Date, amount: f64, category: &str, description: &str) -> Result<Self, Error> {
        if !amount.is_finite() {
            return Err(Error::invalid_record(format!(
                "amount {amount} is not a finite number"
            )));
        }

        if amount < 0.0 {
            return Err(Error::invalid_record(format!(
                "amount {amount} must not be negative"
            )));
        }

        Ok(Self {
            date,
            amount,
            category: normalize_category(category),
            description: description.trim().to_owned(),
            spender: None,
        })
    }

    /// Set who incurred the expense, used for group expenses.
    ///
    /// A blank `spender` clears the field.
    pub fn with_spender(mut self, spender: &str) -> Self {
        let spender = spender.trim();
        self.spender = if spender.is_empty() {
            None
        } else {
            Some(spender.to_owned())
        };
        self
    }

    /// The day the expense occurred.
    pub fn date(&self) -> Date {
        self.date
    }

    /// The amount spent.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// The spending category, never empty.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Free text describing the expense, may be empty.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Who incurred the expense, only set for group expenses.
    pub fn spender(&self) -> Option<&str> {
        self.spender.as_deref()
    }
}

fn normalize_category(category: &str) -> String {
    let category = category.trim();

    if category.is_empty() {
        tracing::warn!("expense has no category, using \"{UNCATEGORIZED_LABEL}\"");
        UNCATEGORIZED_LABEL.to_owned()
    } else {
        category.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{ExpenseRecord, UNCATEGORIZED_LABEL};
    use crate::Error;

    #[test]
    fn new_rejects_negative_amount() {
        let result = ExpenseRecord::new(date!(2024 - 01 - 05), -1.0, "Food", "");

        assert!(matches!(result, Err(Error::InvalidRecord { .. })));
    }

    #[test]
    fn new_rejects_non_finite_amount() {
        for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = ExpenseRecord::new(date!(2024 - 01 - 05), amount, "Food", "");

            assert!(
                matches!(result, Err(Error::InvalidRecord { .. })),
                "amount {amount} should be rejected"
            );
        }
    }

    #[test]
    fn new_accepts_zero_amount() {
        let record = ExpenseRecord::new(date!(2024 - 01 - 05), 0.0, "Food", "").unwrap();

        assert_eq!(record.amount(), 0.0);
    }

    #[test]
    fn blank_category_becomes_uncategorized() {
        let record = ExpenseRecord::new(date!(2024 - 01 - 05), 10.0, "  ", "Bus").unwrap();

        assert_eq!(record.category(), UNCATEGORIZED_LABEL);
    }

    #[test]
    fn category_and_description_are_trimmed() {
        let record =
            ExpenseRecord::new(date!(2024 - 01 - 05), 10.0, " Travel ", " Train ticket ").unwrap();

        assert_eq!(record.category(), "Travel");
        assert_eq!(record.description(), "Train ticket");
    }

    #[test]
    fn blank_spender_is_cleared() {
        let record = ExpenseRecord::new(date!(2024 - 01 - 05), 10.0, "Food", "")
            .unwrap()
            .with_spender(" ");

        assert_eq!(record.spender(), None);
    }

    #[test]
    fn spender_is_set() {
        let record = ExpenseRecord::new(date!(2024 - 01 - 05), 10.0, "Food", "")
            .unwrap()
            .with_spender("Alice");

        assert_eq!(record.spender(), Some("Alice"));
    }
}
