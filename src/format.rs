//! Currency formatting for text summaries.

use numfmt::{Formatter, Precision};

use crate::Error;

/// The currency symbol used when none is configured.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// numfmt switches to scientific notation at and above this magnitude.
const LARGE_AMOUNT_CUTOFF: f64 = 1_000_000_000_000.0;

/// Formats amounts as currency with a fixed symbol, e.g., "₹1,234.50".
pub struct CurrencyFormat {
    symbol: String,
    formatter: Formatter,
}

impl CurrencyFormat {
    /// Create a currency format that prefixes amounts with `symbol`.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidCurrencySymbol] if `symbol` is too long to be
    /// used as a prefix.
    pub fn new(symbol: &str) -> Result<Self, Error> {
        let formatter = Formatter::currency(symbol)
            .map_err(|_| Error::InvalidCurrencySymbol(symbol.to_owned()))?
            .precision(Precision::Decimals(2));

        Ok(Self {
            symbol: symbol.to_owned(),
            formatter,
        })
    }

    /// Format `amount` with two decimal places and thousands separators.
    pub fn format(&self, amount: f64) -> String {
        // Round to cents first, numfmt uses scientific notation below 0.01
        let amount = (amount * 100.0).round() / 100.0;

        if amount < 0.0 {
            return format!("-{}", self.format(-amount));
        }

        if amount == 0.0 {
            // numfmt renders zero as "0" without the prefix
            return format!("{}0.00", self.symbol);
        }

        if amount >= LARGE_AMOUNT_CUTOFF {
            let formatted = format!("{amount:.2}");
            let (whole, cents) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
            return format!("{}{}.{cents}", self.symbol, group_thousands(whole));
        }

        pad_decimals(self.formatter.fmt_string(amount))
    }
}

/// Insert a comma between every group of three digits, e.g., "1234567" becomes "1,234,567".
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

/// numfmt drops trailing zeros, e.g., "12.30" is rendered as "12.3".
fn pad_decimals(mut formatted: String) -> String {
    let decimals = match formatted.rfind('.') {
        Some(position) => formatted.len() - position - 1,
        None => {
            formatted.push('.');
            0
        }
    };

    for _ in decimals..2 {
        formatted.push('0');
    }

    formatted
}
