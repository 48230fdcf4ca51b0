//! Parses expense records from CSV exports.
//!
//! The expected header is `Date,Amount,Category,Description`, optionally
//! followed by a `Spender` column for group expenses. Column names are matched
//! case-insensitively and may appear in any order.

use ::csv::{ReaderBuilder, StringRecord, Trim};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{Error, expense::ExpenseRecord};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// The position of each known column in the header.
#[derive(Debug, PartialEq)]
struct Columns {
    count: usize,
    date: usize,
    amount: usize,
    category: usize,
    description: Option<usize>,
    spender: Option<usize>,
}

impl Columns {
    fn from_header(header: &StringRecord) -> Result<Self, Error> {
        let find = |name: &str| {
            header
                .iter()
                .position(|column| column.trim().eq_ignore_ascii_case(name))
        };
        let require = |name: &str| {
            find(name).ok_or_else(|| Error::InvalidCSV(format!("missing column '{name}'")))
        };

        Ok(Self {
            count: header.len(),
            date: require("Date")?,
            amount: require("Amount")?,
            category: require("Category")?,
            description: find("Description"),
            spender: find("Spender"),
        })
    }
}

/// Parses CSV text into validated expense records.
///
/// Records keep the order they appear in `text`. Blank categories are
/// replaced with [crate::UNCATEGORIZED_LABEL] and blank spenders are ignored.
///
/// # Errors
///
/// Returns [Error::InvalidCSV] if the header is missing a required column or
/// a row cannot be read, or [Error::InvalidRecord] with the line number of
/// the first row with the wrong number of fields, or a malformed date or amount.
pub fn parse_csv(text: &str) -> Result<Vec<ExpenseRecord>, Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let header = reader
        .headers()
        .map_err(|error| Error::InvalidCSV(error.to_string()))?;
    let columns = Columns::from_header(header)?;
    tracing::debug!("Parsed CSV header: {columns:?}");

    let mut expenses = Vec::new();

    for result in reader.records() {
        let row = result.map_err(|error| Error::InvalidCSV(error.to_string()))?;
        let line = row
            .position()
            .map(|position| position.line() as usize)
            .unwrap_or(expenses.len() + 2);

        let expense = parse_row(&row, &columns).map_err(|error| error.at_line(line))?;
        expenses.push(expense);
    }

    tracing::debug!("Parsed {} expenses from CSV", expenses.len());

    Ok(expenses)
}

fn parse_row(row: &StringRecord, columns: &Columns) -> Result<ExpenseRecord, Error> {
    if row.len() > columns.count {
        return Err(Error::invalid_record(format!(
            "expected at most {} fields, found {}",
            columns.count,
            row.len()
        )));
    }

    let required_field = |index: usize, name: &str| {
        row.get(index)
            .ok_or_else(|| Error::invalid_record(format!("missing {name}")))
    };
    let optional_field = |index: Option<usize>| {
        index
            .and_then(|index| row.get(index))
            .unwrap_or_default()
    };

    let date = parse_date(required_field(columns.date, "date")?)?;
    let amount = parse_amount(required_field(columns.amount, "amount")?)?;
    let category = required_field(columns.category, "category")?;

    let description = optional_field(columns.description);

    let expense = ExpenseRecord::new(date, amount, category, description)?
        .with_spender(optional_field(columns.spender));

    Ok(expense)
}

fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text, DATE_FORMAT)
        .map_err(|error| Error::invalid_record(format!("invalid date \"{text}\": {error}")))
}

fn parse_amount(text: &str) -> Result<f64, Error> {
    text.parse::<f64>()
        .map_err(|error| Error::invalid_record(format!("invalid amount \"{text}\": {error}")))
}
