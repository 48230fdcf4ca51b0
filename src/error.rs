//! Defines the crate level error type.

/// The errors that may occur while loading or querying expenses.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An operation that needs at least one expense was given none.
    ///
    /// The presentation layer should show an empty state instead of a
    /// summary.
    #[error("there are no expenses to summarise")]
    EmptyDataset,

    /// An expense had a malformed amount, date or category.
    ///
    /// `line` is the 1-based line in the source document, including the
    /// header, or zero if the record was not read from a document.
    #[error("invalid expense on line {line}: {reason}")]
    InvalidRecord {
        /// The line the record was read from.
        line: usize,
        /// Why the record was rejected.
        reason: String,
    },

    /// The CSV had issues that prevented it from being parsed.
    #[error("could not parse the CSV file: {0}")]
    InvalidCSV(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// The currency symbol cannot be used to format amounts.
    #[error("invalid currency symbol \"{0}\"")]
    InvalidCurrencySymbol(String),

    /// A file could not be read.
    ///
    /// Callers should pass in the path and the original error as a string.
    #[error("could not read \"{0}\": {1}")]
    ReadFile(String, String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),
}

impl Error {
    /// Shorthand for an [Error::InvalidRecord] that did not come from a document.
    pub(crate) fn invalid_record(reason: impl Into<String>) -> Self {
        Error::InvalidRecord {
            line: 0,
            reason: reason.into(),
        }
    }

    /// Attach the source line number to an [Error::InvalidRecord].
    ///
    /// Other variants are returned unchanged.
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            Error::InvalidRecord { reason, .. } => Error::InvalidRecord { line, reason },
            error => error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::JSONSerializationError(value.to_string())
    }
}
