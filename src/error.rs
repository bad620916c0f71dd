//! Error handling for table loading, selection and chart rendering.
//!
//! Every fallible library operation returns [`Result`]. Failures that the
//! data file can cause are reported as distinct variants carrying
//! enough context to find the offending line or row:
//!
//! ```
//! use suicide_rates::error::Error;
//!
//! fn describe(err: &Error) -> String {
//!     match err {
//!         Error::RowShape { line, .. } => format!("bad row on line {line}"),
//!         Error::MissingCategory { country, category } => {
//!             format!("no {category} row for {country}")
//!         }
//!         other => other.to_string(),
//!     }
//! }
//! ```
//!
//! The [`ResultExt`] trait adds `.context()` to any result whose error
//! converts into [`Error`], so call sites can say what they were doing:
//!
//! ```no_run
//! use suicide_rates::error::ResultExt as _;
//!
//! fn read(path: &str) -> suicide_rates::error::Result<String> {
//!     std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))
//! }
//! ```

use std::fmt;

use crate::select::SexCategory;

/// Main error type for suicide-rates operations.
#[derive(Debug)]
pub enum Error {
    /// I/O errors (opening the data file, writing the chart)
    Io(std::io::Error),

    /// The CSV reader could not decode a record
    Csv {
        line: Option<u64>,
        message: String,
    },

    /// A data row has a different number of fields than the first data row
    RowShape {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// The selection for a country has no row for a sex category
    MissingCategory {
        country: String,
        category: SexCategory,
    },

    /// A selected row does not have one value column per year label
    ColumnLayout {
        country: String,
        category: SexCategory,
        expected: usize,
        found: usize,
    },

    /// A value column of a selected row holds text instead of a number
    NonNumeric {
        country: String,
        category: SexCategory,
        column: usize,
        value: String,
    },

    /// Invalid or unreadable configuration
    Config(String),

    /// Chart rendering or encoding failed
    Render(String),

    /// The interactive viewer could not be started
    Viewer(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Csv {
                line: Some(line),
                message,
            } => write!(f, "CSV error on line {line}: {message}"),
            Self::Csv {
                line: None,
                message,
            } => write!(f, "CSV error: {message}"),
            Self::RowShape {
                line,
                expected,
                found,
            } => write!(
                f,
                "Row shape error on line {line}: expected {expected} fields, found {found}"
            ),
            Self::MissingCategory { country, category } => {
                write!(f, "No \"{category}\" row found for country \"{country}\"")
            }
            Self::ColumnLayout {
                country,
                category,
                expected,
                found,
            } => write!(
                f,
                "Column layout mismatch for {country} ({category}): expected {expected} fields, found {found}"
            ),
            Self::NonNumeric {
                country,
                category,
                column,
                value,
            } => write!(
                f,
                "Non-numeric value {value:?} in column {column} for {country} ({category})"
            ),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Viewer(msg) => write!(f, "Viewer error: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(csv::Position::line);
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(e) => Self::Io(e),
            _ => Self::Csv { line, message },
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<eframe::Error> for Error {
    fn from(err: eframe::Error) -> Self {
        Self::Viewer(err.to_string())
    }
}

/// Result type alias for suicide-rates operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: Error = e.into();
            Error::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: Error = e.into();
            Error::Other(format!("{}: {}", f(), err))
        })
    }
}
