//! Error types for sheetmap-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sheetmap-core
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Text does not match any recognized address or range grammar
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Column text beyond the largest supported column
    #[error("Column '{value}' out of range (max: \"{max}\")")]
    ColumnOutOfRange { value: String, max: &'static str },

    /// Numeric index beyond the largest supported index
    #[error("Index {value} out of range (max: {max})")]
    IndexOutOfRange { value: u64, max: u32 },

    /// Required argument was not supplied
    #[error("{0} is missing")]
    Missing(&'static str),

    /// Required argument was blank
    #[error("{0} is empty")]
    Empty(&'static str),

    /// Neither row nor column was given for an address
    #[error("Either row or column must be specified")]
    UnspecifiedAddress,

    /// An axis was specified on one end of a range only
    #[error("{0} must be specified on both ends of the range")]
    InconsistentRange(&'static str),

    /// Merged cell conflict
    #[error("Cell range {0} overlaps a merged region")]
    MergedCellConflict(String),
}

impl Error {
    /// Whether this is a text format error
    pub fn is_format(&self) -> bool {
        matches!(self, Error::InvalidFormat(_))
    }

    /// Whether this is a range error
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Error::ColumnOutOfRange { .. } | Error::IndexOutOfRange { .. }
        )
    }
}
