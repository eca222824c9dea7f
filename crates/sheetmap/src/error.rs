//! Mapping error types

use thiserror::Error;

use crate::options::Axis;

/// Result type for mapping operations
pub type MapResult<T> = std::result::Result<T, MapError>;

/// Errors that can occur while mapping an entity onto a sheet
#[derive(Debug, Error)]
pub enum MapError {
    /// A coordinate was left unspecified and the mapping direction does not fill it
    #[error("{field}: {axis} is not specified and the mapping direction does not supply it")]
    UnspecifiedCoordinate { field: String, axis: Axis },

    /// A resolved coordinate fell below zero
    #[error("{field}: {axis} resolved to negative value {value}")]
    NegativeCoordinate {
        field: String,
        axis: Axis,
        value: i64,
    },

    /// An absolute merge target was negative
    #[error("{field}: absolute merge target {axis} {value} is negative")]
    NegativeMergeTarget {
        field: String,
        axis: Axis,
        value: i64,
    },

    /// An absolute merge target was declared on a collection written as a run
    #[error("{field}: absolute merge target cannot apply to every cell of a run")]
    AbsoluteMergeOnRun { field: String },

    /// A resolved coordinate exceeded the largest supported index
    #[error("{field}: {axis} {value} exceeds the maximum index {max}")]
    CoordinateOverflow {
        field: String,
        axis: Axis,
        value: i64,
        max: u32,
    },

    /// A field selection named a field the schema does not declare
    #[error("{type_name} has no field named '{field}'")]
    UnknownField {
        type_name: &'static str,
        field: String,
    },

    /// An entity accessor returned a different kind of value than its schema declares
    #[error("{type_name}.{field}: schema declares {expected}, accessor returned {found}")]
    ShapeMismatch {
        type_name: &'static str,
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A cell value could not be coerced into the field type
    #[error("Cannot convert {value:?} at {address} into {target}")]
    Conversion {
        address: String,
        value: String,
        target: &'static str,
    },

    /// Read population could not reach the owner of a field
    #[error("No child entity at {0}")]
    MissingChild(String),

    /// Error reported by a sheet collaborator
    #[error("Sheet error: {0}")]
    Sheet(String),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] sheetmap_core::Error),
}

impl MapError {
    /// Whether the error comes from a bad field declaration or hook result
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            MapError::UnspecifiedCoordinate { .. }
                | MapError::NegativeCoordinate { .. }
                | MapError::NegativeMergeTarget { .. }
                | MapError::AbsoluteMergeOnRun { .. }
                | MapError::UnknownField { .. }
                | MapError::CoordinateOverflow { .. }
        )
    }
}
