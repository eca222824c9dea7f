//! # sheetmap-core
//!
//! Core data structures for the sheetmap object-to-grid mapper.
//!
//! This crate provides the fundamental types the mapping engine builds on:
//! - [`cell`] - The A1 address codec, [`CellAddress`] / [`CellRange`], and [`CellValue`]
//! - [`style`] - Format, font, decoration, alignment, color and border descriptors
//! - [`Worksheet`] - An in-memory grid with pooled styles and merged regions
//!
//! ## Example
//!
//! ```rust
//! use sheetmap_core::{cell, CellValue, Worksheet};
//!
//! assert_eq!(cell::to_address(Some(0), Some(27)).unwrap(), "AB1");
//!
//! let mut sheet = Worksheet::new("Sheet1");
//! sheet.set_cell_value("AB1", 3.5).unwrap();
//! assert_eq!(sheet.get_value_at(0, 27), CellValue::Number(3.5));
//! ```

pub mod cell;
pub mod error;
pub mod style;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{CellAddress, CellRange, CellValue, RangeRef};
pub use error::{Error, Result};
pub use worksheet::{CellData, Worksheet};

// Re-export all style types for convenience
pub use style::{
    Alignment, Border, BorderEdge, BorderLineStyle, BorderPosition, BorderSide, BorderStyle,
    BorderWeight, Color, Decoration, FontStyle, FontVerticalAlign, HorizontalAlignment,
    NumberFormat, Style, StylePool, Underline, VerticalAlignment,
};

/// Largest supported row or column index (`i32::MAX`)
pub const MAX_INDEX: u32 = i32::MAX as u32;

/// Column letters for [`MAX_INDEX`]
pub const MAX_COLUMN_TEXT: &str = "FXSHRXX";
