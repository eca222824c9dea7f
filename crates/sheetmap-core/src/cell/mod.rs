//! Cell-related types and utilities
//!
//! This module contains:
//! - the A1 address codec ([`column_to_text`], [`text_to_column`],
//!   [`to_address`], [`parse_range`], [`to_range`])
//! - [`CellAddress`] and [`CellRange`] - a cell's location and rectangles of cells
//! - [`CellValue`] - The value stored in a cell

mod address;
mod value;

pub use address::{
    column_to_text, parse_range, text_to_column, to_address, to_range, CellAddress, CellRange,
    RangeRef,
};
pub use value::{datetime_to_serial, serial_to_datetime, CellValue};
