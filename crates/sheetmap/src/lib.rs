//! # sheetmap
//!
//! Maps the fields of an in-memory entity graph onto a grid of cells and
//! populates entities back from one.
//!
//! Each entity type declares a [`Schema`]: its fields in order, their
//! [`Shape`], and the [`Attrs`] attached to them (cell position, formula flag,
//! number format, font, decoration, alignment, background, borders, merge
//! target and repeat shift). A [`SheetMapper`] then
//!
//! 1. builds a pruned tree of the mapped fields,
//! 2. resolves every leaf to a cell, filling unspecified coordinates from a
//!    cursor and running the entity's [`Hooks`], and
//! 3. emits each leaf through a [`SheetWriter`], or reads it back through a
//!    [`SheetReader`].
//!
//! The in-memory [`Worksheet`] implements both collaborator traits.
//!
//! ## Example
//!
//! ```rust
//! use once_cell::sync::Lazy;
//! use sheetmap::prelude::*;
//!
//! #[derive(Default)]
//! struct Line {
//!     sku: String,
//!     qty: u32,
//! }
//!
//! impl Mapped for Line {
//!     fn schema() -> &'static Schema {
//!         static SCHEMA: Lazy<Schema> = Lazy::new(|| {
//!             Schema::new("Line")
//!                 .field::<String>("sku", Attrs::mapped(CellMap::column(0)))
//!                 .field::<u32>("qty", Attrs::mapped(CellMap::column(1)).format("0"))
//!         });
//!         &SCHEMA
//!     }
//!
//!     fn field(&self, name: &str) -> FieldRef<'_> {
//!         match name {
//!             "sku" => FieldRef::value(&self.sku),
//!             "qty" => FieldRef::value(&self.qty),
//!             _ => FieldRef::Absent,
//!         }
//!     }
//! }
//!
//! let line = Line { sku: "X-1".to_string(), qty: 4 };
//! let mut sheet = Worksheet::new("Lines");
//! let mapper = SheetMapper::new().with_options(
//!     MapOptions::new()
//!         .with_direction(MapDirection::Row)
//!         .with_start_index(2),
//! );
//!
//! let report = mapper.write(&mut sheet, &line).unwrap();
//! assert_eq!(report.written, 2);
//! assert_eq!(report.next_index, Some(3));
//! assert_eq!(sheet.get_value("A3").unwrap(), CellValue::string("X-1"));
//! assert_eq!(sheet.get_value("B3").unwrap(), CellValue::Number(4.0));
//! ```

pub mod emit;
pub mod entity;
pub mod error;
pub mod mapper;
pub mod options;
pub mod prelude;
pub mod resolve;
pub mod scalar;
pub mod schema;
pub mod shape;
pub mod tree;
mod worksheet;

pub use emit::{coerce, SheetReader, SheetWriter};
pub use entity::{Assign, CellPosition, ConfigureCell, FieldRef, Hooks, IgnoreOutput, Mapped};
pub use error::{MapError, MapResult};
pub use mapper::{MapReport, SheetMapper};
pub use options::{Axis, MapDirection, MapOptions};
pub use resolve::{
    CapturedValue, FieldPath, MappingCursor, PathStep, Placement, ResolvedLeaf, RunLayout,
};
pub use scalar::Scalar;
pub use schema::{Attrs, CellMap, Field, MapAttribute, MergeSpec, Schema};
pub use shape::{classify, Category, Classify, Container, ScalarKind, Shape};
pub use tree::{build, MappedLeaf, NodeKind, TreeNode};

// Re-export core types
pub use sheetmap_core::{
    cell, style, Alignment, Border, BorderLineStyle, BorderPosition, BorderWeight, CellAddress,
    CellRange, CellValue, Color, Decoration, FontStyle, FontVerticalAlign, HorizontalAlignment,
    NumberFormat, RangeRef, Style, Underline, VerticalAlignment, Worksheet, MAX_COLUMN_TEXT,
    MAX_INDEX,
};
