//! Prelude module - common imports for sheetmap users
//!
//! ```rust
//! use sheetmap::prelude::*;
//! ```

pub use crate::{
    // Declarations
    Attrs,
    CellMap,
    Classify,
    MergeSpec,
    Schema,
    // Entity side
    Assign,
    CellPosition,
    ConfigureCell,
    FieldRef,
    Hooks,
    IgnoreOutput,
    Mapped,
    Placement,
    // Mapping
    MapDirection,
    MapError,
    MapOptions,
    MapReport,
    MapResult,
    SheetMapper,
    SheetReader,
    SheetWriter,
    // Core types
    Alignment,
    Border,
    CellValue,
    Color,
    Decoration,
    FontStyle,
    NumberFormat,
    Worksheet,
};
