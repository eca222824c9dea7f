//! Per-type mapping declarations
//!
//! A [`Schema`] lists an entity type's fields in declaration order together
//! with their [`Shape`] and [`Attrs`]. Schemas are built once per type,
//! usually in a `once_cell::sync::Lazy` static returned from
//! [`Mapped::schema`](crate::Mapped::schema).

use sheetmap_core::{Alignment, Border, Color, Decoration, FontStyle, NumberFormat};

use crate::shape::{Classify, Shape};

/// Which declaration a traversal honors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapAttribute {
    /// Writing to a sheet: the output map, else the shared map
    Output,
    /// Reading from a sheet: the input map, else the shared map
    Input,
}

/// Declared cell position of a field
///
/// A `None` axis is filled from the mapping cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellMap {
    pub row: Option<u32>,
    pub column: Option<u32>,
    /// Write the value as a formula
    pub formula: bool,
}

impl CellMap {
    /// Both axes unspecified
    pub const fn new() -> Self {
        Self {
            row: None,
            column: None,
            formula: false,
        }
    }

    pub const fn at(row: u32, column: u32) -> Self {
        Self {
            row: Some(row),
            column: Some(column),
            formula: false,
        }
    }

    /// Fixed row, column from the cursor
    pub const fn row(row: u32) -> Self {
        Self {
            row: Some(row),
            column: None,
            formula: false,
        }
    }

    /// Fixed column, row from the cursor
    pub const fn column(column: u32) -> Self {
        Self {
            row: None,
            column: Some(column),
            formula: false,
        }
    }

    pub const fn formula(mut self) -> Self {
        self.formula = true;
        self
    }
}

/// Merge target of a field's cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeSpec {
    /// Zero-based end cell
    Absolute { row: i64, column: i64 },
    /// Offset from the resolved start cell
    Relative { rows: i64, columns: i64 },
}

/// Everything declared on one field
#[derive(Debug, Clone, Default)]
pub struct Attrs {
    /// Shared map, used by both write and read
    pub cell: Option<CellMap>,
    /// Write-only map
    pub output: Option<CellMap>,
    /// Read-only map
    pub input: Option<CellMap>,
    pub format: Option<NumberFormat>,
    pub font: Option<FontStyle>,
    pub decoration: Option<Decoration>,
    pub alignment: Option<Alignment>,
    pub background: Option<Color>,
    pub borders: Vec<Border>,
    pub merge: Option<MergeSpec>,
    /// Cursor step between elements of a repeated field
    pub shift: Option<u32>,
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a field carrying only a shared map
    pub fn mapped(map: CellMap) -> Self {
        Self::new().cell(map)
    }

    pub fn cell(mut self, map: CellMap) -> Self {
        self.cell = Some(map);
        self
    }

    pub fn output(mut self, map: CellMap) -> Self {
        self.output = Some(map);
        self
    }

    pub fn input(mut self, map: CellMap) -> Self {
        self.input = Some(map);
        self
    }

    pub fn format(mut self, format: impl Into<NumberFormat>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn font(mut self, font: FontStyle) -> Self {
        self.font = Some(font);
        self
    }

    /// Font from text such as `"Arial, 11pt, style=Bold"`; unreadable text
    /// leaves the default font
    pub fn font_text(self, text: &str) -> Self {
        self.font(FontStyle::parse_or_default(text))
    }

    pub fn decoration(mut self, decoration: Decoration) -> Self {
        self.decoration = Some(decoration);
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Background from a color name or hex text; unreadable text leaves the
    /// automatic color
    pub fn background_text(self, text: &str) -> Self {
        self.background(Color::parse_or_auto(text))
    }

    pub fn border(mut self, border: Border) -> Self {
        self.borders.push(border);
        self
    }

    pub fn merge(mut self, merge: MergeSpec) -> Self {
        self.merge = Some(merge);
        self
    }

    pub fn shift(mut self, shift: u32) -> Self {
        self.shift = Some(shift);
        self
    }

    /// The map honored for `attribute`, the direction-specific one first
    pub fn map_for(&self, attribute: MapAttribute) -> Option<&CellMap> {
        let specific = match attribute {
            MapAttribute::Output => self.output.as_ref(),
            MapAttribute::Input => self.input.as_ref(),
        };
        specific.or(self.cell.as_ref())
    }
}

/// One declared field
#[derive(Debug)]
pub struct Field {
    pub name: &'static str,
    pub shape: Shape,
    pub attrs: Attrs,
}

/// Field declarations of one entity type
#[derive(Debug)]
pub struct Schema {
    type_name: &'static str,
    fields: Vec<Field>,
}

impl Schema {
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            fields: Vec::new(),
        }
    }

    /// Declare a field of type `T`
    pub fn field<T: Classify>(self, name: &'static str, attrs: Attrs) -> Self {
        self.field_with_shape(name, T::shape(), attrs)
    }

    /// Declare a field that carries no mapping attributes itself
    ///
    /// Composite and repeated fields usually only need their type.
    pub fn child<T: Classify>(self, name: &'static str) -> Self {
        self.field::<T>(name, Attrs::default())
    }

    pub fn field_with_shape(mut self, name: &'static str, shape: Shape, attrs: Attrs) -> Self {
        self.fields.push(Field { name, shape, attrs });
        self
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field_named(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}
