//! Cell styling types
//!
//! Descriptors a mapped field can carry, and the per-cell [`Style`] the
//! in-memory worksheet stores:
//! - [`NumberFormat`] - Display format code
//! - [`FontStyle`] and [`Decoration`] - Font settings, underline and character position
//! - [`Alignment`] - Text alignment
//! - [`Color`] - Background and line colors
//! - [`Border`] - Border descriptor, stored per side as [`BorderStyle`]

mod alignment;
mod border;
mod color;
mod font;
mod number_format;
mod pool;

pub use alignment::{Alignment, HorizontalAlignment, VerticalAlignment};
pub use border::{
    Border, BorderEdge, BorderLineStyle, BorderPosition, BorderSide, BorderStyle, BorderWeight,
};
pub use color::Color;
pub use font::{Decoration, FontStyle, FontVerticalAlign, Underline};
pub use number_format::NumberFormat;
pub use pool::StylePool;

/// Complete cell style
///
/// Styles are deduplicated via [`StylePool`]; cells hold an index into it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Number format
    pub number_format: NumberFormat,
    /// Font settings
    pub font: FontStyle,
    /// Underline and character position
    pub decoration: Decoration,
    /// Text alignment
    pub alignment: Alignment,
    /// Background fill color
    pub background: Color,
    /// Border settings
    pub border: BorderStyle,
}

impl Style {
    /// Create a new default style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set font to bold
    pub fn bold(mut self, bold: bool) -> Self {
        self.font.bold = bold;
        self
    }

    /// Set font to italic
    pub fn italic(mut self, italic: bool) -> Self {
        self.font.italic = italic;
        self
    }

    /// Set background color
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Set number format string
    pub fn number_format<S: Into<String>>(mut self, format: S) -> Self {
        self.number_format = NumberFormat::from_string(format);
        self
    }

    /// Overlay a font descriptor, keeping name and size where it leaves them unset
    pub fn apply_font(&mut self, font: &FontStyle) {
        let name = font.name.clone().or_else(|| self.font.name.take());
        let size = font.size.or(self.font.size);
        self.font = FontStyle {
            name,
            size,
            ..font.clone()
        };
    }

    /// Overlay an alignment descriptor
    pub fn apply_alignment(&mut self, alignment: &Alignment) {
        self.alignment = self.alignment.merged_with(alignment);
    }
}
