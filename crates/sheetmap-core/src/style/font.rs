//! Font and text decoration descriptors

use super::Color;

/// Font descriptor attached to a mapped field
///
/// Any part left as `None` keeps whatever the target cell already has.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontStyle {
    /// Font family name (e.g., "Calibri", "Arial")
    pub name: Option<String>,
    /// Font size in points
    pub size: Option<f64>,
    /// Bold
    pub bold: bool,
    /// Italic
    pub italic: bool,
    /// Strikethrough
    pub strikethrough: bool,
    /// Font color
    pub color: Color,
}

impl FontStyle {
    /// Create an empty font descriptor
    pub fn new() -> Self {
        Self::default()
    }

    /// Set font name
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set font size
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set bold
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Set italic
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Set strikethrough
    pub fn with_strikethrough(mut self, strikethrough: bool) -> Self {
        self.strikethrough = strikethrough;
        self
    }

    /// Set color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Parse a font description such as `"Arial, 12pt, style=Bold, Italic, color=red"`.
    ///
    /// The first token is the family unless it is a size. Style names that follow
    /// `style=` may continue as bare tokens. Returns `None` on any unknown token.
    pub fn parse(text: &str) -> Option<Self> {
        let mut font = FontStyle::new();
        let mut tokens = text.split(',').map(str::trim).filter(|t| !t.is_empty());

        let first = tokens.next()?;
        if let Some(size) = parse_size(first) {
            font.size = Some(size);
        } else if first.contains('=') {
            font.apply_setting(first)?;
        } else {
            font.name = Some(first.to_string());
        }

        for token in tokens {
            if let Some(size) = parse_size(token) {
                font.size = Some(size);
            } else if token.contains('=') {
                font.apply_setting(token)?;
            } else {
                font.apply_style_name(token)?;
            }
        }
        Some(font)
    }

    /// Parse a font description, degrading to the empty descriptor on failure
    pub fn parse_or_default(text: &str) -> Self {
        Self::parse(text).unwrap_or_else(|| {
            log::warn!("unrecognized font '{}', using default font", text);
            FontStyle::default()
        })
    }

    fn apply_setting(&mut self, token: &str) -> Option<()> {
        let (key, value) = token.split_once('=')?;
        match key.trim().to_ascii_lowercase().as_str() {
            "style" => self.apply_style_name(value.trim()),
            "color" | "colour" => {
                self.color = Color::parse(value)?;
                Some(())
            }
            "size" => {
                self.size = Some(parse_size(value.trim())?);
                Some(())
            }
            "name" | "family" => {
                self.name = Some(value.trim().to_string());
                Some(())
            }
            _ => None,
        }
    }

    fn apply_style_name(&mut self, name: &str) -> Option<()> {
        match name.to_ascii_lowercase().as_str() {
            "regular" => {}
            "bold" => self.bold = true,
            "italic" => self.italic = true,
            "strikeout" | "strikethrough" => self.strikethrough = true,
            _ => return None,
        }
        Some(())
    }
}

fn parse_size(token: &str) -> Option<f64> {
    let number = token
        .strip_suffix("pt")
        .or_else(|| token.strip_suffix("PT"))
        .unwrap_or(token)
        .trim();
    number
        .parse::<f64>()
        .ok()
        .filter(|s| s.is_finite() && *s > 0.0)
}

impl std::hash::Hash for FontStyle {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.size.map(f64::to_bits).hash(state);
        self.bold.hash(state);
        self.italic.hash(state);
        self.strikethrough.hash(state);
        self.color.hash(state);
    }
}

impl Eq for FontStyle {}

/// Underline style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Underline {
    /// No underline
    #[default]
    None,
    /// Single underline
    Single,
    /// Double underline
    Double,
    /// Single accounting underline (extends to cell width)
    SingleAccounting,
    /// Double accounting underline
    DoubleAccounting,
}

/// Font vertical alignment (superscript/subscript)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontVerticalAlign {
    /// Normal baseline
    #[default]
    Baseline,
    /// Superscript
    Superscript,
    /// Subscript
    Subscript,
}

/// Underline and character position applied on top of the font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decoration {
    pub underline: Underline,
    pub vertical_align: FontVerticalAlign,
}

impl Decoration {
    pub const fn new(underline: Underline, vertical_align: FontVerticalAlign) -> Self {
        Self {
            underline,
            vertical_align,
        }
    }

    pub const fn underline(underline: Underline) -> Self {
        Self::new(underline, FontVerticalAlign::Baseline)
    }

    pub const fn superscript() -> Self {
        Self::new(Underline::None, FontVerticalAlign::Superscript)
    }

    pub const fn subscript() -> Self {
        Self::new(Underline::None, FontVerticalAlign::Subscript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_description() {
        let font = FontStyle::parse("Arial, 12pt, style=Bold, Italic, color=#FF0000").unwrap();
        assert_eq!(
            font,
            FontStyle::new()
                .with_name("Arial")
                .with_size(12.0)
                .with_bold(true)
                .with_italic(true)
                .with_color(Color::RED)
        );
    }

    #[test]
    fn test_parse_size_only() {
        let font = FontStyle::parse("9.5pt").unwrap();
        assert_eq!(font.name, None);
        assert_eq!(font.size, Some(9.5));
    }

    #[test]
    fn test_parse_rejects_unknown_tokens() {
        assert_eq!(FontStyle::parse("Arial, wobbly"), None);
        assert_eq!(FontStyle::parse("Arial, color=nonsense"), None);
        assert_eq!(FontStyle::parse(""), None);
    }

    #[test]
    fn test_parse_rejects_infinite_sizes() {
        assert_eq!(FontStyle::parse("Arial, infpt"), None);
        assert_eq!(FontStyle::parse("Arial, size=infinity"), None);
        assert_eq!(FontStyle::parse("inf").and_then(|f| f.size), None);
    }

    #[test]
    fn test_parse_or_default_degrades() {
        assert_eq!(FontStyle::parse_or_default("Arial, -3pt"), FontStyle::default());
    }
}
