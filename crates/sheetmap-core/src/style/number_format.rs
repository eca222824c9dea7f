//! Number format types

use std::fmt;

/// Number format code applied to a cell
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumberFormat {
    /// General format (default)
    #[default]
    General,

    /// Format code such as `"#,##0.00"` or `"yyyy-mm-dd"`
    Custom(String),
}

impl NumberFormat {
    /// Create a number format from a format code
    ///
    /// Blank text and `"General"` (any case) both mean [`NumberFormat::General`].
    pub fn from_string<S: Into<String>>(format: S) -> Self {
        let format = format.into();
        if format.trim().is_empty() || format.trim().eq_ignore_ascii_case("general") {
            NumberFormat::General
        } else {
            NumberFormat::Custom(format)
        }
    }

    /// Get the format code
    pub fn format_string(&self) -> &str {
        match self {
            NumberFormat::General => "General",
            NumberFormat::Custom(s) => s,
        }
    }
}

impl From<&str> for NumberFormat {
    fn from(format: &str) -> Self {
        NumberFormat::from_string(format)
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.format_string())
    }
}
