//! Cell value types

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Represents the value read from or written to a cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Empty cell (no value)
    #[default]
    Empty,

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Numeric value
    Number(f64),

    /// Exact decimal value
    Decimal(Decimal),

    /// String value
    String(String),

    /// Date and time
    DateTime(NaiveDateTime),

    /// Elapsed time
    Duration(Duration),

    /// Formula text (e.g., "=SUM(A1:A10)")
    Formula(String),
}

impl CellValue {
    /// Create a new string value
    pub fn string<S: Into<String>>(s: S) -> Self {
        CellValue::String(s.into())
    }

    /// Create a new formula value
    pub fn formula<S: Into<String>>(text: S) -> Self {
        CellValue::Formula(text.into())
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Check if the cell is empty or holds an empty string
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Check if the cell contains a formula
    pub fn is_formula(&self) -> bool {
        matches!(self, CellValue::Formula(_))
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Decimal(d) => d.to_f64(),
            CellValue::Boolean(true) => Some(1.0),
            CellValue::Boolean(false) => Some(0.0),
            CellValue::DateTime(dt) => Some(datetime_to_serial(dt)),
            CellValue::Duration(d) => Some(d.num_milliseconds() as f64 / MILLIS_PER_DAY),
            _ => None,
        }
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            CellValue::Number(n) => Some(*n != 0.0),
            _ => None,
        }
    }

    /// Try to get the value as a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            CellValue::Formula(text) => Some(text),
            _ => None,
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::Boolean(_) => "boolean",
            CellValue::Number(_) => "number",
            CellValue::Decimal(_) => "decimal",
            CellValue::String(_) => "string",
            CellValue::DateTime(_) => "datetime",
            CellValue::Duration(_) => "duration",
            CellValue::Formula(_) => "formula",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => write!(f, ""),
            CellValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Decimal(d) => write!(f, "{}", d),
            CellValue::String(s) => write!(f, "{}", s),
            CellValue::DateTime(dt) => write!(f, "{}", dt),
            CellValue::Duration(d) => write!(f, "{}", d),
            CellValue::Formula(text) => write!(f, "{}", text),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<Decimal> for CellValue {
    fn from(d: Decimal) -> Self {
        CellValue::Decimal(d)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::string(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(dt)
    }
}

impl From<Duration> for CellValue {
    fn from(d: Duration) -> Self {
        CellValue::Duration(d)
    }
}

fn serial_epoch() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)
}

/// Convert a spreadsheet serial date (days since 1899-12-30) to a date-time
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let millis = (serial * MILLIS_PER_DAY).round();
    if millis.abs() > i64::MAX as f64 {
        return None;
    }
    serial_epoch()?.checked_add_signed(Duration::milliseconds(millis as i64))
}

/// Convert a date-time to a spreadsheet serial date
pub fn datetime_to_serial(dt: &NaiveDateTime) -> f64 {
    match serial_epoch() {
        Some(epoch) => (*dt - epoch).num_milliseconds() as f64 / MILLIS_PER_DAY,
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::string("").is_blank());
        assert!(!CellValue::string(" ").is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
    }

    #[test]
    fn test_serial_dates() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let serial = datetime_to_serial(&dt);
        assert!((serial - 45352.5).abs() < 1e-9);
        assert_eq!(serial_to_datetime(serial), Some(dt));
        assert_eq!(serial_to_datetime(f64::NAN), None);
    }

    #[test]
    fn test_as_number() {
        assert_eq!(CellValue::Boolean(true).as_number(), Some(1.0));
        assert_eq!(CellValue::Decimal(Decimal::new(125, 2)).as_number(), Some(1.25));
        assert_eq!(CellValue::Duration(Duration::hours(6)).as_number(), Some(0.25));
        assert_eq!(CellValue::string("x").as_number(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Boolean(false).to_string(), "FALSE");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::formula("=A1").to_string(), "=A1");
        assert_eq!(CellValue::Empty.to_string(), "");
    }
}
