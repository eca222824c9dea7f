//! A1-style address codec
//!
//! Converts between zero-based `(row, column)` indices and spreadsheet
//! text such as `"B12"`, `"A:C"` or `"3:7"`. Column letters use bijective
//! base-26 (there is no zero digit), so `Z` is followed by `AA`.
//!
//! Every index representable as a non-negative `i32` is supported; the
//! largest column is [`MAX_COLUMN_TEXT`] (`"FXSHRXX"`).

use std::fmt;
use std::str::FromStr;

use lazy_regex::regex_captures;

use crate::error::{Error, Result};
use crate::{MAX_COLUMN_TEXT, MAX_INDEX};

/// Convert a zero-based column index to letters (0 = A, 25 = Z, 26 = AA, ...)
///
/// # Examples
/// ```
/// use sheetmap_core::cell::column_to_text;
///
/// assert_eq!(column_to_text(0).unwrap(), "A");
/// assert_eq!(column_to_text(16383).unwrap(), "XFD");
/// assert_eq!(column_to_text(2147483647).unwrap(), "FXSHRXX");
/// ```
pub fn column_to_text(index: u32) -> Result<String> {
    check_index(index as u64)?;

    let mut letters = Vec::with_capacity(MAX_COLUMN_TEXT.len());
    let mut n = index as u64 + 1; // 1-based for calculation

    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }

    Ok(letters.iter().rev().map(|&b| b as char).collect())
}

/// Convert column letters to a zero-based index (A = 0, Z = 25, AA = 26, ...)
///
/// Letters are case-insensitive. `None` is reported as [`Error::Missing`],
/// blank text as [`Error::Empty`], anything but ASCII letters as
/// [`Error::InvalidFormat`] and text beyond `"FXSHRXX"` as
/// [`Error::ColumnOutOfRange`].
pub fn text_to_column<'a>(text: impl Into<Option<&'a str>>) -> Result<u32> {
    let text = text.into().ok_or(Error::Missing("column text"))?;
    if text.trim().is_empty() {
        return Err(Error::Empty("column text"));
    }

    let upper = text.to_ascii_uppercase();
    if !upper.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(Error::InvalidFormat(format!(
            "column '{}' must contain letters only",
            text
        )));
    }

    // Longer text is always larger; equal length compares lexicographically
    if upper.len() > MAX_COLUMN_TEXT.len()
        || (upper.len() == MAX_COLUMN_TEXT.len() && upper.as_str() > MAX_COLUMN_TEXT)
    {
        return Err(Error::ColumnOutOfRange {
            value: text.to_string(),
            max: MAX_COLUMN_TEXT,
        });
    }

    let col = upper
        .bytes()
        .fold(0u64, |acc, b| acc * 26 + (b - b'A' + 1) as u64);

    Ok((col - 1) as u32)
}

/// Build an A1 address; a missing axis yields a row-only (`"1"`) or
/// column-only (`"A"`) partial address
pub fn to_address(row: Option<u32>, column: Option<u32>) -> Result<String> {
    match (row, column) {
        (None, None) => Err(Error::UnspecifiedAddress),
        (Some(row), None) => row_to_text(row),
        (None, Some(column)) => column_to_text(column),
        (Some(row), Some(column)) => Ok(format!(
            "{}{}",
            column_to_text(column)?,
            row_to_text(row)?
        )),
    }
}

/// Compose a range expression from two corners
///
/// The address with the smaller row (or, when rows are tied or absent, the
/// smaller column) is written first; identical corners collapse to a
/// single address.
///
/// ```
/// use sheetmap_core::cell::to_range;
///
/// assert_eq!(to_range(Some(1), Some(0), Some(0), Some(0)).unwrap(), "A1:A2");
/// assert_eq!(to_range(None, Some(2), None, Some(0)).unwrap(), "A:C");
/// ```
pub fn to_range(
    row1: Option<u32>,
    column1: Option<u32>,
    row2: Option<u32>,
    column2: Option<u32>,
) -> Result<String> {
    if row1.is_some() != row2.is_some() {
        return Err(Error::InconsistentRange("row"));
    }
    if column1.is_some() != column2.is_some() {
        return Err(Error::InconsistentRange("column"));
    }

    let first = to_address(row1, column1)?;
    let second = to_address(row2, column2)?;

    if first == second {
        return Ok(first);
    }

    let swap = match (row1, row2) {
        (Some(a), Some(b)) if a != b => a > b,
        _ => column1 > column2,
    };

    if swap {
        Ok(format!("{}:{}", second, first))
    } else {
        Ok(format!("{}:{}", first, second))
    }
}

/// Parse a range expression into its two corners
///
/// Recognized forms, tried in this order and case-insensitive: `A1:B2`,
/// `A1`, `A`, `A:B`, `1`, `1:2`. Axes a form does not mention are `None`.
///
/// ```
/// use sheetmap_core::cell::{parse_range, RangeRef};
///
/// assert_eq!(
///     parse_range("A1:A2").unwrap(),
///     RangeRef::new(Some(0), Some(0), Some(1), Some(0))
/// );
/// assert_eq!(parse_range("c").unwrap(), RangeRef::columns(2, 2));
/// ```
pub fn parse_range(text: &str) -> Result<RangeRef> {
    let text = text.trim();

    if let Some((_, c1, r1, c2, r2)) =
        regex_captures!(r"^([A-Z]+)([0-9]+):([A-Z]+)([0-9]+)$"i, text)
    {
        return Ok(RangeRef::new(
            Some(parse_row(r1)?),
            Some(text_to_column(c1)?),
            Some(parse_row(r2)?),
            Some(text_to_column(c2)?),
        ));
    }

    if let Some((_, c, r)) = regex_captures!(r"^([A-Z]+)([0-9]+)$"i, text) {
        let (row, column) = (parse_row(r)?, text_to_column(c)?);
        return Ok(RangeRef::new(Some(row), Some(column), Some(row), Some(column)));
    }

    if let Some((_, c)) = regex_captures!(r"^([A-Z]+)$"i, text) {
        let column = text_to_column(c)?;
        return Ok(RangeRef::columns(column, column));
    }

    if let Some((_, c1, c2)) = regex_captures!(r"^([A-Z]+):([A-Z]+)$"i, text) {
        return Ok(RangeRef::columns(text_to_column(c1)?, text_to_column(c2)?));
    }

    if let Some((_, r)) = regex_captures!(r"^([0-9]+)$", text) {
        let row = parse_row(r)?;
        return Ok(RangeRef::rows(row, row));
    }

    if let Some((_, r1, r2)) = regex_captures!(r"^([0-9]+):([0-9]+)$", text) {
        return Ok(RangeRef::rows(parse_row(r1)?, parse_row(r2)?));
    }

    Err(Error::InvalidFormat(format!(
        "'{}' is not a cell range",
        text
    )))
}

fn row_to_text(row: u32) -> Result<String> {
    check_index(row as u64)?;
    Ok((row as u64 + 1).to_string())
}

/// Parse a 1-based row number into a 0-based index
fn parse_row(digits: &str) -> Result<u32> {
    let number: u64 = digits.parse().map_err(|_| Error::IndexOutOfRange {
        value: u64::MAX,
        max: MAX_INDEX,
    })?;

    if number == 0 {
        return Err(Error::InvalidFormat(format!(
            "row number must be >= 1, got '{}'",
            digits
        )));
    }

    let index = number - 1;
    check_index(index)?;
    Ok(index as u32)
}

fn check_index(index: u64) -> Result<()> {
    if index > MAX_INDEX as u64 {
        return Err(Error::IndexOutOfRange {
            value: index,
            max: MAX_INDEX,
        });
    }
    Ok(())
}

/// The two corners of a parsed range expression
///
/// Whole-column forms leave the rows `None`, whole-row forms leave the
/// columns `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeRef {
    pub row1: Option<u32>,
    pub column1: Option<u32>,
    pub row2: Option<u32>,
    pub column2: Option<u32>,
}

impl RangeRef {
    /// Create from raw corners
    pub fn new(
        row1: Option<u32>,
        column1: Option<u32>,
        row2: Option<u32>,
        column2: Option<u32>,
    ) -> Self {
        Self {
            row1,
            column1,
            row2,
            column2,
        }
    }

    /// A whole-column range
    pub fn columns(column1: u32, column2: u32) -> Self {
        Self::new(None, Some(column1), None, Some(column2))
    }

    /// A whole-row range
    pub fn rows(row1: u32, row2: u32) -> Self {
        Self::new(Some(row1), None, Some(row2), None)
    }

    /// Format back to range text (see [`to_range`])
    pub fn to_range_text(&self) -> Result<String> {
        to_range(self.row1, self.column1, self.row2, self.column2)
    }

    /// Convert to a cell range when both axes are present on both corners
    pub fn to_cell_range(&self) -> Option<CellRange> {
        match (self.row1, self.column1, self.row2, self.column2) {
            (Some(r1), Some(c1), Some(r2), Some(c2)) => {
                Some(CellRange::from_indices(r1, c1, r2, c2))
            }
            _ => None,
        }
    }
}

/// A single cell address (e.g., "A1")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellAddress {
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ...)
    pub col: u32,
}

impl CellAddress {
    /// Create a new cell address
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Parse a single-cell address
    pub fn parse(s: &str) -> Result<Self> {
        let range = parse_range(s)?;
        match range.to_cell_range() {
            Some(r) if r.start == r.end => Ok(r.start),
            _ => Err(Error::InvalidFormat(format!("'{}' is not a single cell", s.trim()))),
        }
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> Result<String> {
        to_address(Some(self.row), Some(self.col))
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_a1_string() {
            Ok(s) => f.write_str(&s),
            Err(_) => write!(f, "R{}C{}", self.row as u64 + 1, self.col as u64 + 1),
        }
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A rectangle of cells with `start` top-left and `end` bottom-right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRange {
    /// Start address (top-left)
    pub start: CellAddress,
    /// End address (bottom-right)
    pub end: CellAddress,
}

impl CellRange {
    /// Create a new cell range, normalizing the corners
    pub fn new(start: CellAddress, end: CellAddress) -> Self {
        Self {
            start: CellAddress::new(start.row.min(end.row), start.col.min(end.col)),
            end: CellAddress::new(start.row.max(end.row), start.col.max(end.col)),
        }
    }

    /// Create a range from row/column indices
    pub fn from_indices(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        Self::new(
            CellAddress::new(start_row, start_col),
            CellAddress::new(end_row, end_col),
        )
    }

    /// Create a single-cell range
    pub fn single(addr: CellAddress) -> Self {
        Self {
            start: addr,
            end: addr,
        }
    }

    /// Parse a range from `A1:B10` or `A1` notation
    pub fn parse(s: &str) -> Result<Self> {
        parse_range(s)?.to_cell_range().ok_or_else(|| {
            Error::InvalidFormat(format!("'{}' does not name whole cells", s.trim()))
        })
    }

    /// Whether the range covers more than one cell
    pub fn is_multi_cell(&self) -> bool {
        self.start != self.end
    }

    /// Check if a cell is within this range
    pub fn contains(&self, addr: &CellAddress) -> bool {
        addr.row >= self.start.row
            && addr.row <= self.end.row
            && addr.col >= self.start.col
            && addr.col <= self.end.col
    }

    /// Check if this range overlaps with another
    pub fn overlaps(&self, other: &CellRange) -> bool {
        self.start.row <= other.end.row
            && self.end.row >= other.start.row
            && self.start.col <= other.end.col
            && self.end.col >= other.start.col
    }

    /// Get the number of rows in the range
    pub fn row_count(&self) -> u64 {
        (self.end.row - self.start.row) as u64 + 1
    }

    /// Get the number of columns in the range
    pub fn col_count(&self) -> u64 {
        (self.end.col - self.start.col) as u64 + 1
    }

    /// Format as `A1:B10` string
    pub fn to_a1_string(&self) -> Result<String> {
        to_range(
            Some(self.start.row),
            Some(self.start.col),
            Some(self.end.row),
            Some(self.end.col),
        )
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_multi_cell() {
            write!(f, "{}:{}", self.start, self.end)
        } else {
            write!(f, "{}", self.start)
        }
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
