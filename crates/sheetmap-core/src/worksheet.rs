//! In-memory worksheet

use std::collections::BTreeMap;

use crate::cell::{CellAddress, CellRange, CellValue};
use crate::error::{Error, Result};
use crate::style::{Style, StylePool};
use crate::MAX_INDEX;

/// A stored cell: its value and an index into the worksheet's style pool
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellData {
    /// Cell value
    pub value: CellValue,
    /// Style index (0 is the default style)
    pub style_index: u32,
}

/// A sparse grid of cells with styles and merged regions
///
/// Cells are keyed by zero-based (row, column) and iterate in row-major order.
#[derive(Debug, Default)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Non-empty cells
    cells: BTreeMap<(u32, u32), CellData>,
    /// Deduplicated styles
    styles: StylePool,
    /// Merged regions, never overlapping
    merged: Vec<CellRange>,
}

impl Worksheet {
    /// Create a new empty worksheet
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Get the worksheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Cell Access ===

    /// Get a cell by row and column indices
    pub fn cell_at(&self, row: u32, col: u32) -> Option<&CellData> {
        self.cells.get(&(row, col))
    }

    /// Get cell value by address string (e.g., "B3")
    pub fn get_value(&self, address: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.get_value_at(addr.row, addr.col))
    }

    /// Get cell value by indices
    pub fn get_value_at(&self, row: u32, col: u32) -> CellValue {
        self.cell_at(row, col)
            .map(|c| c.value.clone())
            .unwrap_or_default()
    }

    /// Get the style applied to a cell, or the default style
    pub fn style_at(&self, row: u32, col: u32) -> &Style {
        let idx = self.cell_at(row, col).map(|c| c.style_index).unwrap_or(0);
        self.styles
            .get(idx)
            .unwrap_or_else(|| self.styles.default_style())
    }

    /// Get the non-default style applied to a cell by address, if any
    pub fn cell_style(&self, address: &str) -> Result<Option<&Style>> {
        let addr = CellAddress::parse(address)?;
        Ok(self
            .cell_at(addr.row, addr.col)
            .filter(|c| c.style_index != 0)
            .and_then(|c| self.styles.get(c.style_index)))
    }

    /// Number of distinct styles in use, the default included
    pub fn style_count(&self) -> usize {
        self.styles.len()
    }

    /// Number of stored cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Iterate stored cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (CellAddress, &CellData)> {
        self.cells
            .iter()
            .map(|(&(row, col), data)| (CellAddress::new(row, col), data))
    }

    // === Cell Modification ===

    /// Set a cell value by address string
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Set a cell value by row and column indices
    ///
    /// Writing [`CellValue::Empty`] to an unstyled cell removes it.
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u32,
        value: V,
    ) -> Result<()> {
        validate_cell_position(row, col)?;
        let value = value.into();
        if value.is_empty() && self.cell_at(row, col).map_or(true, |c| c.style_index == 0) {
            self.cells.remove(&(row, col));
            return Ok(());
        }
        self.cells.entry((row, col)).or_default().value = value;
        Ok(())
    }

    /// Set a cell formula by row and column indices
    pub fn set_cell_formula_at(&mut self, row: u32, col: u32, formula: &str) -> Result<()> {
        let formula = if formula.starts_with('=') {
            formula.to_string()
        } else {
            format!("={}", formula)
        };
        self.set_cell_value_at(row, col, CellValue::formula(formula))
    }

    /// Modify the style of a cell in place
    pub fn update_style_at<F>(&mut self, row: u32, col: u32, update: F) -> Result<()>
    where
        F: FnOnce(&mut Style),
    {
        validate_cell_position(row, col)?;
        let mut style = self.style_at(row, col).clone();
        update(&mut style);
        let style_index = self.styles.get_or_insert(style);
        self.cells.entry((row, col)).or_default().style_index = style_index;
        Ok(())
    }

    /// Modify the style of every cell in a range
    pub fn update_range_style<F>(&mut self, range: &CellRange, mut update: F) -> Result<()>
    where
        F: FnMut(u32, u32, &mut Style),
    {
        for row in range.start.row..=range.end.row {
            for col in range.start.col..=range.end.col {
                self.update_style_at(row, col, |style| update(row, col, style))?;
            }
        }
        Ok(())
    }

    // === Range Operations ===

    /// Get the used range (bounds of all stored cells)
    pub fn used_range(&self) -> Option<CellRange> {
        let mut keys = self.cells.keys();
        let &(first_row, first_col) = keys.next()?;
        let (mut min_col, mut max_row, mut max_col) = (first_col, first_row, first_col);
        for &(row, col) in keys {
            min_col = min_col.min(col);
            max_col = max_col.max(col);
            max_row = max_row.max(row);
        }
        Some(CellRange::from_indices(first_row, min_col, max_row, max_col))
    }

    // === Merged Cells ===

    /// Get merged regions
    pub fn merged_regions(&self) -> &[CellRange] {
        &self.merged
    }

    /// Merge cells
    ///
    /// Re-merging an identical region is accepted; any other overlap is a conflict.
    pub fn merge_cells(&mut self, range: &CellRange) -> Result<()> {
        validate_cell_position(range.end.row, range.end.col)?;
        if self.merged.contains(range) {
            return Ok(());
        }
        if self.merged.iter().any(|existing| range.overlaps(existing)) {
            return Err(Error::MergedCellConflict(range.to_string()));
        }
        self.merged.push(*range);
        Ok(())
    }

    /// Unmerge cells, returning whether the region was merged
    pub fn unmerge_cells(&mut self, range: &CellRange) -> bool {
        let before = self.merged.len();
        self.merged.retain(|existing| existing != range);
        self.merged.len() != before
    }
}

fn validate_cell_position(row: u32, col: u32) -> Result<()> {
    for value in [row, col] {
        if value > MAX_INDEX {
            return Err(Error::IndexOutOfRange {
                value: value as u64,
                max: MAX_INDEX,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_values_by_address_and_index() {
        let mut sheet = Worksheet::new("Report");
        sheet.set_cell_value("B3", "Total").unwrap();
        sheet.set_cell_value_at(2, 2, 42.0).unwrap();

        assert_eq!(sheet.get_value_at(2, 1), CellValue::string("Total"));
        assert_eq!(sheet.get_value("C3").unwrap(), CellValue::Number(42.0));
        assert_eq!(sheet.get_value("Z9").unwrap(), CellValue::Empty);
        assert_eq!(
            sheet.used_range(),
            Some(CellRange::from_indices(2, 1, 2, 2))
        );
    }

    #[test]
    fn test_empty_write_removes_unstyled_cell() {
        let mut sheet = Worksheet::new("s");
        sheet.set_cell_value_at(0, 0, 1.0).unwrap();
        sheet.set_cell_value_at(0, 0, CellValue::Empty).unwrap();
        assert_eq!(sheet.cell_count(), 0);
    }

    #[test]
    fn test_formula_prefix() {
        let mut sheet = Worksheet::new("s");
        sheet.set_cell_formula_at(0, 0, "SUM(B1:B3)").unwrap();
        assert_eq!(sheet.get_value_at(0, 0), CellValue::formula("=SUM(B1:B3)"));
    }

    #[test]
    fn test_styles_are_pooled() {
        let mut sheet = Worksheet::new("s");
        sheet
            .update_style_at(0, 0, |s| s.background = Color::YELLOW)
            .unwrap();
        sheet
            .update_style_at(5, 5, |s| s.background = Color::YELLOW)
            .unwrap();

        assert_eq!(sheet.style_count(), 2);
        assert_eq!(sheet.style_at(5, 5).background, Color::YELLOW);
        assert_eq!(sheet.cell_style("A1").unwrap().map(|s| s.background), Some(Color::YELLOW));
        assert_eq!(sheet.cell_style("B1").unwrap(), None);
    }

    #[test]
    fn test_merge_conflicts() {
        let mut sheet = Worksheet::new("s");
        let range = CellRange::from_indices(0, 0, 1, 1);
        sheet.merge_cells(&range).unwrap();
        sheet.merge_cells(&range).unwrap();

        let err = sheet
            .merge_cells(&CellRange::from_indices(1, 1, 2, 2))
            .unwrap_err();
        assert!(matches!(err, Error::MergedCellConflict(_)));
        assert!(sheet.unmerge_cells(&range));
        assert!(sheet.merged_regions().is_empty());
    }

    #[test]
    fn test_rejects_out_of_range_index() {
        let mut sheet = Worksheet::new("s");
        let err = sheet.set_cell_value_at(MAX_INDEX + 1, 0, 1.0).unwrap_err();
        assert!(err.is_out_of_range());
    }
}
