//! [`SheetWriter`] and [`SheetReader`] for the in-memory [`Worksheet`]

use sheetmap_core::{
    Alignment, Border, CellValue, Color, Decoration, FontStyle, NumberFormat, Worksheet,
};

use crate::emit::{SheetReader, SheetWriter};
use crate::error::MapResult;
use crate::resolve::Placement;

impl SheetWriter for Worksheet {
    fn apply_merge(&mut self, placement: &Placement) -> MapResult<()> {
        if placement.is_merged() {
            self.merge_cells(&placement.range())?;
        }
        Ok(())
    }

    fn apply_format(&mut self, placement: &Placement, format: &NumberFormat) -> MapResult<()> {
        self.update_range_style(&placement.range(), |_, _, style| {
            style.number_format = format.clone();
        })?;
        Ok(())
    }

    fn apply_font(&mut self, placement: &Placement, font: &FontStyle) -> MapResult<()> {
        self.update_range_style(&placement.range(), |_, _, style| style.apply_font(font))?;
        Ok(())
    }

    fn apply_decoration(&mut self, placement: &Placement, decoration: &Decoration) -> MapResult<()> {
        self.update_range_style(&placement.range(), |_, _, style| {
            style.decoration = *decoration;
        })?;
        Ok(())
    }

    fn apply_alignment(&mut self, placement: &Placement, alignment: &Alignment) -> MapResult<()> {
        self.update_range_style(&placement.range(), |_, _, style| {
            style.apply_alignment(alignment)
        })?;
        Ok(())
    }

    fn apply_background(&mut self, placement: &Placement, color: &Color) -> MapResult<()> {
        self.update_range_style(&placement.range(), |_, _, style| {
            style.background = *color;
        })?;
        Ok(())
    }

    fn apply_border(&mut self, placement: &Placement, border: &Border) -> MapResult<()> {
        let rows = (placement.start_row(), placement.end_row());
        let cols = (placement.start_column(), placement.end_column());
        let edge = border.edge();
        self.update_range_style(&placement.range(), |row, col, style| {
            for side in border.sides_for(row, col, rows, cols) {
                *style.border.side_mut(side) = edge.clone();
            }
        })?;
        Ok(())
    }

    fn write_value(&mut self, placement: &Placement, value: &CellValue) -> MapResult<()> {
        let (row, col) = (placement.start_row(), placement.start_column());
        match value {
            CellValue::Formula(text) => self.set_cell_formula_at(row, col, text)?,
            _ => self.set_cell_value_at(row, col, value.clone())?,
        }
        Ok(())
    }
}

impl SheetReader for Worksheet {
    fn read_value(&self, placement: &Placement) -> MapResult<CellValue> {
        Ok(self.get_value_at(placement.start_row(), placement.start_column()))
    }
}
