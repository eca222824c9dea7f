//! Border style types

use super::Color;

/// Border edges stored for a single cell
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BorderStyle {
    /// Left border
    pub left: Option<BorderEdge>,
    /// Right border
    pub right: Option<BorderEdge>,
    /// Top border
    pub top: Option<BorderEdge>,
    /// Bottom border
    pub bottom: Option<BorderEdge>,
    /// Top-left to bottom-right diagonal
    pub diagonal_down: Option<BorderEdge>,
    /// Bottom-left to top-right diagonal
    pub diagonal_up: Option<BorderEdge>,
}

impl BorderStyle {
    /// Create a new border style with no borders
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all borders are empty
    pub fn is_empty(&self) -> bool {
        self.left.is_none()
            && self.right.is_none()
            && self.top.is_none()
            && self.bottom.is_none()
            && self.diagonal_down.is_none()
            && self.diagonal_up.is_none()
    }

    /// Get the slot for one side of the cell
    pub fn side_mut(&mut self, side: BorderSide) -> &mut Option<BorderEdge> {
        match side {
            BorderSide::Left => &mut self.left,
            BorderSide::Right => &mut self.right,
            BorderSide::Top => &mut self.top,
            BorderSide::Bottom => &mut self.bottom,
            BorderSide::DiagonalDown => &mut self.diagonal_down,
            BorderSide::DiagonalUp => &mut self.diagonal_up,
        }
    }
}

/// One side of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderSide {
    Left,
    Right,
    Top,
    Bottom,
    DiagonalDown,
    DiagonalUp,
}

/// A single border edge
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BorderEdge {
    /// Line style
    pub style: BorderLineStyle,
    /// Line weight
    pub weight: BorderWeight,
    /// Line color
    pub color: Color,
}

/// Where a border descriptor applies within a cell range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BorderPosition {
    /// Every outer edge of the range
    #[default]
    Around,
    DiagonalDown,
    DiagonalUp,
    EdgeBottom,
    EdgeLeft,
    EdgeRight,
    EdgeTop,
    /// Lines between rows inside the range
    InsideHorizontal,
    /// Lines between columns inside the range
    InsideVertical,
}

/// Border line styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BorderLineStyle {
    /// No border
    None,
    /// Solid line
    #[default]
    Continuous,
    /// Dashed line
    Dash,
    /// Dash-dot
    DashDot,
    /// Dash-dot-dot
    DashDotDot,
    /// Dotted line
    Dot,
    /// Double line
    Double,
    /// Slant dash-dot
    SlantDashDot,
}

/// Border line weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BorderWeight {
    Hairline,
    #[default]
    Thin,
    Medium,
    Thick,
}

/// Border descriptor attached to a mapped field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Border {
    pub position: BorderPosition,
    pub line: BorderLineStyle,
    pub weight: BorderWeight,
    pub color: Color,
}

impl Border {
    /// Create a thin continuous black border at `position`
    pub fn new(position: BorderPosition) -> Self {
        Self {
            position,
            line: BorderLineStyle::Continuous,
            weight: BorderWeight::Thin,
            color: Color::BLACK,
        }
    }

    /// Thin continuous black border around the range
    pub fn around() -> Self {
        Self::new(BorderPosition::Around)
    }

    pub fn with_line(mut self, line: BorderLineStyle) -> Self {
        self.line = line;
        self
    }

    pub fn with_weight(mut self, weight: BorderWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// The edge stored on each affected cell side, or `None` to clear it
    pub fn edge(&self) -> Option<BorderEdge> {
        if self.line == BorderLineStyle::None {
            return None;
        }
        Some(BorderEdge {
            style: self.line,
            weight: self.weight,
            color: self.color,
        })
    }

    /// Sides of the cell at (`row`, `col`) this border touches inside the
    /// rectangle spanning `rows` x `cols` (both inclusive)
    pub fn sides_for(
        &self,
        row: u32,
        col: u32,
        rows: (u32, u32),
        cols: (u32, u32),
    ) -> Vec<BorderSide> {
        let mut sides = Vec::new();
        let top = row == rows.0;
        let bottom = row == rows.1;
        let left = col == cols.0;
        let right = col == cols.1;

        match self.position {
            BorderPosition::Around => {
                if top {
                    sides.push(BorderSide::Top);
                }
                if bottom {
                    sides.push(BorderSide::Bottom);
                }
                if left {
                    sides.push(BorderSide::Left);
                }
                if right {
                    sides.push(BorderSide::Right);
                }
            }
            BorderPosition::EdgeTop if top => sides.push(BorderSide::Top),
            BorderPosition::EdgeBottom if bottom => sides.push(BorderSide::Bottom),
            BorderPosition::EdgeLeft if left => sides.push(BorderSide::Left),
            BorderPosition::EdgeRight if right => sides.push(BorderSide::Right),
            BorderPosition::InsideHorizontal if !bottom => sides.push(BorderSide::Bottom),
            BorderPosition::InsideVertical if !right => sides.push(BorderSide::Right),
            BorderPosition::DiagonalDown => sides.push(BorderSide::DiagonalDown),
            BorderPosition::DiagonalUp => sides.push(BorderSide::DiagonalUp),
            _ => {}
        }
        sides
    }
}
