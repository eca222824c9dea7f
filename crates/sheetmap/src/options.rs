//! Mapping options

use std::fmt;

/// Axis along which unspecified coordinates are filled from the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MapDirection {
    /// Every coordinate must be declared
    #[default]
    None,
    /// Unspecified rows take the cursor value
    Row,
    /// Unspecified columns take the cursor value
    Column,
}

impl MapDirection {
    /// The axis this direction fills, if any
    pub fn axis(self) -> Option<Axis> {
        match self {
            MapDirection::None => None,
            MapDirection::Row => Some(Axis::Row),
            MapDirection::Column => Some(Axis::Column),
        }
    }
}

/// A grid axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

/// Options for a write or read call
#[derive(Debug, Clone)]
pub struct MapOptions {
    /// Initial cursor value (default: 0)
    pub start_index: u32,
    /// Axis filled from the cursor (default: none)
    pub direction: MapDirection,
    /// Cursor step between repeated elements when a field declares none (default: 1)
    pub shift: u32,
    /// Most cells collected when reading a repeated scalar run (default: 1024)
    pub run_limit: usize,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            start_index: 0,
            direction: MapDirection::None,
            shift: 1,
            run_limit: 1024,
        }
    }
}

impl MapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start_index(mut self, start_index: u32) -> Self {
        self.start_index = start_index;
        self
    }

    pub fn with_direction(mut self, direction: MapDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_shift(mut self, shift: u32) -> Self {
        self.shift = shift;
        self
    }

    pub fn with_run_limit(mut self, run_limit: usize) -> Self {
        self.run_limit = run_limit;
        self
    }
}
