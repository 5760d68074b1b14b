//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cell coordinate on the board (row-major)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i64,
    pub col: i64,
}

impl Position {
    pub fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    pub fn add(&self, d_row: i64, d_col: i64) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Apply toroidal wrapping for given board dimensions
    pub fn wrap(&self, height: usize, width: usize) -> Self {
        let (h, w) = (height as i64, width as i64);
        Self {
            row: self.row.rem_euclid(h),
            col: self.col.rem_euclid(w),
        }
    }
}

/// Offsets of the eight Moore neighbors as `(d_row, d_col)`
pub const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Ownership color of a live cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
}

impl Color {
    pub fn from_is_red(is_red: bool) -> Self {
        if is_red {
            Color::Red
        } else {
            Color::Green
        }
    }

    pub fn is_red(&self) -> bool {
        matches!(self, Color::Red)
    }

    /// RGB used when rendering a live cell of this color
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            Color::Red => [255, 0, 0],
            Color::Green => [0, 255, 0],
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Green => write!(f, "green"),
        }
    }
}
