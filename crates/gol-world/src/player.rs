//! Player starting patterns.

use gol_core::{Error, Result};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// A player's starting region as a row-major grid of live cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerGrid {
    pub name: String,
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl PlayerGrid {
    pub fn new(name: impl Into<String>, rows: usize, cols: usize, cells: Vec<bool>) -> Result<Self> {
        let name = name.into();
        if cells.len() != rows * cols {
            return Err(Error::Validation(format!(
                "player {} has {} cells, expected {}",
                name,
                cells.len(),
                rows * cols
            )));
        }
        Ok(Self {
            name,
            rows,
            cols,
            cells,
        })
    }

    /// Uniformly random region drawn from the given generator
    pub fn random(name: impl Into<String>, rows: usize, cols: usize, rng: &mut ChaCha8Rng) -> Self {
        let cells = (0..rows * cols).map(|_| rng.gen::<bool>()).collect();
        Self {
            name: name.into(),
            rows,
            cols,
            cells,
        }
    }

    /// Load a player file, named after its file stem
    pub fn load(path: impl AsRef<Path>, expected: (usize, usize)) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| Error::Validation(format!("invalid player path: {}", path.display())))?;
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(name, &contents, expected)
    }

    /// Parse a JSON array of rows; cells are booleans or numbers (non-zero is alive).
    ///
    /// The grid must have exactly the `expected` `(rows, cols)` shape.
    pub fn from_json_str(name: &str, json: &str, expected: (usize, usize)) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let rows = value.as_array().ok_or_else(|| {
            Error::Validation(format!("player {} must be a JSON array of rows", name))
        })?;

        let cols = match rows.first() {
            Some(first) => row_len(name, first)?,
            None => 0,
        };
        let mismatch = |found| Error::ShapeMismatch {
            name: name.to_string(),
            found,
            expected,
        };

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row_cells = row.as_array().ok_or_else(|| {
                Error::Validation(format!("player {} has a row that is not an array", name))
            })?;
            if row_cells.len() != cols {
                return Err(mismatch((rows.len(), row_cells.len())));
            }
            for cell in row_cells {
                cells.push(cell_value(name, cell)?);
            }
        }

        if (rows.len(), cols) != expected {
            return Err(mismatch((rows.len(), cols)));
        }

        Self::new(name, rows.len(), cols, cells)
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.cols + col]
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    /// Rotated 180 degrees (flipped along both axes)
    pub fn flipped(&self) -> Self {
        let mut cells = self.cells.clone();
        cells.reverse();
        Self {
            name: self.name.clone(),
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }
}

fn row_len(name: &str, row: &Value) -> Result<usize> {
    row.as_array()
        .map(|cells| cells.len())
        .ok_or_else(|| Error::Validation(format!("player {} has a row that is not an array", name)))
}

fn cell_value(name: &str, cell: &Value) -> Result<bool> {
    match cell {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => Ok(n.as_f64().map_or(false, |v| v != 0.0)),
        other => Err(Error::Validation(format!(
            "player {} has a non-boolean cell: {}",
            name, other
        ))),
    }
}
