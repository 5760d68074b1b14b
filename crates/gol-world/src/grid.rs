//! Toroidal two-layer board.

use gol_core::{Color, Error, PopulationCounts, Position, Result, NEIGHBOR_OFFSETS};

/// A 2D toroidal board with an occupancy layer and a color layer.
///
/// The color layer is only meaningful where a cell is alive. It is kept
/// as-is when a cell dies, so it may hold stale values on dead cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    height: usize,
    width: usize,
    pub(crate) alive: Vec<bool>,
    pub(crate) red: Vec<bool>,
}

impl Board {
    /// Empty board; every cell dead and green
    pub fn new(height: usize, width: usize) -> Self {
        let size = height * width;
        Self {
            height,
            width,
            alive: vec![false; size],
            red: vec![false; size],
        }
    }

    /// Build a board from row-major layers
    pub fn from_layers(
        height: usize,
        width: usize,
        alive: Vec<bool>,
        red: Vec<bool>,
    ) -> Result<Self> {
        let size = height * width;
        if alive.len() != size || red.len() != size {
            return Err(Error::Validation(format!(
                "layers of length {} and {} do not match a {}x{} board",
                alive.len(),
                red.len(),
                height,
                width
            )));
        }
        Ok(Self {
            height,
            width,
            alive,
            red,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cells on the board
    pub fn len(&self) -> usize {
        self.alive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    pub fn alive_layer(&self) -> &[bool] {
        &self.alive
    }

    pub fn red_layer(&self) -> &[bool] {
        &self.red
    }

    /// Is the cell at position alive (with toroidal wrapping)
    pub fn is_alive(&self, pos: Position) -> bool {
        self.alive[self.pos_to_index(pos)]
    }

    /// Color of a live cell, `None` for dead cells
    pub fn color_at(&self, pos: Position) -> Option<Color> {
        let index = self.pos_to_index(pos);
        self.alive[index].then(|| Color::from_is_red(self.red[index]))
    }

    /// Set a cell alive with the given color, or dead with `None`.
    ///
    /// Killing a cell leaves its color layer untouched.
    pub fn set(&mut self, pos: Position, cell: Option<Color>) {
        let index = self.pos_to_index(pos);
        match cell {
            Some(color) => {
                self.alive[index] = true;
                self.red[index] = color.is_red();
            }
            None => self.alive[index] = false,
        }
    }

    /// Write the color layer only, regardless of occupancy
    pub fn set_red(&mut self, pos: Position, is_red: bool) {
        let index = self.pos_to_index(pos);
        self.red[index] = is_red;
    }

    /// Count `(alive, alive and red)` among the eight wrapped neighbors
    pub fn neighbor_counts(&self, pos: Position) -> (u8, u8) {
        let mut neighbors = 0;
        let mut red_neighbors = 0;
        for (d_row, d_col) in NEIGHBOR_OFFSETS {
            let index = self.pos_to_index(pos.add(d_row, d_col));
            if self.alive[index] {
                neighbors += 1;
                if self.red[index] {
                    red_neighbors += 1;
                }
            }
        }
        (neighbors, red_neighbors)
    }

    /// Live red and green cells over the whole board
    pub fn counts(&self) -> PopulationCounts {
        self.alive
            .iter()
            .zip(&self.red)
            .filter(|(alive, _)| **alive)
            .fold(PopulationCounts::default(), |mut counts, (_, red)| {
                if *red {
                    counts.red += 1;
                } else {
                    counts.green += 1;
                }
                counts
            })
    }

    /// Iterator over live cells and their colors
    pub fn live_cells(&self) -> impl Iterator<Item = (Position, Color)> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(i, _)| (self.index_to_pos(i), Color::from_is_red(self.red[i])))
    }

    pub(crate) fn pos_to_index(&self, pos: Position) -> usize {
        let wrapped = pos.wrap(self.height, self.width);
        wrapped.row as usize * self.width + wrapped.col as usize
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        Position::new((index / self.width) as i64, (index % self.width) as i64)
    }
}
