//! Arena setup: placing two players on a fresh board.

use crate::grid::Board;
use crate::player::PlayerGrid;
use gol_core::{ArenaConfig, Color, Error, Position, Result};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

pub struct Arena {
    config: ArenaConfig,
}

impl Arena {
    pub fn new(config: ArenaConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Build the starting board for a match.
    ///
    /// The red region's color layer is set to red everywhere, the rest of
    /// the board is green. A missing player is replaced by a random region
    /// drawn from `rng`.
    pub fn build(
        &self,
        red: Option<&PlayerGrid>,
        green: Option<&PlayerGrid>,
        rng: &mut ChaCha8Rng,
    ) -> Result<Board> {
        let (rows, cols) = self.config.region_shape();
        let red = self.resolve(red, "red", rng)?;
        let green = self.resolve(green, "green", rng)?;

        let mut board = Board::new(self.config.height, self.config.width);
        self.place(&mut board, &red, self.config.red_origin, Color::Red);
        self.place(&mut board, &green, self.config.green_origin, Color::Green);

        debug!(
            red_player = %red.name,
            green_player = %green.name,
            red_cells = red.live_count(),
            green_cells = green.live_count(),
            region_rows = rows,
            region_cols = cols,
            "Arena built"
        );

        Ok(board)
    }

    fn resolve(
        &self,
        player: Option<&PlayerGrid>,
        label: &str,
        rng: &mut ChaCha8Rng,
    ) -> Result<PlayerGrid> {
        let expected = self.config.region_shape();
        match player {
            Some(grid) if grid.shape() != expected => Err(Error::ShapeMismatch {
                name: grid.name.clone(),
                found: grid.shape(),
                expected,
            }),
            Some(grid) => Ok(grid.clone()),
            None => Ok(PlayerGrid::random(
                format!("random_{}", label),
                expected.0,
                expected.1,
                rng,
            )),
        }
    }

    fn place(&self, board: &mut Board, grid: &PlayerGrid, origin: (usize, usize), color: Color) {
        let (rows, cols) = grid.shape();
        for row in 0..rows {
            for col in 0..cols {
                let pos = Position::new((origin.0 + row) as i64, (origin.1 + col) as i64);
                board.set_red(pos, color.is_red());
                if grid.get(row, col) {
                    board.set(pos, Some(color));
                }
            }
        }
    }
}
