//! Board rendering to RGB frames.

use crate::grid::Board;
use gol_core::{Color, Error, Result};

/// Packed RGB8 image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl Frame {
    /// Dead cells are black, live cells take their color's RGB value
    pub fn from_board(board: &Board) -> Self {
        let mut pixels = Vec::with_capacity(board.len() * 3);
        for (alive, red) in board.alive_layer().iter().zip(board.red_layer()) {
            let rgb = if *alive {
                Color::from_is_red(*red).rgb()
            } else {
                [0, 0, 0]
            };
            pixels.extend_from_slice(&rgb);
        }

        Self {
            width: board.width(),
            height: board.height(),
            pixels,
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }

    /// Tile the frame `tiles x tiles` times
    pub fn mosaic(&self, tiles: usize) -> Result<Self> {
        if tiles == 0 {
            return Err(Error::Image("mosaic needs at least one tile".to_string()));
        }

        let width = self.width * tiles;
        let height = self.height * tiles;
        let row_bytes = self.width * 3;
        let mut pixels = Vec::with_capacity(width * height * 3);

        for _ in 0..tiles {
            for row in self.pixels.chunks_exact(row_bytes) {
                for _ in 0..tiles {
                    pixels.extend_from_slice(row);
                }
            }
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gol_core::Position;

    #[test]
    fn test_frame_colors() {
        let mut board = Board::new(2, 3);
        board.set(Position::new(0, 0), Some(Color::Red));
        board.set(Position::new(1, 2), Some(Color::Green));
        board.set_red(Position::new(0, 1), true);

        let frame = Frame::from_board(&board);
        assert_eq!((frame.width, frame.height), (3, 2));
        assert_eq!(frame.pixels.len(), 18);
        assert_eq!(frame.pixel(0, 0), [255, 0, 0]);
        assert_eq!(frame.pixel(1, 0), [0, 0, 0]);
        assert_eq!(frame.pixel(2, 1), [0, 255, 0]);
    }

    #[test]
    fn test_mosaic_tiles_frame() {
        let mut board = Board::new(2, 3);
        board.set(Position::new(1, 0), Some(Color::Red));
        let frame = Frame::from_board(&board);

        let mosaic = frame.mosaic(2).unwrap();
        assert_eq!((mosaic.width, mosaic.height), (6, 4));
        for y in 0..4 {
            for x in 0..6 {
                assert_eq!(mosaic.pixel(x, y), frame.pixel(x % 3, y % 2));
            }
        }

        assert_eq!(frame.mosaic(1).unwrap(), frame);
        assert!(frame.mosaic(0).is_err());
    }
}
