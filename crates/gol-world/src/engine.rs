//! Generation kernel: birth/survival plus color inheritance at birth.

use crate::grid::Board;

/// Outcome of the transition rule for a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellTransition {
    pub alive: bool,
    pub is_red: bool,
    pub born: bool,
}

/// Apply the rule to one cell given its previous state and neighbor counts.
///
/// A dead cell with exactly three live neighbors is born; a live cell with
/// two or three survives. A newborn is red only when red neighbors hold a
/// strict majority (`red > neighbors / 2`), so ties go green. Survivors keep
/// their color and every other cell keeps its (possibly stale) color value.
#[inline]
pub fn transition(was_alive: bool, was_red: bool, neighbors: u8, red_neighbors: u8) -> CellTransition {
    let born = !was_alive && neighbors == 3;
    let survives = was_alive && (neighbors == 2 || neighbors == 3);
    let is_red = if born {
        2 * red_neighbors > neighbors
    } else {
        was_red
    };

    CellTransition {
        alive: born || survives,
        is_red,
        born,
    }
}

/// Births and deaths produced by one generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepSummary {
    pub births: usize,
    pub deaths: usize,
}

/// Double-buffered stepper for a board of fixed dimensions.
///
/// Every read in a step observes the previous generation; writes land in
/// the scratch layers, which are swapped into the board once all cells are
/// computed.
#[derive(Debug, Clone)]
pub struct Engine {
    height: usize,
    width: usize,
    next_alive: Vec<bool>,
    next_red: Vec<bool>,
    rows_above: Vec<usize>,
    rows_below: Vec<usize>,
    cols_left: Vec<usize>,
    cols_right: Vec<usize>,
}

impl Engine {
    pub fn new(height: usize, width: usize) -> Self {
        let size = height * width;
        Self {
            height,
            width,
            next_alive: vec![false; size],
            next_red: vec![false; size],
            rows_above: (0..height).map(|r| (r + height - 1) % height).collect(),
            rows_below: (0..height).map(|r| (r + 1) % height).collect(),
            cols_left: (0..width).map(|c| (c + width - 1) % width).collect(),
            cols_right: (0..width).map(|c| (c + 1) % width).collect(),
        }
    }

    pub fn for_board(board: &Board) -> Self {
        Self::new(board.height(), board.width())
    }

    /// Advance the board by one generation in place
    pub fn step(&mut self, board: &mut Board) -> StepSummary {
        assert_eq!(
            (board.height(), board.width()),
            (self.height, self.width),
            "engine dimensions do not match the board"
        );

        let width = self.width;
        let mut summary = StepSummary::default();

        {
            let alive = &board.alive;
            let red = &board.red;

            for row in 0..self.height {
                let row_bases = [
                    self.rows_above[row] * width,
                    row * width,
                    self.rows_below[row] * width,
                ];

                for col in 0..width {
                    let cols = [self.cols_left[col], col, self.cols_right[col]];
                    let mut neighbors = 0u8;
                    let mut red_neighbors = 0u8;

                    for (dr, base) in row_bases.iter().enumerate() {
                        for (dc, c) in cols.iter().enumerate() {
                            if dr == 1 && dc == 1 {
                                continue;
                            }
                            let index = base + c;
                            if alive[index] {
                                neighbors += 1;
                                red_neighbors += red[index] as u8;
                            }
                        }
                    }

                    let index = row * width + col;
                    let next = transition(alive[index], red[index], neighbors, red_neighbors);
                    if next.born {
                        summary.births += 1;
                    } else if alive[index] && !next.alive {
                        summary.deaths += 1;
                    }
                    self.next_alive[index] = next.alive;
                    self.next_red[index] = next.is_red;
                }
            }
        }

        std::mem::swap(&mut board.alive, &mut self.next_alive);
        std::mem::swap(&mut board.red, &mut self.next_red);

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gol_core::{Color, PopulationCounts, Position};

    fn board_with(height: usize, width: usize, cells: &[(i64, i64, Color)]) -> Board {
        let mut board = Board::new(height, width);
        for &(row, col, color) in cells {
            board.set(Position::new(row, col), Some(color));
        }
        board
    }

    #[test]
    fn test_transition_rule_table() {
        for neighbors in 0..=8u8 {
            let from_dead = transition(false, false, neighbors, 0);
            assert_eq!(from_dead.alive, neighbors == 3);
            assert_eq!(from_dead.born, neighbors == 3);

            let from_alive = transition(true, true, neighbors, 0);
            assert_eq!(from_alive.alive, neighbors == 2 || neighbors == 3);
            assert!(!from_alive.born);
            assert!(from_alive.is_red, "survivors keep their color");
        }
    }

    #[test]
    fn test_birth_color_majority() {
        assert!(!transition(false, true, 3, 0).is_red);
        assert!(!transition(false, true, 3, 1).is_red);
        assert!(transition(false, false, 3, 2).is_red);
        assert!(transition(false, false, 3, 3).is_red);
    }

    #[test]
    fn test_birth_one_red_two_green_is_green() {
        let mut board = board_with(
            10,
            10,
            &[(4, 4, Color::Red), (4, 6, Color::Green), (6, 5, Color::Green)],
        );
        let mut engine = Engine::for_board(&board);
        engine.step(&mut board);
        assert_eq!(board.color_at(Position::new(5, 5)), Some(Color::Green));
    }

    #[test]
    fn test_birth_two_red_one_green_is_red() {
        let mut board = board_with(
            10,
            10,
            &[(4, 4, Color::Red), (4, 6, Color::Red), (6, 5, Color::Green)],
        );
        let mut engine = Engine::for_board(&board);
        engine.step(&mut board);
        assert_eq!(board.color_at(Position::new(5, 5)), Some(Color::Red));
    }

    #[test]
    fn test_block_is_still_life() {
        let cells = [
            (3, 3, Color::Red),
            (3, 4, Color::Red),
            (4, 3, Color::Red),
            (4, 4, Color::Red),
        ];
        let mut board = board_with(8, 8, &cells);
        let initial = board.clone();
        let mut engine = Engine::for_board(&board);

        for _ in 0..50 {
            let summary = engine.step(&mut board);
            assert_eq!(summary, StepSummary::default());
            assert_eq!(board.alive_layer(), initial.alive_layer());
            assert_eq!(board.counts(), PopulationCounts { red: 4, green: 0 });
        }
    }

    #[test]
    fn test_block_across_corner_wraps() {
        let cells = [
            (0, 0, Color::Green),
            (0, 5, Color::Green),
            (5, 0, Color::Green),
            (5, 5, Color::Green),
        ];
        let mut board = board_with(6, 6, &cells);
        let initial = board.clone();
        let mut engine = Engine::for_board(&board);

        engine.step(&mut board);
        assert_eq!(board.alive_layer(), initial.alive_layer());
        assert_eq!(board.counts(), PopulationCounts { red: 0, green: 4 });
    }

    #[test]
    fn test_blinker_oscillates_and_keeps_survivor_color() {
        let mut board = board_with(
            7,
            7,
            &[(3, 2, Color::Red), (3, 3, Color::Green), (3, 4, Color::Red)],
        );
        let mut engine = Engine::for_board(&board);

        let summary = engine.step(&mut board);
        assert_eq!(summary, StepSummary { births: 2, deaths: 2 });
        assert_eq!(board.color_at(Position::new(3, 3)), Some(Color::Green));
        assert_eq!(board.color_at(Position::new(2, 3)), Some(Color::Red));
        assert_eq!(board.color_at(Position::new(4, 3)), Some(Color::Red));
        assert_eq!(board.color_at(Position::new(3, 2)), None);
    }

    #[test]
    fn test_empty_board_stays_empty() {
        let mut board = Board::new(12, 9);
        let mut engine = Engine::for_board(&board);
        for _ in 0..10 {
            assert_eq!(engine.step(&mut board), StepSummary::default());
        }
        assert_eq!(board.counts(), PopulationCounts::default());
    }

    #[test]
    fn test_step_reads_previous_generation_only() {
        // A row of three across the wrap seam: reading updated cells would break symmetry
        let mut board = board_with(
            5,
            5,
            &[(2, 4, Color::Red), (2, 0, Color::Red), (2, 1, Color::Red)],
        );
        let mut engine = Engine::for_board(&board);
        engine.step(&mut board);

        let live: Vec<Position> = board.live_cells().map(|(pos, _)| pos).collect();
        assert_eq!(
            live,
            vec![Position::new(1, 0), Position::new(2, 0), Position::new(3, 0)]
        );
    }
}
