//! Configuration types for the simulation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Board geometry and player placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Number of rows on the board
    pub height: usize,
    /// Number of columns on the board
    pub width: usize,
    /// Rows in each player's region
    pub region_rows: usize,
    /// Columns in each player's region
    pub region_cols: usize,
    /// Top-left `(row, col)` of the red player's region
    pub red_origin: (usize, usize),
    /// Top-left `(row, col)` of the green player's region
    pub green_origin: (usize, usize),
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            height: 300,
            width: 300,
            region_rows: 250,
            region_cols: 100,
            red_origin: (25, 25),
            green_origin: (25, 175),
        }
    }
}

impl ArenaConfig {
    pub fn region_shape(&self) -> (usize, usize) {
        (self.region_rows, self.region_cols)
    }

    /// Check that both regions fit on the board and do not overlap
    pub fn validate(&self) -> Result<()> {
        if self.height == 0 || self.width == 0 {
            return Err(Error::InvalidConfig(format!(
                "board must be non-empty, got {}x{}",
                self.height, self.width
            )));
        }

        for (label, (row, col)) in [("red", self.red_origin), ("green", self.green_origin)] {
            if row + self.region_rows > self.height || col + self.region_cols > self.width {
                return Err(Error::InvalidConfig(format!(
                    "{} region at ({}, {}) of size {}x{} does not fit a {}x{} board",
                    label, row, col, self.region_rows, self.region_cols, self.height, self.width
                )));
            }
        }

        let rows_overlap = ranges_overlap(self.red_origin.0, self.green_origin.0, self.region_rows);
        let cols_overlap = ranges_overlap(self.red_origin.1, self.green_origin.1, self.region_cols);
        if rows_overlap && cols_overlap {
            return Err(Error::InvalidConfig(
                "red and green regions overlap".to_string(),
            ));
        }

        Ok(())
    }
}

fn ranges_overlap(a: usize, b: usize, len: usize) -> bool {
    len > 0 && a < b + len && b < a + len
}

/// Per-run driver parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// The run stops once the generation counter exceeds this value
    pub max_generations: u64,
    /// Generations between population snapshots
    pub stats_interval: u64,
    /// Generations between rendered frames, `None` disables rendering
    pub display_frequency: Option<u64>,
    /// Seed for the random fallback of a missing player
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_generations: 5000,
            stats_interval: 100,
            display_frequency: Some(100),
            seed: 0,
        }
    }
}

impl RunConfig {
    /// Headless configuration: same limits, no frames
    pub fn headless() -> Self {
        Self {
            display_frequency: None,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.stats_interval == 0 {
            return Err(Error::InvalidConfig(
                "stats_interval must be positive".to_string(),
            ));
        }
        if self.display_frequency == Some(0) {
            return Err(Error::InvalidConfig(
                "display_frequency must be positive or disabled".to_string(),
            ));
        }
        Ok(())
    }
}

/// Tournament configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Directory holding one `*.json` file per player
    pub players_dir: PathBuf,
    /// Directory receiving scoreboards, plots and frames
    pub output_dir: PathBuf,
    /// Maximum matches simulated at the same time
    pub max_concurrent_matches: usize,
    /// Write rendered frames as PNG files
    pub save_frames: bool,
    /// Frames are tiled `mosaic_tiles x mosaic_tiles` to show wraparound
    pub mosaic_tiles: usize,
    pub arena: ArenaConfig,
    pub run: RunConfig,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            players_dir: PathBuf::from("./players"),
            output_dir: PathBuf::from("./output"),
            max_concurrent_matches: 1,
            save_frames: false,
            mosaic_tiles: 2,
            arena: ArenaConfig::default(),
            run: RunConfig::default(),
        }
    }
}

impl TournamentConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent_matches == 0 {
            return Err(Error::InvalidConfig(
                "max_concurrent_matches must be positive".to_string(),
            ));
        }
        if self.mosaic_tiles == 0 {
            return Err(Error::InvalidConfig(
                "mosaic_tiles must be positive".to_string(),
            ));
        }
        self.arena.validate()?;
        self.run.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let arena = ArenaConfig::default();
        assert_eq!((arena.height, arena.width), (300, 300));
        assert_eq!(arena.region_shape(), (250, 100));
        assert!(arena.validate().is_ok());

        let run = RunConfig::default();
        assert_eq!(run.max_generations, 5000);
        assert_eq!(run.stats_interval, 100);
        assert!(run.validate().is_ok());

        assert_eq!(RunConfig::headless().display_frequency, None);
        assert!(TournamentConfig::default().validate().is_ok());
    }

    #[test]
    fn test_arena_rejects_overlap_and_overflow() {
        let overlapping = ArenaConfig {
            green_origin: (25, 100),
            ..Default::default()
        };
        assert!(overlapping.validate().is_err());

        let too_small = ArenaConfig {
            width: 200,
            ..Default::default()
        };
        assert!(too_small.validate().is_err());
    }

    #[test]
    fn test_run_config_rejects_zero_cadence() {
        let run = RunConfig {
            display_frequency: Some(0),
            ..Default::default()
        };
        assert!(run.validate().is_err());

        let run = RunConfig {
            stats_interval: 0,
            ..Default::default()
        };
        assert!(run.validate().is_err());
    }

    #[test]
    fn test_partial_config_deserialization() {
        let json = r#"{ "max_concurrent_matches": 4, "run": { "max_generations": 10 } }"#;
        let config: TournamentConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.max_concurrent_matches, 4);
        assert_eq!(config.run.max_generations, 10);
        assert_eq!(config.run.stats_interval, 100);
        assert_eq!(config.arena, ArenaConfig::default());
    }
}
