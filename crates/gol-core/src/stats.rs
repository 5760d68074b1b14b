//! Population statistics and run outcomes.

use crate::Color;
use serde::{Deserialize, Serialize};

/// Live cell counts per color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationCounts {
    pub red: usize,
    pub green: usize,
}

impl PopulationCounts {
    pub fn total(&self) -> usize {
        self.red + self.green
    }

    /// Color holding a strict majority, `None` on a tie
    pub fn leader(&self) -> Option<Color> {
        match self.red.cmp(&self.green) {
            std::cmp::Ordering::Greater => Some(Color::Red),
            std::cmp::Ordering::Less => Some(Color::Green),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Population counts taken at a given generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub generation: u64,
    pub red_count: usize,
    pub green_count: usize,
}

impl StatsSnapshot {
    pub fn new(generation: u64, counts: PopulationCounts) -> Self {
        Self {
            generation,
            red_count: counts.red,
            green_count: counts.green,
        }
    }

    pub fn counts(&self) -> PopulationCounts {
        PopulationCounts {
            red: self.red_count,
            green: self.green_count,
        }
    }
}

/// Result of a single simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub red_count: usize,
    pub green_count: usize,
    /// Value of the generation counter when the run stopped
    pub generations: u64,
    pub stats: Vec<StatsSnapshot>,
    pub cancelled: bool,
}

impl RunOutcome {
    pub fn counts(&self) -> PopulationCounts {
        PopulationCounts {
            red: self.red_count,
            green: self.green_count,
        }
    }

    pub fn winner(&self) -> Option<Color> {
        self.counts().leader()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leader() {
        let counts = PopulationCounts { red: 10, green: 3 };
        assert_eq!(counts.leader(), Some(Color::Red));
        assert_eq!(counts.total(), 13);

        let counts = PopulationCounts { red: 3, green: 10 };
        assert_eq!(counts.leader(), Some(Color::Green));

        let counts = PopulationCounts { red: 4, green: 4 };
        assert_eq!(counts.leader(), None);
    }

    #[test]
    fn test_outcome_winner() {
        let outcome = RunOutcome {
            red_count: 0,
            green_count: 7,
            generations: 5001,
            stats: vec![StatsSnapshot::new(100, PopulationCounts { red: 1, green: 2 })],
            cancelled: false,
        };
        assert_eq!(outcome.winner(), Some(Color::Green));
        assert_eq!(outcome.stats[0].counts(), PopulationCounts { red: 1, green: 2 });
    }

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = StatsSnapshot::new(200, PopulationCounts { red: 5, green: 6 });
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: StatsSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, back);
    }
}
