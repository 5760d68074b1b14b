//! Driver loop for a single head-to-head run.

use crate::control::{CancellationSource, NeverCancel, NoopObserver, SimulationObserver};
use crate::engine::{Engine, StepSummary};
use crate::grid::Board;
use gol_core::{Result, RunConfig, RunOutcome, StatsSnapshot};
use tracing::{debug, info, instrument, trace};

pub struct Simulation {
    board: Board,
    engine: Engine,
    config: RunConfig,
    generation: u64,
    stats: Vec<StatsSnapshot>,
}

impl Simulation {
    pub fn new(board: Board, config: RunConfig) -> Result<Self> {
        config.validate()?;
        let engine = Engine::for_board(&board);

        Ok(Self {
            board,
            engine,
            config,
            generation: 0,
            stats: Vec::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stats(&self) -> &[StatsSnapshot] {
        &self.stats
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Advance one generation without any cadence bookkeeping
    pub fn step(&mut self) -> StepSummary {
        let summary = self.engine.step(&mut self.board);
        self.generation += 1;
        summary
    }

    /// Run without rendering hooks or cancellation
    pub fn run_headless(&mut self) -> RunOutcome {
        self.run(&NeverCancel, &mut NoopObserver)
    }

    /// Run until cancelled or until the generation counter passes
    /// `max_generations`.
    ///
    /// Each iteration steps once, then handles the frame and stats cadences,
    /// then polls `cancel` exactly once.
    #[instrument(skip_all, fields(max_generations = self.config.max_generations))]
    pub fn run(
        &mut self,
        cancel: &dyn CancellationSource,
        observer: &mut dyn SimulationObserver,
    ) -> RunOutcome {
        debug!("Starting run from generation {}", self.generation);
        let mut cancelled = false;

        loop {
            let summary = self.step();
            trace!(
                generation = self.generation,
                births = summary.births,
                deaths = summary.deaths,
                "Generation computed"
            );

            if let Some(frequency) = self.config.display_frequency {
                if self.generation % frequency == 0 {
                    observer.on_frame(self.generation, &self.board);
                }
            }

            if self.generation % self.config.stats_interval == 0 {
                let snapshot = self.snapshot();
                info!(
                    event = "population_snapshot",
                    generation = snapshot.generation,
                    red = snapshot.red_count,
                    green = snapshot.green_count,
                    "Step: {}, Red: {}, Green: {}",
                    snapshot.generation,
                    snapshot.red_count,
                    snapshot.green_count
                );
                observer.on_stats(&snapshot);
                self.stats.push(snapshot);
            }

            if cancel.is_cancelled() {
                info!(generation = self.generation, "Run cancelled");
                cancelled = true;
                break;
            }

            if self.generation > self.config.max_generations {
                break;
            }
        }

        let counts = self.board.counts();
        info!(
            event = "run_complete",
            generations = self.generation,
            red = counts.red,
            green = counts.green,
            alive = counts.total(),
            cancelled = cancelled,
            "Run complete"
        );

        RunOutcome {
            red_count: counts.red,
            green_count: counts.green,
            generations: self.generation,
            stats: self.stats.clone(),
            cancelled,
        }
    }

    fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot::new(self.generation, self.board.counts())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::CancelFn;
    use gol_core::{Color, PopulationCounts, Position};
    use proptest::prelude::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct RecordingObserver {
        frames: Vec<u64>,
        snapshots: Vec<StatsSnapshot>,
    }

    impl SimulationObserver for RecordingObserver {
        fn on_frame(&mut self, generation: u64, _board: &Board) {
            self.frames.push(generation);
        }

        fn on_stats(&mut self, snapshot: &StatsSnapshot) {
            self.snapshots.push(*snapshot);
        }
    }

    fn small_config(max_generations: u64) -> RunConfig {
        RunConfig {
            max_generations,
            ..RunConfig::headless()
        }
    }

    fn glider_board() -> Board {
        let mut board = Board::new(16, 16);
        for (row, col, color) in [
            (1, 2, Color::Red),
            (2, 3, Color::Green),
            (3, 1, Color::Red),
            (3, 2, Color::Green),
            (3, 3, Color::Red),
        ] {
            board.set(Position::new(row, col), Some(color));
        }
        board
    }

    #[test]
    fn test_terminates_one_past_cap() {
        let mut sim = Simulation::new(Board::new(6, 6), RunConfig::headless()).unwrap();
        let outcome = sim.run_headless();

        assert_eq!(outcome.generations, 5001);
        assert!(!outcome.cancelled);
        assert_eq!(outcome.counts(), PopulationCounts::default());
    }

    #[test]
    fn test_stats_cadence() {
        let mut sim = Simulation::new(glider_board(), small_config(1000)).unwrap();
        let outcome = sim.run_headless();

        assert_eq!(outcome.generations, 1001);
        assert_eq!(outcome.stats.len(), 10);
        for (i, snapshot) in outcome.stats.iter().enumerate() {
            assert_eq!(snapshot.generation, (i as u64 + 1) * 100);
            // A glider keeps five cells forever on a torus
            assert_eq!(snapshot.red_count + snapshot.green_count, 5);
        }
    }

    #[test]
    fn test_frame_cadence_is_independent() {
        let config = RunConfig {
            max_generations: 99,
            display_frequency: Some(30),
            ..Default::default()
        };
        let mut sim = Simulation::new(glider_board(), config).unwrap();
        let mut observer = RecordingObserver::default();
        let outcome = sim.run(&NeverCancel, &mut observer);

        assert_eq!(outcome.generations, 100);
        assert_eq!(observer.frames, vec![30, 60, 90]);
        assert_eq!(observer.snapshots.len(), 1);
        assert_eq!(observer.snapshots, outcome.stats);
    }

    #[test]
    fn test_cancellation_polled_once_per_generation() {
        let polls = Cell::new(0u64);
        let cancel = CancelFn(|| {
            polls.set(polls.get() + 1);
            polls.get() == 7
        });

        let mut sim = Simulation::new(glider_board(), small_config(5000)).unwrap();
        let outcome = sim.run(&cancel, &mut NoopObserver);

        assert!(outcome.cancelled);
        assert_eq!(outcome.generations, 7);
        assert_eq!(polls.get(), 7);
        assert!(outcome.stats.is_empty());
    }

    #[test]
    fn test_final_counts_match_board() {
        let mut sim = Simulation::new(glider_board(), small_config(37)).unwrap();
        let outcome = sim.run_headless();
        assert_eq!(outcome.counts(), sim.board().counts());
        assert_eq!(sim.generation(), 38);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = RunConfig {
            stats_interval: 0,
            ..Default::default()
        };
        assert!(Simulation::new(Board::new(4, 4), config).is_err());
    }

    fn board_strategy() -> impl Strategy<Value = Board> {
        (3usize..12, 3usize..12).prop_flat_map(|(h, w)| {
            (
                proptest::collection::vec(any::<bool>(), h * w),
                proptest::collection::vec(any::<bool>(), h * w),
            )
                .prop_map(move |(alive, red)| Board::from_layers(h, w, alive, red).unwrap())
        })
    }

    proptest! {
        #[test]
        fn prop_runs_are_deterministic(board in board_strategy()) {
            let config = small_config(250);
            let mut first = Simulation::new(board.clone(), config.clone()).unwrap();
            let mut second = Simulation::new(board, config).unwrap();

            for _ in 0..20 {
                first.step();
                second.step();
                prop_assert_eq!(first.board().alive_layer(), second.board().alive_layer());
                prop_assert_eq!(first.board().counts(), second.board().counts());
            }

            prop_assert_eq!(first.run_headless(), second.run_headless());
        }
    }
}
