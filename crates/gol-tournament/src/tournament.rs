//! Tournament enumeration and match execution.

use crate::output::{self, FrameWriter};
use crate::plot;
use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use gol_core::{PopulationCounts, RunOutcome, TournamentConfig};
use gol_world::{Arena, NoopObserver, PlayerGrid, Simulation, SimulationObserver};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// One match: `red` plays the red region, `green` the green one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pairing {
    pub red: usize,
    pub green: usize,
    /// Green's pattern is rotated 180 degrees
    pub reversed: bool,
}

impl Pairing {
    pub fn label(&self, names: &[String]) -> String {
        let base = format!("{}_vs_{}", names[self.red], names[self.green]);
        if self.reversed {
            format!("{}_reversed", base)
        } else {
            base
        }
    }
}

/// Every ordered pair of distinct players, each followed by its reversed rematch
pub fn pairings(num_players: usize) -> Vec<Pairing> {
    let mut pairings = Vec::new();
    for red in 0..num_players {
        for green in 0..num_players {
            if red == green {
                continue;
            }
            for reversed in [false, true] {
                pairings.push(Pairing {
                    red,
                    green,
                    reversed,
                });
            }
        }
    }
    pairings
}

/// All `*.json` files in a directory, sorted by path
pub fn discover_players(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Standing<'a> {
    pub name: &'a str,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
}

#[derive(Debug, Clone)]
pub struct TournamentReport {
    pub names: Vec<String>,
    /// `results[i][j]` holds final `(red, green)` counts with player i as
    /// red; `None` until that match has been played
    pub results: Vec<Vec<Option<PopulationCounts>>>,
    /// Same layout, with player j's pattern rotated 180 degrees
    pub results_reversed: Vec<Vec<Option<PopulationCounts>>>,
    pub matches_played: usize,
    pub cancelled: bool,
}

impl TournamentReport {
    pub fn new(names: Vec<String>) -> Self {
        let n = names.len();
        Self {
            names,
            results: vec![vec![None; n]; n],
            results_reversed: vec![vec![None; n]; n],
            matches_played: 0,
            cancelled: false,
        }
    }

    pub fn record(&mut self, pairing: Pairing, counts: PopulationCounts) {
        let table = if pairing.reversed {
            &mut self.results_reversed
        } else {
            &mut self.results
        };
        table[pairing.red][pairing.green] = Some(counts);
        self.matches_played += 1;
    }

    /// Win/loss/draw tallies over every played match in both tables, best
    /// first.
    ///
    /// Ranked by wins, then fewer losses, then name.
    pub fn standings(&self) -> Vec<Standing<'_>> {
        let mut standings: Vec<Standing<'_>> = self
            .names
            .iter()
            .map(|name| Standing {
                name: name.as_str(),
                wins: 0,
                losses: 0,
                draws: 0,
            })
            .collect();

        for table in [&self.results, &self.results_reversed] {
            for (red, row) in table.iter().enumerate() {
                for (green, counts) in row.iter().enumerate() {
                    let Some(counts) = counts else { continue };
                    match counts.leader() {
                        Some(gol_core::Color::Red) => {
                            standings[red].wins += 1;
                            standings[green].losses += 1;
                        }
                        Some(gol_core::Color::Green) => {
                            standings[green].wins += 1;
                            standings[red].losses += 1;
                        }
                        None => {
                            standings[red].draws += 1;
                            standings[green].draws += 1;
                        }
                    }
                }
            }
        }

        standings.sort_by(|a, b| {
            b.wins
                .cmp(&a.wins)
                .then(a.losses.cmp(&b.losses))
                .then(a.name.cmp(b.name))
        });
        standings
    }
}

/// Simulate a single pairing and write its plot and stats series
#[instrument(skip_all, fields(red = %players[pairing.red].name, green = %players[pairing.green].name, reversed = pairing.reversed))]
pub fn run_match(
    players: &[PlayerGrid],
    names: &[String],
    pairing: Pairing,
    config: &TournamentConfig,
    cancel: &Arc<AtomicBool>,
) -> gol_core::Result<RunOutcome> {
    let label = pairing.label(names);
    info!("Simulating {}", label);

    let red = &players[pairing.red];
    let green = if pairing.reversed {
        players[pairing.green].flipped()
    } else {
        players[pairing.green].clone()
    };

    let arena = Arena::new(config.arena.clone())?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.run.seed);
    let board = arena.build(Some(red), Some(&green), &mut rng)?;

    let mut simulation = Simulation::new(board, config.run.clone())?;
    let mut frame_writer;
    let mut noop = NoopObserver;
    let observer: &mut dyn SimulationObserver = if config.save_frames {
        frame_writer = FrameWriter::new(
            config.output_dir.join("frames").join(&label),
            config.mosaic_tiles,
        )?;
        &mut frame_writer
    } else {
        &mut noop
    };

    let outcome = simulation.run(cancel, observer);

    output::write_stats_csv(
        &config.output_dir.join(format!("{}.csv", label)),
        &outcome.stats,
    )?;
    let chart = plot::population_chart(&outcome.stats);
    output::save_png(&config.output_dir.join(format!("{}.png", label)), &chart)?;

    info!(
        event = "match_complete",
        label = %label,
        red_count = outcome.red_count,
        green_count = outcome.green_count,
        generations = outcome.generations,
        winner = %outcome.winner().map_or_else(|| "draw".to_string(), |c| c.to_string()),
        "{} stats: {}, {} stats: {}",
        red.name,
        outcome.red_count,
        green.name,
        outcome.green_count
    );

    Ok(outcome)
}

/// Load every player, then run all pairings with bounded concurrency
pub async fn run_tournament(
    config: &TournamentConfig,
    cancel: Arc<AtomicBool>,
) -> Result<TournamentReport> {
    let paths = discover_players(&config.players_dir)?;
    let expected = config.arena.region_shape();
    let players = paths
        .iter()
        .map(|path| PlayerGrid::load(path, expected))
        .collect::<gol_core::Result<Vec<_>>>()?;
    let names: Vec<String> = players.iter().map(|p| p.name.clone()).collect();
    info!("Loaded {} players", players.len());

    if players.len() < 2 {
        warn!("Fewer than two players; no matches to run");
    }

    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;

    let players = Arc::new(players);
    let shared_names = Arc::new(names.clone());
    let shared_config = Arc::new(config.clone());
    let all_pairings = pairings(players.len());
    debug!("Scheduled {} matches", all_pairings.len());

    let results: Vec<_> = stream::iter(all_pairings)
        .map(|pairing| {
            let players = players.clone();
            let names = shared_names.clone();
            let config = shared_config.clone();
            let cancel = cancel.clone();
            tokio::task::spawn_blocking(move || {
                if cancel.load(Ordering::Relaxed) {
                    return Ok(None);
                }
                run_match(&players, &names, pairing, &config, &cancel)
                    .map(|outcome| Some((pairing, outcome)))
            })
        })
        .buffer_unordered(config.max_concurrent_matches)
        .collect()
        .await;

    let mut report = TournamentReport::new(names);
    for joined in results {
        match joined.context("match task panicked")?? {
            Some((pairing, outcome)) => {
                report.cancelled |= outcome.cancelled;
                if !outcome.cancelled {
                    report.record(pairing, outcome.counts());
                }
            }
            None => report.cancelled = true,
        }
    }

    info!(
        matches_played = report.matches_played,
        cancelled = report.cancelled,
        "All matches finished"
    );
    Ok(report)
}
