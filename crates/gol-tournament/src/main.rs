//! Round-robin tournament runner for two-color Game of Life players.

mod output;
mod plot;
mod scoreboard;
mod telemetry;
mod tournament;

use anyhow::{Context, Result};
use clap::Parser;
use gol_core::TournamentConfig;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "gol-tournament")]
#[command(about = "Pit every player against every other on a toroidal two-color Game of Life board")]
struct Args {
    /// Directory containing one JSON grid per player
    players_dir: PathBuf,

    /// Directory receiving scoreboards, plots and frames
    output_dir: PathBuf,

    /// JSON tournament configuration; flags override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Generations between rendered frames
    #[arg(long)]
    display_frequency: Option<u64>,

    /// Disable frame rendering entirely
    #[arg(long, conflicts_with = "display_frequency")]
    no_display: bool,

    /// Save rendered frames as PNG mosaics
    #[arg(long)]
    save_frames: bool,

    /// Generation cap per match
    #[arg(long)]
    max_generations: Option<u64>,

    /// Matches simulated concurrently
    #[arg(long, short = 'j')]
    jobs: Option<usize>,

    /// Seed for random fallback regions
    #[arg(long)]
    seed: Option<u64>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

impl Args {
    fn into_config(self) -> Result<TournamentConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str::<TournamentConfig>(&contents)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => TournamentConfig::default(),
        };

        config.players_dir = self.players_dir;
        config.output_dir = self.output_dir;
        if let Some(frequency) = self.display_frequency {
            config.run.display_frequency = Some(frequency);
        }
        if self.no_display {
            config.run.display_frequency = None;
        }
        if self.save_frames {
            config.save_frames = true;
        }
        if let Some(max) = self.max_generations {
            config.run.max_generations = max;
        }
        if let Some(jobs) = self.jobs {
            config.max_concurrent_matches = jobs;
        }
        if let Some(seed) = self.seed {
            config.run.seed = seed;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    telemetry::init_telemetry(args.log_json);

    let config = args.into_config()?;
    anyhow::ensure!(
        config.players_dir.is_dir(),
        "players directory {} does not exist",
        config.players_dir.display()
    );

    info!("Starting tournament");
    info!("Players: {}", config.players_dir.display());
    info!("Output: {}", config.output_dir.display());

    let cancel = Arc::new(AtomicBool::new(false));
    let flag = cancel.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping running matches");
            flag.store(true, Ordering::SeqCst);
        }
    });

    let report = tournament::run_tournament(&config, cancel).await?;
    scoreboard::write_all(&config.output_dir, &report)?;

    for (rank, standing) in report.standings().iter().enumerate() {
        info!(
            rank = rank + 1,
            player = %standing.name,
            wins = standing.wins,
            losses = standing.losses,
            draws = standing.draws,
            "Standing"
        );
    }

    if report.cancelled {
        warn!("Tournament interrupted; tables hold completed matches only");
    }
    info!("Tournament finished");

    Ok(())
}
