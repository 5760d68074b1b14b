//! File output: PNG images, stats series and rendered frames.

use gol_core::{Error, Result, StatsSnapshot};
use gol_world::{Board, Frame, SimulationObserver};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Save an RGB frame as PNG
pub fn save_png(path: &Path, frame: &Frame) -> Result<()> {
    let file = File::create(path)?;
    let w = BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, frame.width as u32, frame.height as u32);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Fast);

    let mut writer = encoder
        .write_header()
        .map_err(|e| Error::Image(format!("{}: {}", path.display(), e)))?;
    writer
        .write_image_data(&frame.pixels)
        .map_err(|e| Error::Image(format!("{}: {}", path.display(), e)))?;
    writer
        .finish()
        .map_err(|e| Error::Image(format!("{}: {}", path.display(), e)))?;

    Ok(())
}

/// Population time series as `generation,red,green`
pub fn write_stats_csv(path: &Path, stats: &[StatsSnapshot]) -> Result<()> {
    let mut f = BufWriter::new(File::create(path)?);
    writeln!(f, "generation,red,green")?;
    for snapshot in stats {
        writeln!(
            f,
            "{},{},{}",
            snapshot.generation, snapshot.red_count, snapshot.green_count
        )?;
    }
    f.flush()?;
    Ok(())
}

/// Writes each rendered frame as a tiled PNG named after its generation.
///
/// Write failures are logged and do not stop the run.
pub struct FrameWriter {
    dir: PathBuf,
    tiles: usize,
    written: usize,
}

impl FrameWriter {
    pub fn new(dir: PathBuf, tiles: usize) -> Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            tiles,
            written: 0,
        })
    }

    pub fn written(&self) -> usize {
        self.written
    }

    fn write_frame(&self, generation: u64, board: &Board) -> Result<()> {
        let frame = Frame::from_board(board).mosaic(self.tiles)?;
        save_png(&self.dir.join(format!("{}.png", generation)), &frame)
    }
}

impl SimulationObserver for FrameWriter {
    fn on_frame(&mut self, generation: u64, board: &Board) {
        match self.write_frame(generation, board) {
            Ok(()) => {
                self.written += 1;
                debug!(generation, dir = %self.dir.display(), "Frame written");
            }
            Err(e) => warn!("Failed to write frame {}: {}", generation, e),
        }
    }
}
