//! Population-over-time chart rasterized to an RGB frame.

use gol_core::{Color, StatsSnapshot};
use gol_world::Frame;

const WIDTH: usize = 1000;
const HEIGHT: usize = 600;
const MARGIN_LEFT: usize = 60;
const MARGIN_RIGHT: usize = 30;
const MARGIN_TOP: usize = 30;
const MARGIN_BOTTOM: usize = 50;
const GRID_DIVISIONS: usize = 5;

const WHITE: [u8; 3] = [255, 255, 255];
const BLACK: [u8; 3] = [0, 0, 0];
const GRID_GREY: [u8; 3] = [220, 220, 220];

struct Canvas {
    frame: Frame,
}

impl Canvas {
    fn new() -> Self {
        Self {
            frame: Frame {
                width: WIDTH,
                height: HEIGHT,
                pixels: WHITE.repeat(WIDTH * HEIGHT),
            },
        }
    }

    fn put(&mut self, x: i64, y: i64, rgb: [u8; 3]) {
        if x < 0 || y < 0 || x >= WIDTH as i64 || y >= HEIGHT as i64 {
            return;
        }
        let i = (y as usize * WIDTH + x as usize) * 3;
        self.frame.pixels[i..i + 3].copy_from_slice(&rgb);
    }

    /// Bresenham line, `thickness` pixels tall
    fn line(&mut self, from: (i64, i64), to: (i64, i64), rgb: [u8; 3], thickness: i64) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            for t in 0..thickness {
                self.put(x, y + t, rgb);
            }
            if (x, y) == to {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn fill(&mut self, x: i64, y: i64, size: i64, rgb: [u8; 3]) {
        for dy in 0..size {
            for dx in 0..size {
                self.put(x + dx, y + dy, rgb);
            }
        }
    }
}

/// Red and green cell counts over generations, on a white background with
/// axes, grid lines and a two-swatch legend in the top-right corner.
///
/// No text is drawn; the x axis runs from generation 0 to the last snapshot
/// and the y axis from 0 to the peak count.
pub fn population_chart(stats: &[StatsSnapshot]) -> Frame {
    let mut canvas = Canvas::new();

    let left = MARGIN_LEFT as i64;
    let right = (WIDTH - MARGIN_RIGHT) as i64;
    let top = MARGIN_TOP as i64;
    let bottom = (HEIGHT - MARGIN_BOTTOM) as i64;

    for i in 1..=GRID_DIVISIONS as i64 {
        let x = left + (right - left) * i / GRID_DIVISIONS as i64;
        let y = bottom - (bottom - top) * i / GRID_DIVISIONS as i64;
        canvas.line((x, top), (x, bottom), GRID_GREY, 1);
        canvas.line((left, y), (right, y), GRID_GREY, 1);
    }
    canvas.line((left, top), (left, bottom), BLACK, 1);
    canvas.line((left, bottom), (right, bottom), BLACK, 1);

    let max_generation = stats.iter().map(|s| s.generation).max().unwrap_or(0).max(1);
    let max_count = stats
        .iter()
        .map(|s| s.red_count.max(s.green_count))
        .max()
        .unwrap_or(0)
        .max(1);

    let to_pixel = |generation: u64, count: usize| -> (i64, i64) {
        let x = left + ((right - left) as f64 * generation as f64 / max_generation as f64).round() as i64;
        let y = bottom - ((bottom - top) as f64 * count as f64 / max_count as f64).round() as i64;
        (x, y)
    };

    for color in [Color::Red, Color::Green] {
        let points: Vec<(i64, i64)> = stats
            .iter()
            .map(|s| {
                let count = if color.is_red() { s.red_count } else { s.green_count };
                to_pixel(s.generation, count)
            })
            .collect();

        match points.as_slice() {
            [] => {}
            [only] => canvas.fill(only.0 - 1, only.1 - 1, 3, color.rgb()),
            _ => {
                for pair in points.windows(2) {
                    canvas.line(pair[0], pair[1], color.rgb(), 2);
                }
            }
        }
    }

    canvas.fill(right - 40, top + 10, 12, Color::Red.rgb());
    canvas.fill(right - 40, top + 30, 12, Color::Green.rgb());

    canvas.frame
}
