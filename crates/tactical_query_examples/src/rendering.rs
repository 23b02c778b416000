use std::path::Path;

use image::{Rgb, RgbImage};
use tactical_query::prelude::*;
use tracing::info;

/// Installs a stderr `fmt` subscriber. `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Colors and cell size for score heat maps.
#[derive(Debug, Clone)]
pub struct ScoreMapStyle {
    pub cell_px: u32,
    pub invalid: [u8; 3],
    pub low: [u8; 3],
    pub high: [u8; 3],
    pub best: [u8; 3],
}

impl Default for ScoreMapStyle {
    fn default() -> Self {
        Self {
            cell_px: 24,
            invalid: [90, 90, 90],
            low: [20, 24, 40],
            high: [80, 220, 120],
            best: [250, 200, 40],
        }
    }
}

impl ScoreMapStyle {
    pub fn with_cell_px(mut self, cell_px: u32) -> Self {
        self.cell_px = cell_px.max(1);
        self
    }

    fn shade(&self, score: f32) -> [u8; 3] {
        let t = score.clamp(0.0, 1.0);
        let mut out = [0u8; 3];
        for (i, c) in out.iter_mut().enumerate() {
            let a = self.low[i] as f32;
            let b = self.high[i] as f32;
            *c = (a + (b - a) * t).round() as u8;
        }
        out
    }
}

/// Writes a `grid_size x grid_size` heat map of `samples` to `path`.
///
/// Image rows follow grid rows (world X), image columns follow grid columns (world Z).
pub fn render_scores_to_png(
    samples: &[SamplePoint],
    grid_size: usize,
    style: &ScoreMapStyle,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    anyhow::ensure!(
        samples.len() == grid_size * grid_size,
        "expected {} samples, got {}",
        grid_size * grid_size,
        samples.len()
    );

    let side = grid_size as u32 * style.cell_px;
    let mut img = RgbImage::new(side, side);
    let best = best_sample(samples);

    for (index, sample) in samples.iter().enumerate() {
        let color = if Some(index) == best {
            style.best
        } else if sample.is_valid {
            style.shade(sample.score)
        } else {
            style.invalid
        };
        let row = (index / grid_size) as u32;
        let col = (index % grid_size) as u32;
        for dy in 0..style.cell_px {
            for dx in 0..style.cell_px {
                img.put_pixel(col * style.cell_px + dx, row * style.cell_px + dy, Rgb(color));
            }
        }
    }

    img.save(path.as_ref())?;
    info!("Wrote score map to {}.", path.as_ref().display());
    Ok(())
}

/// One line per grid row: `x` invalid, `@` best, otherwise a density ramp by score.
pub fn ascii_score_map(samples: &[SamplePoint], grid_size: usize) -> String {
    const RAMP: [char; 5] = ['.', ':', '-', '+', '#'];
    let best = best_sample(samples);
    let mut out = String::with_capacity(samples.len() * 2 + grid_size);

    for (index, sample) in samples.iter().enumerate() {
        let c = if Some(index) == best {
            '@'
        } else if !sample.is_valid {
            'x'
        } else {
            let level = (sample.score.clamp(0.0, 1.0) * (RAMP.len() - 1) as f32).round();
            RAMP[level as usize]
        };
        out.push(c);
        out.push(' ');
        if grid_size > 0 && (index + 1) % grid_size == 0 {
            out.pop();
            out.push('\n');
        }
    }
    out
}
