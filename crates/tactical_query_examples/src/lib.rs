#![forbid(unsafe_code)]

mod rendering;
mod scenes;

pub use rendering::{ascii_score_map, init_tracing, render_scores_to_png, ScoreMapStyle};
pub use scenes::{pillar_courtyard, random_arena};
