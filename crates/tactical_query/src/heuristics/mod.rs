//! Built-in score functions for common tactical positions.
//!
//! Each heuristic combines normalized geometric facts from a [`SamplePoint`] into a
//! weighted sum, clamps it to [0, 1], and shapes it with the configured
//! [`ResponseCurve`]. Neighbor context is read through the validator-computed flags
//! (`can_see_target`), never through other samples' scores.
//!
//! - [`nearest_cover`]: hidden from the target, hugging an obstacle, next to exposed ground
//! - [`shooting_position`]: target visible, as close to the origin as possible
//! - [`retreat_position`]: hidden from the target and moving away from it
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::curve::ResponseCurve;
use crate::query::{Query, SamplePoint, ScoreFunction};
use crate::settings::{DEFAULT_MAX_DISTANCE, DEFAULT_MAX_DISTANCE_FROM_COVER};

pub mod nearest_cover;
pub mod retreat_position;
pub mod shooting_position;

pub use nearest_cover::nearest_cover;
pub use retreat_position::retreat_position;
pub use shooting_position::shooting_position;

/// Selector for the built-in heuristics.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heuristic {
    NearestCover,
    ShootingPosition,
    RetreatPosition,
}

impl Heuristic {
    pub const ALL: [Heuristic; 3] = [
        Heuristic::NearestCover,
        Heuristic::ShootingPosition,
        Heuristic::RetreatPosition,
    ];
}

/// Normalization distances and curve shared by the heuristics.
#[derive(Clone, Debug, PartialEq)]
pub struct HeuristicParams {
    /// Distance at which origin/target distances normalize to 1.
    pub max_distance: f32,
    /// Obstacle distance at which the cover term reaches 0.
    pub max_distance_from_cover: f32,
    pub response_curve: ResponseCurve,
}

impl Default for HeuristicParams {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_DISTANCE,
            max_distance_from_cover: DEFAULT_MAX_DISTANCE_FROM_COVER,
            response_curve: ResponseCurve::default(),
        }
    }
}

/// [`ScoreFunction`] dispatching to one of the built-in heuristics.
#[derive(Clone, Debug, PartialEq)]
pub struct HeuristicScorer {
    pub heuristic: Heuristic,
    pub params: HeuristicParams,
}

impl HeuristicScorer {
    pub fn new(heuristic: Heuristic, params: HeuristicParams) -> Self {
        Self { heuristic, params }
    }
}

impl ScoreFunction for HeuristicScorer {
    fn score(
        &self,
        query: &Query,
        index: usize,
        sample: &SamplePoint,
        samples: &[SamplePoint],
    ) -> f32 {
        match self.heuristic {
            Heuristic::NearestCover => nearest_cover(&self.params, query, index, sample, samples),
            Heuristic::ShootingPosition => shooting_position(&self.params, sample),
            Heuristic::RetreatPosition => retreat_position(&self.params, query, sample),
        }
    }
}

/// `distance / max`, clamped to [0, 1]. Infinite distances map to 1.
#[inline]
pub(crate) fn normalized(distance: f32, max: f32) -> f32 {
    (distance / max).clamp(0.0, 1.0)
}

/// `1 - normalized(distance, max)`.
#[inline]
pub(crate) fn inverse_normalized(distance: f32, max: f32) -> f32 {
    1.0 - normalized(distance, max)
}
