//! Shooting-position heuristic.
use crate::heuristics::{inverse_normalized, HeuristicParams};
use crate::query::SamplePoint;

/// Scores clear points with eye-level sight of the target; closer to the origin is better.
pub fn shooting_position(params: &HeuristicParams, sample: &SamplePoint) -> f32 {
    if !sample.can_see_target || !sample.is_clear {
        return 0.0;
    }
    params
        .response_curve
        .evaluate(inverse_normalized(sample.distance_to_origin, params.max_distance))
}
