//! Retreat-position heuristic.
use crate::heuristics::{inverse_normalized, normalized, HeuristicParams};
use crate::query::{Query, SamplePoint};

/// Weight of the "close to origin" term.
pub const ORIGIN_WEIGHT: f32 = 2.0;
/// Weight of the alignment with the retreat direction.
pub const ALIGNMENT_WEIGHT: f32 = 2.5;

/// Cosine between the point-to-origin and target-to-origin directions.
///
/// Negative when the point lies on the far side of the origin as seen from the target.
/// Degenerate directions (point on the origin, target on the origin) yield 0.
pub fn retreat_alignment(query: &Query, sample: &SamplePoint) -> f32 {
    let to_origin = (query.origin - sample.point).normalize_or_zero();
    let threat = (query.origin - query.target).normalize_or_zero();
    to_origin.dot(threat)
}

/// Scores hidden, clear points that lie behind the origin relative to the target.
///
/// Averages distance from the target, weighted closeness to the origin, obstacle proximity
/// and the weighted alignment magnitude, curves the result and scales it by obstacle
/// proximity.
pub fn retreat_position(params: &HeuristicParams, query: &Query, sample: &SamplePoint) -> f32 {
    if sample.can_see_target || !sample.is_clear {
        return 0.0;
    }

    let alignment = retreat_alignment(query, sample);
    if alignment >= 0.0 {
        return 0.0;
    }

    let from_target = normalized(sample.distance_to_target, params.max_distance);
    let near_origin =
        inverse_normalized(sample.distance_to_origin, params.max_distance) * ORIGIN_WEIGHT;
    let near_obstacle =
        inverse_normalized(sample.distance_to_obstacle, params.max_distance_from_cover);
    let aligned = alignment.abs() * ALIGNMENT_WEIGHT;

    let combined = ((from_target + near_origin + near_obstacle + aligned) / 4.0).clamp(0.0, 1.0);
    params.response_curve.evaluate(combined) * near_obstacle
}
