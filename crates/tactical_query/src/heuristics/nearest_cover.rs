//! Nearest-cover heuristic.
use crate::grid::neighbor_indices;
use crate::heuristics::{inverse_normalized, HeuristicParams};
use crate::query::{Query, SamplePoint};

/// Flat bonus when any neighbor has a clear view of the target.
pub const EXPOSED_NEIGHBOR_BONUS: f32 = 1.0;

/// Scores hidden points close to the origin and close to the obstacle that hides them.
///
/// Points next to exposed ground get [`EXPOSED_NEIGHBOR_BONUS`], favoring spots at the
/// edge of an obstacle's shadow over spots deep inside it. The curved score is scaled by
/// the obstacle proximity term once more, so points that are technically in range but far
/// from the obstacle edge fall off.
pub fn nearest_cover(
    params: &HeuristicParams,
    query: &Query,
    index: usize,
    sample: &SamplePoint,
    samples: &[SamplePoint],
) -> f32 {
    if sample.can_see_target || !sample.is_clear {
        return 0.0;
    }

    let near_origin = inverse_normalized(sample.distance_to_origin, params.max_distance);
    let near_obstacle =
        inverse_normalized(sample.distance_to_obstacle, params.max_distance_from_cover);
    let mut combined = near_origin + near_obstacle;

    let size = query.settings.grid_size;
    let exposed_neighbor = neighbor_indices(index, size, size)
        .any(|n| samples.get(n).is_some_and(|s| s.can_see_target));
    if exposed_neighbor {
        combined += EXPOSED_NEIGHBOR_BONUS;
    }

    let combined = (combined / 3.0).clamp(0.0, 1.0);
    params.response_curve.evaluate(combined) * near_obstacle
}
