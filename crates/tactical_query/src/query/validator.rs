//! Point validation stage.
//!
//! Turns one candidate position into a [`SamplePoint`]. Stages run in order and stop at the
//! first failure:
//! 1. snap onto the navigable surface
//! 2. clearance overlap test (when [`QueryFlags::CLEARANCE`] is set)
//! 3. distances to origin and target
//! 4. ground-level obstacle distance toward the target
//! 5. eye-level visibility of the target
//! 6. line of sight back to the origin (when [`QueryFlags::ORIGIN_LINE_OF_SIGHT`] is set)
//! 7. cover classification
//!
//! Rejections are ordinary results, not errors. Errors come only from the environment.
use glam::Vec3;

use crate::environment::{Environment, LayerMask, OverlapBuffer};
use crate::error::Result;
use crate::query::{CoverType, Query, QueryFlags, SamplePoint};

/// Height above the ground at which ground-level rays start, avoiding self-intersection
/// with the floor.
pub const GROUND_RAY_OFFSET: f32 = 0.1;
/// Gap between the ground and the bottom of the clearance volume.
pub const CLEARANCE_LIFT: f32 = 0.01;

/// Why a candidate was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// No navigable surface within the sample radius.
    OffNavmesh,
    /// The standing volume overlaps `hits` colliders.
    Obstructed { hits: usize },
}

/// Sample plus the rejection reason, if any.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointOutcome {
    pub sample: SamplePoint,
    pub rejection: Option<Rejection>,
}

impl PointOutcome {
    fn rejected(candidate: Vec3, rejection: Rejection) -> Self {
        Self {
            sample: SamplePoint::invalid(candidate),
            rejection: Some(rejection),
        }
    }
}

/// Cover strength from obstacle distance and target visibility.
pub fn classify_cover(
    distance_to_obstacle: f32,
    can_see_target: bool,
    max_distance_from_cover: f32,
) -> CoverType {
    if distance_to_obstacle <= max_distance_from_cover {
        if can_see_target {
            CoverType::Half
        } else {
            CoverType::Full
        }
    } else {
        CoverType::None
    }
}

/// Validates one candidate, returning only the sample.
pub fn validate_point<E>(
    query: &Query,
    env: &E,
    candidate: Vec3,
    scratch: &mut OverlapBuffer,
) -> Result<SamplePoint>
where
    E: Environment + ?Sized,
{
    Ok(evaluate_point(query, env, candidate, scratch)?.sample)
}

/// Validates one candidate and reports why it was rejected, if it was.
///
/// `scratch` receives the overlap results of the clearance test; it is the only state
/// touched besides the returned record.
pub fn evaluate_point<E>(
    query: &Query,
    env: &E,
    candidate: Vec3,
    scratch: &mut OverlapBuffer,
) -> Result<PointOutcome>
where
    E: Environment + ?Sized,
{
    let settings = &query.settings;

    let Some(point) =
        env.sample_position(candidate, settings.nav_sample_radius, settings.nav_areas)?
    else {
        return Ok(PointOutcome::rejected(candidate, Rejection::OffNavmesh));
    };

    if settings.flags.contains(QueryFlags::CLEARANCE) {
        let size = settings.overlap_check_size;
        let center = point + Vec3::Y * (size.y * 0.5 + CLEARANCE_LIFT);
        let hits = env.overlap_box(center, size * 0.5, LayerMask::ALL, scratch)?;
        if hits > 0 {
            return Ok(PointOutcome::rejected(point, Rejection::Obstructed { hits }));
        }
    }

    let mut sample = SamplePoint {
        is_valid: true,
        is_clear: true,
        point,
        distance_to_origin: point.distance(query.origin),
        distance_to_target: point.distance(query.target),
        ..SamplePoint::default()
    };

    let lift = Vec3::Y * GROUND_RAY_OFFSET;
    sample.distance_to_obstacle =
        obstacle_distance(env, point + lift, query.target + lift, settings.obstacle_mask)?;

    let eye = Vec3::new(point.x, query.line_of_sight_origin.y, point.z);
    sample.can_see_target = !env.linecast(eye, query.line_of_sight_target, settings.obstacle_mask)?;

    if settings.flags.contains(QueryFlags::ORIGIN_LINE_OF_SIGHT) {
        sample.in_line_of_sight =
            !env.linecast(point + lift, query.origin + lift, settings.obstacle_mask)?;
    }

    sample.cover = classify_cover(
        sample.distance_to_obstacle,
        sample.can_see_target,
        settings.max_distance_from_cover,
    );

    Ok(PointOutcome {
        sample,
        rejection: None,
    })
}

/// Distance from `from` toward `to` until the first obstacle, or infinity if the segment
/// is unobstructed.
fn obstacle_distance<E>(env: &E, from: Vec3, to: Vec3, mask: LayerMask) -> Result<f32>
where
    E: Environment + ?Sized,
{
    let delta = to - from;
    let length = delta.length();
    if length <= f32::EPSILON {
        return Ok(f32::INFINITY);
    }
    let hit = env.raycast(from, delta / length, length, mask)?;
    Ok(hit.map_or(f32::INFINITY, |h| h.distance))
}
