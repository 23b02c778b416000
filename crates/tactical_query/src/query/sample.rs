//! Per-cell evaluation records.
use std::fmt;

use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How well a point is shielded from the target.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CoverType {
    /// No obstacle within cover range.
    #[default]
    None,
    /// Obstacle in range, target still visible at eye level.
    Half,
    /// Obstacle in range, target hidden at eye level.
    Full,
}

/// Evaluation result for one grid cell.
///
/// Invalid samples keep only `point`; every other field stays at its default and the
/// score is always 0.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SamplePoint {
    /// Whether the point is on the navigable surface and physically clear.
    pub is_valid: bool,
    /// Snapped position when the candidate reached the navigable surface, the raw
    /// candidate when it did not.
    pub point: Vec3,
    pub distance_to_origin: f32,
    pub distance_to_target: f32,
    /// Ground-level distance toward the target before an obstacle is hit.
    /// Infinite when nothing is in the way.
    pub distance_to_obstacle: f32,
    /// Unobstructed line back to the query origin.
    pub in_line_of_sight: bool,
    pub is_clear: bool,
    /// Unobstructed eye-level line to the target.
    pub can_see_target: bool,
    pub cover: CoverType,
    pub score: f32,
}

impl SamplePoint {
    /// A rejected candidate.
    pub fn invalid(point: Vec3) -> Self {
        Self {
            point,
            ..Self::default()
        }
    }
}

impl fmt::Display for SamplePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Score: {:.3}", self.score)?;
        writeln!(f, "DistToOrigin: {:.3}", self.distance_to_origin)?;
        writeln!(f, "DistToTarget: {:.3}", self.distance_to_target)?;
        writeln!(f, "DistToObstacle: {:.3}", self.distance_to_obstacle)?;
        writeln!(f, "InLineOfSight: {}", self.in_line_of_sight)?;
        writeln!(f, "IsClear: {}", self.is_clear)?;
        writeln!(f, "CanSeeTarget: {}", self.can_see_target)?;
        write!(f, "Cover: {:?}", self.cover)
    }
}
