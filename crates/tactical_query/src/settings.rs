//! Tunable per-query-type configuration.
//!
//! [`QuerySettings`] groups everything a designer tweaks for one kind of tactical query:
//! grid shape, collision filters, clearance volume, normalization distances and the
//! response curve. With the `serde` feature it can be loaded from data files.
use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::curve::ResponseCurve;
use crate::environment::{LayerMask, NavAreaMask};
use crate::error::{Error, Result};
use crate::grid::validate_grid;
use crate::heuristics::{Heuristic, HeuristicParams, HeuristicScorer};
use crate::query::QueryFlags;

pub const DEFAULT_GRID_SIZE: usize = 16;
pub const DEFAULT_GRID_SPACING: f32 = 1.0;
pub const DEFAULT_MAX_DISTANCE: f32 = 10.0;
pub const DEFAULT_MAX_DISTANCE_FROM_COVER: f32 = 3.0;
pub const DEFAULT_NAV_SAMPLE_RADIUS: f32 = 0.1;

/// Configuration shared by every query of one type.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct QuerySettings {
    /// Cells per grid side. Must be even and >= 2.
    pub grid_size: usize,
    /// World units between adjacent cells.
    pub grid_spacing: f32,
    /// Layers that block sight lines.
    pub obstacle_mask: LayerMask,
    /// Navigable area classifications a sample may snap onto.
    pub nav_areas: NavAreaMask,
    /// Full extents of the standing volume tested for clearance.
    pub overlap_check_size: Vec3,
    /// Optional validation stages.
    pub flags: QueryFlags,
    /// Distance at which origin/target distances normalize to 1.
    pub max_distance: f32,
    /// Obstacle distance up to which a point counts as covered.
    pub max_distance_from_cover: f32,
    /// Easing applied to combined heuristic scores.
    pub response_curve: ResponseCurve,
    /// Search radius when snapping candidates onto the navigable surface.
    pub nav_sample_radius: f32,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            grid_spacing: DEFAULT_GRID_SPACING,
            obstacle_mask: LayerMask::ALL,
            nav_areas: NavAreaMask::ALL,
            overlap_check_size: Vec3::new(0.5, 1.5, 0.5),
            flags: QueryFlags::default(),
            max_distance: DEFAULT_MAX_DISTANCE,
            max_distance_from_cover: DEFAULT_MAX_DISTANCE_FROM_COVER,
            response_curve: ResponseCurve::default(),
            nav_sample_radius: DEFAULT_NAV_SAMPLE_RADIUS,
        }
    }
}

impl QuerySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grid(mut self, size: usize, spacing: f32) -> Self {
        self.grid_size = size;
        self.grid_spacing = spacing;
        self
    }

    pub fn with_grid_size(mut self, size: usize) -> Self {
        self.grid_size = size;
        self
    }

    pub fn with_grid_spacing(mut self, spacing: f32) -> Self {
        self.grid_spacing = spacing;
        self
    }

    pub fn with_obstacle_mask(mut self, mask: LayerMask) -> Self {
        self.obstacle_mask = mask;
        self
    }

    pub fn with_nav_areas(mut self, areas: NavAreaMask) -> Self {
        self.nav_areas = areas;
        self
    }

    pub fn with_overlap_check_size(mut self, size: Vec3) -> Self {
        self.overlap_check_size = size;
        self
    }

    pub fn with_flags(mut self, flags: QueryFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_max_distance(mut self, distance: f32) -> Self {
        self.max_distance = distance;
        self
    }

    pub fn with_max_distance_from_cover(mut self, distance: f32) -> Self {
        self.max_distance_from_cover = distance;
        self
    }

    pub fn with_response_curve(mut self, curve: ResponseCurve) -> Self {
        self.response_curve = curve;
        self
    }

    pub fn with_nav_sample_radius(mut self, radius: f32) -> Self {
        self.nav_sample_radius = radius;
        self
    }

    /// Heuristic parameters derived from these settings.
    pub fn heuristic_params(&self) -> HeuristicParams {
        HeuristicParams {
            max_distance: self.max_distance,
            max_distance_from_cover: self.max_distance_from_cover,
            response_curve: self.response_curve.clone(),
        }
    }

    /// Score function for `heuristic`, parameterized by these settings.
    pub fn scorer(&self, heuristic: Heuristic) -> HeuristicScorer {
        HeuristicScorer::new(heuristic, self.heuristic_params())
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        validate_grid(self.grid_size, self.grid_spacing)?;
        if !self.overlap_check_size.is_finite() || self.overlap_check_size.min_element() < 0.0 {
            return Err(Error::InvalidConfig(
                "overlap_check_size must be finite and >= 0".into(),
            ));
        }
        if !self.max_distance.is_finite() || self.max_distance <= 0.0 {
            return Err(Error::InvalidConfig(
                "max_distance must be finite and > 0".into(),
            ));
        }
        if !self.max_distance_from_cover.is_finite() || self.max_distance_from_cover <= 0.0 {
            return Err(Error::InvalidConfig(
                "max_distance_from_cover must be finite and > 0".into(),
            ));
        }
        if !self.nav_sample_radius.is_finite() || self.nav_sample_radius < 0.0 {
            return Err(Error::InvalidConfig(
                "nav_sample_radius must be finite and >= 0".into(),
            ));
        }
        self.response_curve.validate()
    }
}
