//! Collaborator interfaces implemented by the host engine.
//!
//! The query pipeline never inspects level geometry directly. It asks a
//! [`NavigationSurface`] to snap candidates onto walkable ground and a [`PhysicsWorld`]
//! for overlap and ray tests. Any type implementing both is an [`Environment`].
//!
//! Provider methods return [`Result`] so that an unavailable environment (unloaded
//! scene, missing navmesh) propagates to the caller instead of being masked as an
//! invalid sample.
use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub mod scene;

/// Default number of overlap results an [`OverlapBuffer`] can hold.
pub const DEFAULT_OVERLAP_CAPACITY: usize = 32;

/// Bit mask over physics layers (layer indices 0..32).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(u32::MAX);

    /// Mask containing only the given layer.
    pub const fn layer(index: u8) -> Self {
        Self(1u32 << (index as u32 % 32))
    }

    /// Mask containing every listed layer.
    pub fn from_layers(layers: &[u8]) -> Self {
        layers
            .iter()
            .fold(Self::NONE, |mask, &l| Self(mask.0 | Self::layer(l).0))
    }

    /// Whether `index` is part of this mask.
    #[inline]
    pub const fn contains(self, index: u8) -> bool {
        self.0 & Self::layer(index).0 != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Bit mask over navigable area classifications (area indices 0..32).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NavAreaMask(pub u32);

impl NavAreaMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(u32::MAX);

    /// Mask containing only the given area.
    pub const fn area(index: u8) -> Self {
        Self(1u32 << (index as u32 % 32))
    }

    #[inline]
    pub const fn contains(self, index: u8) -> bool {
        self.0 & Self::area(index).0 != 0
    }
}

impl Default for NavAreaMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Opaque handle for a collider reported by an overlap test.
pub type ColliderId = usize;

/// Result of a blocking raycast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
    /// Collider that was hit.
    pub collider: ColliderId,
}

/// Fixed-capacity, caller-owned buffer receiving overlap results.
///
/// Allocated once and reused across validator calls. Each worker that validates
/// samples needs its own buffer.
#[derive(Debug, Clone)]
pub struct OverlapBuffer {
    hits: Vec<ColliderId>,
    capacity: usize,
}

impl OverlapBuffer {
    /// Creates a buffer holding up to `capacity` results.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidConfig(
                "overlap buffer capacity must be > 0".into(),
            ));
        }
        Ok(Self {
            hits: Vec::with_capacity(capacity),
            capacity,
        })
    }

    /// Maximum number of results recorded per overlap test.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Colliders recorded by the most recent overlap test.
    pub fn hits(&self) -> &[ColliderId] {
        &self.hits
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Forgets previous results without releasing storage.
    pub fn clear(&mut self) {
        self.hits.clear();
    }

    /// Records a hit. Returns `false` once the buffer is full; further hits are dropped.
    pub fn push(&mut self, collider: ColliderId) -> bool {
        if self.hits.len() >= self.capacity {
            return false;
        }
        self.hits.push(collider);
        true
    }
}

impl Default for OverlapBuffer {
    fn default() -> Self {
        Self {
            hits: Vec::with_capacity(DEFAULT_OVERLAP_CAPACITY),
            capacity: DEFAULT_OVERLAP_CAPACITY,
        }
    }
}

/// Resolves points onto walkable ground.
pub trait NavigationSurface {
    /// Finds the closest navigable position within `tolerance` of `point` whose area
    /// classification is in `areas`. `Ok(None)` means nothing navigable is nearby.
    fn sample_position(&self, point: Vec3, tolerance: f32, areas: NavAreaMask)
        -> Result<Option<Vec3>>;
}

/// Overlap and ray queries against physical colliders. Trigger volumes are ignored.
pub trait PhysicsWorld {
    /// Clears `results`, then records colliders on `layers` overlapping the axis-aligned
    /// box. Returns the number of recorded hits, never more than `results.capacity()`.
    fn overlap_box(
        &self,
        center: Vec3,
        half_extents: Vec3,
        layers: LayerMask,
        results: &mut OverlapBuffer,
    ) -> Result<usize>;

    /// Casts a ray along the normalized `direction` and returns the closest hit within
    /// `max_distance` on `layers`.
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Result<Option<RayHit>>;

    /// Whether anything on `layers` blocks the segment from `start` to `end`.
    fn linecast(&self, start: Vec3, end: Vec3, layers: LayerMask) -> Result<bool> {
        let delta = end - start;
        let length = delta.length();
        if length <= f32::EPSILON {
            return Ok(false);
        }
        Ok(self.raycast(start, delta / length, length, layers)?.is_some())
    }
}

/// Everything a query needs from the host engine.
pub trait Environment: NavigationSurface + PhysicsWorld {}

impl<T: NavigationSurface + PhysicsWorld + ?Sized> Environment for T {}
