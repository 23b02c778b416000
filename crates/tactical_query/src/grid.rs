//! Sample grid construction and neighbor lookup.
//!
//! A [`SampleGrid`] is a square lattice of `size x size` candidate positions centered on
//! a query origin. The origin is first snapped to a world-aligned lattice of the same
//! spacing, so nearby queries reuse identical candidate positions.
//!
//! Cells are linearized row-major: the outer loop walks the world X axis (rows), the inner
//! loop walks the world Z axis (columns), and `index = row * size + col`. Neighbor lookups
//! in the scoring stage are derived purely from that index.
use glam::Vec3;

use crate::error::{Error, Result};

/// Offsets (column, row) of the eight neighbors, in lookup order.
static NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Snaps the horizontal components of `position` to the nearest multiple of `spacing`.
/// The height is preserved.
pub fn snap_to_world_grid(position: Vec3, spacing: f32) -> Vec3 {
    debug_assert!(spacing > 0.0, "spacing must be > 0");
    Vec3::new(
        (position.x / spacing).round() * spacing,
        position.y,
        (position.z / spacing).round() * spacing,
    )
}

/// Checks grid dimensions: `size` must be even and at least 2, `spacing` finite and > 0.
pub fn validate_grid(size: usize, spacing: f32) -> Result<()> {
    if size < 2 {
        return Err(Error::InvalidConfig("grid size must be >= 2".into()));
    }
    if size % 2 != 0 {
        return Err(Error::InvalidConfig(format!(
            "grid size must be even, got {size}"
        )));
    }
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(Error::InvalidConfig(
            "grid spacing must be finite and > 0".into(),
        ));
    }
    Ok(())
}

/// Indices of the in-bounds 8-neighborhood of `index` in a `width x height` grid.
///
/// Offsets that fall outside the grid are dropped, never wrapped or clamped.
pub fn neighbor_indices(index: usize, width: usize, height: usize) -> impl Iterator<Item = usize> {
    let col = (index % width.max(1)) as isize;
    let row = (index / width.max(1)) as isize;
    let (w, h) = (width as isize, height as isize);

    NEIGHBOR_OFFSETS.iter().filter_map(move |&(dc, dr)| {
        let c = col + dc;
        let r = row + dr;
        (c >= 0 && c < w && r >= 0 && r < h).then(|| (r * w + c) as usize)
    })
}

/// Square lattice of candidate positions around a snapped center.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleGrid {
    /// Snapped world-space center of the lattice.
    pub center: Vec3,
    /// Cells per side.
    pub size: usize,
    /// World units between adjacent cells.
    pub spacing: f32,
}

impl SampleGrid {
    /// Validates the dimensions and snaps `origin` onto the world lattice.
    pub fn try_new(origin: Vec3, size: usize, spacing: f32) -> Result<Self> {
        validate_grid(size, spacing)?;
        Ok(Self::new(origin, size, spacing))
    }

    pub fn new(origin: Vec3, size: usize, spacing: f32) -> Self {
        debug_assert!(validate_grid(size, spacing).is_ok(), "invalid grid dimensions");
        Self {
            center: snap_to_world_grid(origin, spacing),
            size,
            spacing,
        }
    }

    /// Total number of cells (`size * size`).
    pub fn len(&self) -> usize {
        self.size * self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Linear index of a cell, if in bounds.
    pub fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.size && col < self.size).then(|| row * self.size + col)
    }

    /// `(row, col)` of a linear index.
    pub fn cell_of(&self, index: usize) -> (usize, usize) {
        (index / self.size, index % self.size)
    }

    /// World position of a cell before any surface snapping.
    pub fn position(&self, row: usize, col: usize) -> Vec3 {
        let half = (self.size / 2) as f32;
        self.center
            + Vec3::new(
                (row as f32 - half) * self.spacing,
                0.0,
                (col as f32 - half) * self.spacing,
            )
    }

    /// All candidate positions in index order.
    pub fn positions(&self) -> Vec<Vec3> {
        let mut points = Vec::with_capacity(self.len());
        for row in 0..self.size {
            for col in 0..self.size {
                points.push(self.position(row, col));
            }
        }
        points
    }

    /// In-bounds neighbors of `index`.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> {
        neighbor_indices(index, self.size, self.size)
    }
}
