//! In-memory reference environment.
//!
//! [`Scene`] models walkable ground as flat rectangles and obstacles as axis-aligned
//! boxes. It is small enough to reason about by hand, which makes it the fixture for
//! tests, benchmarks and the demo binaries. Hosts with a real navmesh and physics
//! engine implement [`NavigationSurface`] and [`PhysicsWorld`] themselves.
use glam::{Vec2, Vec3};

use crate::environment::{
    ColliderId, LayerMask, NavAreaMask, NavigationSurface, OverlapBuffer, PhysicsWorld, RayHit,
};
use crate::error::Result;

/// Flat navigable rectangle on the x/z plane.
#[derive(Clone, Debug, PartialEq)]
pub struct NavRect {
    /// Minimum corner (x, z).
    pub min: Vec2,
    /// Maximum corner (x, z).
    pub max: Vec2,
    /// Ground height of the rectangle.
    pub height: f32,
    /// Area classification index.
    pub area: u8,
}

impl NavRect {
    pub fn new(min: Vec2, max: Vec2, height: f32) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
            height,
            area: 0,
        }
    }

    /// Rectangle centered on `center` (x, z) spanning `half_extent` in both directions.
    pub fn centered(center: Vec2, half_extent: Vec2, height: f32) -> Self {
        Self::new(center - half_extent, center + half_extent, height)
    }

    pub fn with_area(mut self, area: u8) -> Self {
        self.area = area;
        self
    }

    /// Closest point of the rectangle to `point`.
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            point.x.clamp(self.min.x, self.max.x),
            self.height,
            point.z.clamp(self.min.y, self.max.y),
        )
    }
}

/// Axis-aligned box collider.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxCollider {
    pub center: Vec3,
    pub half_extents: Vec3,
    /// Physics layer index.
    pub layer: u8,
    /// Triggers never block overlap or ray tests.
    pub is_trigger: bool,
}

impl BoxCollider {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
            layer: 0,
            is_trigger: false,
        }
    }

    /// Box resting on the ground plane at `height`, with footprint center (x, z).
    pub fn standing(footprint_center: Vec2, half_extents: Vec3, height: f32) -> Self {
        Self::new(
            Vec3::new(
                footprint_center.x,
                height + half_extents.y.abs(),
                footprint_center.y,
            ),
            half_extents,
        )
    }

    pub fn on_layer(mut self, layer: u8) -> Self {
        self.layer = layer;
        self
    }

    pub fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// Interior overlap with another box. Touching faces do not count.
    pub fn overlaps(&self, center: Vec3, half_extents: Vec3) -> bool {
        let gap = (self.center - center).abs();
        let reach = self.half_extents + half_extents.abs();
        gap.cmplt(reach).all()
    }

    /// Distance along the ray at which it enters this box.
    ///
    /// Rays starting inside the box, or pointing away from it, report no entry.
    pub fn ray_entry(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let min = self.min();
        let max = self.max();
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            if d.abs() <= f32::EPSILON {
                if o < min[axis] || o > max[axis] {
                    return None;
                }
                continue;
            }
            let t1 = (min[axis] - o) / d;
            let t2 = (max[axis] - o) / d;
            t_enter = t_enter.max(t1.min(t2));
            t_exit = t_exit.min(t1.max(t2));
            if t_enter > t_exit {
                return None;
            }
        }

        if t_enter < 0.0 || !t_enter.is_finite() {
            return None;
        }
        Some(t_enter)
    }
}

/// Navigable rectangles plus box colliders.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    nav: Vec<NavRect>,
    colliders: Vec<BoxCollider>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single flat navigable square of `half_extent` around the world origin at height 0.
    pub fn flat(half_extent: f32) -> Self {
        Self::new().with_nav_rect(NavRect::centered(
            Vec2::ZERO,
            Vec2::splat(half_extent),
            0.0,
        ))
    }

    pub fn with_nav_rect(mut self, rect: NavRect) -> Self {
        self.nav.push(rect);
        self
    }

    pub fn with_collider(mut self, collider: BoxCollider) -> Self {
        self.colliders.push(collider);
        self
    }

    /// Adds a collider and returns its id.
    pub fn add_collider(&mut self, collider: BoxCollider) -> ColliderId {
        self.colliders.push(collider);
        self.colliders.len() - 1
    }

    pub fn nav_rects(&self) -> &[NavRect] {
        &self.nav
    }

    pub fn colliders(&self) -> &[BoxCollider] {
        &self.colliders
    }

    fn blocking(&self, layers: LayerMask) -> impl Iterator<Item = (ColliderId, &BoxCollider)> {
        self.colliders
            .iter()
            .enumerate()
            .filter(move |(_, c)| !c.is_trigger && layers.contains(c.layer))
    }
}

impl NavigationSurface for Scene {
    fn sample_position(
        &self,
        point: Vec3,
        tolerance: f32,
        areas: NavAreaMask,
    ) -> Result<Option<Vec3>> {
        let best = self
            .nav
            .iter()
            .filter(|rect| areas.contains(rect.area))
            .map(|rect| {
                let snapped = rect.closest_point(point);
                (snapped, snapped.distance(point))
            })
            .filter(|(_, distance)| *distance <= tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(snapped, _)| snapped);
        Ok(best)
    }
}

impl PhysicsWorld for Scene {
    fn overlap_box(
        &self,
        center: Vec3,
        half_extents: Vec3,
        layers: LayerMask,
        results: &mut OverlapBuffer,
    ) -> Result<usize> {
        results.clear();
        for (id, collider) in self.blocking(layers) {
            if collider.overlaps(center, half_extents) && !results.push(id) {
                break;
            }
        }
        Ok(results.len())
    }

    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Result<Option<RayHit>> {
        let hit = self
            .blocking(layers)
            .filter_map(|(id, collider)| {
                collider
                    .ray_entry(origin, direction)
                    .filter(|distance| *distance <= max_distance)
                    .map(|distance| (id, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(collider, distance)| RayHit {
                distance,
                point: origin + direction * distance,
                collider,
            });
        Ok(hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pillar() -> BoxCollider {
        BoxCollider::new(Vec3::new(5.0, 1.0, 0.0), Vec3::new(0.5, 1.0, 0.5))
    }

    #[test]
    fn sample_position_snaps_within_tolerance() {
        let scene = Scene::flat(10.0);
        let snapped = scene
            .sample_position(Vec3::new(1.0, 0.05, 2.0), 0.1, NavAreaMask::ALL)
            .unwrap();
        assert_eq!(snapped, Some(Vec3::new(1.0, 0.0, 2.0)));

        let missed = scene
            .sample_position(Vec3::new(1.0, 0.5, 2.0), 0.1, NavAreaMask::ALL)
            .unwrap();
        assert_eq!(missed, None);
    }

    #[test]
    fn sample_position_respects_area_mask() {
        let scene = Scene::new().with_nav_rect(
            NavRect::centered(Vec2::ZERO, Vec2::splat(5.0), 0.0).with_area(3),
        );
        let p = Vec3::new(0.0, 0.0, 0.0);
        assert!(scene
            .sample_position(p, 0.1, NavAreaMask::area(0))
            .unwrap()
            .is_none());
        assert!(scene
            .sample_position(p, 0.1, NavAreaMask::area(3))
            .unwrap()
            .is_some());
    }

    #[test]
    fn sample_position_reaches_rect_edge() {
        let scene = Scene::flat(1.0);
        let snapped = scene
            .sample_position(Vec3::new(1.05, 0.0, 0.0), 0.1, NavAreaMask::ALL)
            .unwrap();
        assert_eq!(snapped, Some(Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn overlap_ignores_triggers_and_touching_faces() {
        let mut scene = Scene::flat(10.0);
        scene.add_collider(pillar());
        scene.add_collider(
            BoxCollider::new(Vec3::new(0.0, 1.0, 0.0), Vec3::ONE).as_trigger(),
        );
        let mut buffer = OverlapBuffer::default();

        let hits = scene
            .overlap_box(Vec3::new(0.0, 1.0, 0.0), Vec3::splat(0.5), LayerMask::ALL, &mut buffer)
            .unwrap();
        assert_eq!(hits, 0);

        let hits = scene
            .overlap_box(Vec3::new(4.0, 1.0, 0.0), Vec3::splat(0.5), LayerMask::ALL, &mut buffer)
            .unwrap();
        assert_eq!(hits, 0, "faces touching at x = 4.5");

        let hits = scene
            .overlap_box(Vec3::new(4.2, 1.0, 0.0), Vec3::splat(0.5), LayerMask::ALL, &mut buffer)
            .unwrap();
        assert_eq!(hits, 1);
        assert_eq!(buffer.hits(), &[0]);
    }

    #[test]
    fn overlap_respects_layer_mask() {
        let scene = Scene::flat(10.0).with_collider(pillar().on_layer(4));
        let mut buffer = OverlapBuffer::default();
        let center = Vec3::new(5.0, 1.0, 0.0);
        assert_eq!(
            scene
                .overlap_box(center, Vec3::splat(0.5), LayerMask::layer(1), &mut buffer)
                .unwrap(),
            0
        );
        assert_eq!(
            scene
                .overlap_box(center, Vec3::splat(0.5), LayerMask::layer(4), &mut buffer)
                .unwrap(),
            1
        );
    }

    #[test]
    fn raycast_reports_entry_distance() {
        let scene = Scene::flat(10.0).with_collider(pillar());
        let hit = scene
            .raycast(Vec3::new(0.0, 0.5, 0.0), Vec3::X, 10.0, LayerMask::ALL)
            .unwrap()
            .expect("pillar hit");
        assert!((hit.distance - 4.5).abs() < 1e-5);
        assert_eq!(hit.collider, 0);

        assert!(scene
            .raycast(Vec3::new(0.0, 0.5, 0.0), Vec3::X, 4.0, LayerMask::ALL)
            .unwrap()
            .is_none());
        assert!(scene
            .raycast(Vec3::new(0.0, 0.5, 0.0), -Vec3::X, 10.0, LayerMask::ALL)
            .unwrap()
            .is_none());
        assert!(scene
            .raycast(Vec3::new(0.0, 2.5, 0.0), Vec3::X, 10.0, LayerMask::ALL)
            .unwrap()
            .is_none());
    }

    #[test]
    fn raycast_ignores_triggers() {
        let scene = Scene::flat(10.0).with_collider(pillar().as_trigger());
        assert!(scene
            .raycast(Vec3::new(0.0, 0.5, 0.0), Vec3::X, 10.0, LayerMask::ALL)
            .unwrap()
            .is_none());
        assert!(!scene
            .linecast(
                Vec3::new(0.0, 0.5, 0.0),
                Vec3::new(10.0, 0.5, 0.0),
                LayerMask::ALL
            )
            .unwrap());
    }

    #[test]
    fn raycast_from_inside_collider_is_ignored() {
        let scene = Scene::flat(10.0).with_collider(pillar());
        assert!(scene
            .raycast(Vec3::new(5.0, 0.5, 0.0), Vec3::X, 10.0, LayerMask::ALL)
            .unwrap()
            .is_none());
    }

    #[test]
    fn raycast_picks_closest_collider() {
        let scene = Scene::flat(10.0)
            .with_collider(pillar())
            .with_collider(BoxCollider::new(Vec3::new(2.0, 1.0, 0.0), Vec3::splat(0.5)));
        let hit = scene
            .raycast(Vec3::new(0.0, 0.5, 0.0), Vec3::X, 10.0, LayerMask::ALL)
            .unwrap()
            .unwrap();
        assert_eq!(hit.collider, 1);
        assert!((hit.distance - 1.5).abs() < 1e-5);
    }

    #[test]
    fn standing_box_rests_on_ground() {
        let b = BoxCollider::standing(Vec2::new(1.0, 2.0), Vec3::new(0.5, 1.0, 0.5), 0.0);
        assert_eq!(b.center, Vec3::new(1.0, 1.0, 2.0));
        assert_eq!(b.min().y, 0.0);
    }
}
