use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tactical_query::prelude::*;

/// Flat 30x30 courtyard with a ring of pillars and one long wall.
pub fn pillar_courtyard() -> Scene {
    let mut scene = Scene::flat(15.0);
    let pillar = Vec3::new(0.5, 1.25, 0.5);
    for i in 0..6 {
        let angle = i as f32 * std::f32::consts::TAU / 6.0;
        let at = Vec2::new(angle.cos(), angle.sin()) * 6.0;
        scene.add_collider(BoxCollider::standing(at, pillar, 0.0));
    }
    scene.add_collider(BoxCollider::standing(
        Vec2::new(-9.0, 0.0),
        Vec3::new(0.25, 1.0, 5.0),
        0.0,
    ));
    scene
}

/// Flat arena with `count` randomly sized crates.
pub fn random_arena(half_extent: f32, count: usize, seed: u64) -> Scene {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rand01 = move || (rng.next_u32() >> 8) as f32 / (1u32 << 24) as f32;

    let mut scene = Scene::flat(half_extent);
    for _ in 0..count {
        let at = Vec2::new(rand01() * 2.0 - 1.0, rand01() * 2.0 - 1.0) * half_extent;
        let half = Vec3::new(0.4 + rand01() * 0.8, 0.5 + rand01(), 0.4 + rand01() * 0.8);
        scene.add_collider(BoxCollider::standing(at, half, 0.0));
    }
    scene
}
