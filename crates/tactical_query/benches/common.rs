use std::time::Duration;

use criterion::{Criterion, Throughput};
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tactical_query::environment::scene::{BoxCollider, Scene};

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

#[allow(dead_code)]
fn rand01(rng: &mut StdRng) -> f32 {
    (rng.next_u32() >> 8) as f32 / (1u32 << 24) as f32
}

/// Flat square arena with `pillars` randomly placed standing boxes.
#[allow(dead_code)]
pub fn arena(half_extent: f32, pillars: usize, seed: u64) -> Scene {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scene = Scene::flat(half_extent);
    for _ in 0..pillars {
        let x = (rand01(&mut rng) * 2.0 - 1.0) * half_extent;
        let z = (rand01(&mut rng) * 2.0 - 1.0) * half_extent;
        let half = Vec3::new(0.3 + rand01(&mut rng), 1.0, 0.3 + rand01(&mut rng));
        scene.add_collider(BoxCollider::standing(Vec2::new(x, z), half, 0.0));
    }
    scene
}
