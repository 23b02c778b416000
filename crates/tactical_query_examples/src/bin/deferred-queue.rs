use std::sync::{Arc, Mutex};

use glam::Vec3;
use tactical_query::prelude::*;
use tactical_query_examples::{init_tracing, random_arena};
use tracing::info;

/// Simulates a host loop draining one query per tick.
fn main() -> anyhow::Result<()> {
    init_tracing();

    let scene = random_arena(25.0, 60, 7);
    let target = Vec3::new(0.0, 0.0, 0.0);
    let picks: Arc<Mutex<Vec<(String, Option<Vec3>)>>> = Arc::default();

    let mut queue = QueryQueue::with_capacity_limit(4)?;
    let squad = [
        ("alpha", Vec3::new(-12.0, 0.0, 3.0)),
        ("bravo", Vec3::new(10.0, 0.0, 8.0)),
        ("charlie", Vec3::new(4.0, 0.0, -14.0)),
        ("delta", Vec3::new(-6.0, 0.0, -9.0)),
        ("echo", Vec3::new(15.0, 0.0, -2.0)),
    ];

    for (name, origin) in squad {
        let query = Query::for_heuristic(
            origin,
            target,
            QuerySettings::default().with_grid(10, 1.0),
            Heuristic::NearestCover,
        )
        .with_label(name)
        .with_eye_height(1.7);

        let picks = Arc::clone(&picks);
        let label = name.to_string();
        let queued = queue.enqueue(query, move |samples: &[SamplePoint]| {
            let point = best_sample(samples).map(|i| samples[i].point);
            if let Ok(mut picks) = picks.lock() {
                picks.push((label, point));
            }
        });
        if let Err(err) = queued {
            info!("{name} waits for the next round: {err}.");
        }
    }

    let mut scratch = OverlapBuffer::default();
    let mut tick = 0;
    while !queue.is_empty() {
        tick += 1;
        queue.drain_one(&scene, &mut scratch)?;
        info!("Tick {tick}: {} queries pending.", queue.len());
    }

    let picks = picks.lock().map_err(|_| anyhow::anyhow!("picks lock poisoned"))?;
    for (name, point) in picks.iter() {
        match point {
            Some(p) => println!("{name:>8}: cover at ({:.1}, {:.1})", p.x, p.z),
            None => println!("{name:>8}: no cover"),
        }
    }
    Ok(())
}
