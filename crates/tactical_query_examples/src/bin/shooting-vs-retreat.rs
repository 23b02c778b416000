use glam::Vec3;
use tactical_query::prelude::*;
use tactical_query_examples::{ascii_score_map, init_tracing, random_arena};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let scene = random_arena(20.0, 40, 42);
    let origin = Vec3::new(-3.0, 0.0, 2.0);
    let target = Vec3::new(9.0, 0.0, -5.0);
    let settings = QuerySettings::default()
        .with_grid(12, 1.5)
        .with_response_curve(ResponseCurve::SmoothStep {
            edge0: 0.1,
            edge1: 0.9,
        });

    let mut runner = QueryRunner::new(&scene);
    for heuristic in [Heuristic::ShootingPosition, Heuristic::RetreatPosition] {
        let query = Query::for_heuristic(origin, target, settings.clone(), heuristic)
            .with_label(format!("{heuristic:?}"))
            .with_eye_height(1.6);
        let samples = runner.evaluate(&query)?;
        let summary = QuerySummary::from_samples(&samples);

        println!("{heuristic:?}");
        println!("{}", ascii_score_map(&samples, settings.grid_size));
        info!(
            "{:?}: {} valid, {} scored, top 3: {:?}.",
            heuristic,
            summary.valid,
            summary.scored,
            &ranked_indices(&samples)[..summary.valid.min(3)]
        );
    }

    Ok(())
}
