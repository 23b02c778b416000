use glam::Vec3;
use tactical_query::prelude::*;
use tactical_query_examples::{
    ascii_score_map, init_tracing, pillar_courtyard, render_scores_to_png, ScoreMapStyle,
};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let scene = pillar_courtyard();
    let settings = QuerySettings::default()
        .with_grid(16, 1.0)
        .with_max_distance(12.0)
        .with_max_distance_from_cover(2.0);
    settings.validate()?;

    let query = Query::for_heuristic(
        Vec3::new(1.0, 0.0, -1.0),
        Vec3::new(12.0, 0.0, 4.0),
        settings,
        Heuristic::NearestCover,
    )
    .with_label("rifleman")
    .with_eye_height(1.6);

    let mut runner = QueryRunner::new(&scene);
    runner.run(&query, |samples| {
        println!("{}", ascii_score_map(samples, query.settings.grid_size));
        match best_sample(samples) {
            Some(index) => info!("Best cover at {}:\n{}", index, samples[index]),
            None => info!("No cover found."),
        }
        if let Err(err) = render_scores_to_png(
            samples,
            query.settings.grid_size,
            &ScoreMapStyle::default(),
            "nearest-cover-pillars.png",
        ) {
            tracing::error!("Rendering failed: {err:#}");
        }
    })?;

    Ok(())
}
