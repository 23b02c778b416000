//! Scoring stage.
//!
//! Runs after every cell of a query has been validated. Scores are written in index
//! order into the same array the score function reads from, so a score function may
//! inspect any sample's geometry and flags but must not depend on other samples'
//! `score` fields: cells after the current index are still unscored.
use tracing::warn;

use crate::query::{Query, SamplePoint};

/// Heuristic turning a validated sample into a rankable scalar.
///
/// Implemented for any `Fn(&Query, usize, &SamplePoint, &[SamplePoint]) -> f32`.
pub trait ScoreFunction: Send + Sync {
    /// Scores the valid sample at `index`. `samples` is the full result array.
    fn score(&self, query: &Query, index: usize, sample: &SamplePoint, samples: &[SamplePoint])
        -> f32;
}

impl<F> ScoreFunction for F
where
    F: Fn(&Query, usize, &SamplePoint, &[SamplePoint]) -> f32 + Send + Sync,
{
    #[inline]
    fn score(
        &self,
        query: &Query,
        index: usize,
        sample: &SamplePoint,
        samples: &[SamplePoint],
    ) -> f32 {
        self(query, index, sample, samples)
    }
}

/// Scores every valid sample with the query's own score function.
///
/// Returns the number of samples scored.
pub fn score_samples(query: &Query, samples: &mut [SamplePoint]) -> usize {
    score_samples_with(query, query.scorer.as_ref(), samples)
}

/// Scores every valid sample with `scorer`, in index order.
///
/// Invalid samples are skipped and forced to a score of 0. A `NaN` score is not
/// rankable and is replaced by 0.
pub fn score_samples_with(
    query: &Query,
    scorer: &dyn ScoreFunction,
    samples: &mut [SamplePoint],
) -> usize {
    let mut scored = 0;
    let mut rejected_nan = 0;

    for index in 0..samples.len() {
        if !samples[index].is_valid {
            samples[index].score = 0.0;
            continue;
        }

        let mut score = scorer.score(query, index, &samples[index], samples);
        if score.is_nan() {
            rejected_nan += 1;
            score = 0.0;
        }
        samples[index].score = score;
        scored += 1;
    }

    if rejected_nan > 0 {
        warn!(
            "Query '{}': score function returned NaN for {} samples; scored as 0.",
            query.name(),
            rejected_nan
        );
    }

    scored
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use glam::Vec3;

    use super::*;
    use crate::settings::QuerySettings;

    fn samples(valid: &[bool]) -> Vec<SamplePoint> {
        valid
            .iter()
            .enumerate()
            .map(|(i, &v)| SamplePoint {
                is_valid: v,
                is_clear: v,
                distance_to_origin: i as f32,
                ..SamplePoint::default()
            })
            .collect()
    }

    fn query(scorer: impl ScoreFunction + 'static) -> Query {
        Query::new(
            Vec3::ZERO,
            Vec3::X,
            QuerySettings::default().with_grid(2, 1.0),
            scorer,
        )
    }

    #[test]
    fn only_valid_samples_reach_the_score_function() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let q = query(
            move |_: &Query, index: usize, sample: &SamplePoint, _: &[SamplePoint]| {
                assert!(sample.is_valid);
                seen.fetch_add(1, Ordering::SeqCst);
                index as f32 + 1.0
            },
        );

        let mut points = samples(&[true, false, true, false]);
        points[1].score = 9.0;
        let scored = score_samples(&q, &mut points);

        assert_eq!(scored, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        let scores: Vec<_> = points.iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![1.0, 0.0, 3.0, 0.0]);
    }

    #[test]
    fn later_samples_are_unscored_during_the_pass() {
        let q = query(
            |_: &Query, index: usize, _: &SamplePoint, all: &[SamplePoint]| {
                let later_scored = all[index + 1..].iter().any(|s| s.score != 0.0);
                assert!(!later_scored);
                1.0f32
            },
        );
        let mut points = samples(&[true, true, true, true]);
        score_samples(&q, &mut points);
        assert!(points.iter().all(|s| s.score == 1.0));
    }

    #[test]
    fn nan_scores_become_zero() {
        let q = query(|_: &Query, _: usize, _: &SamplePoint, _: &[SamplePoint]| f32::NAN);
        let mut points = samples(&[true, true, false, false]);
        score_samples(&q, &mut points);
        assert!(points.iter().all(|s| s.score == 0.0));
    }

    #[test]
    fn explicit_scorer_overrides_query_scorer() {
        let q = query(|_: &Query, _: usize, _: &SamplePoint, _: &[SamplePoint]| 1.0f32);
        let other = |_: &Query, _: usize, s: &SamplePoint, _: &[SamplePoint]| s.distance_to_origin;
        let mut points = samples(&[true, true, true, true]);
        score_samples_with(&q, &other, &mut points);
        let scores: Vec<_> = points.iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![0.0, 1.0, 2.0, 3.0]);
    }
}
