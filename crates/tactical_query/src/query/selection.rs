//! Helpers for consuming a query's result array.
//!
//! Only valid samples are ever selected. Scores are compared with `total_cmp`, and ties
//! keep the lower cell index so that picks are stable across runs.
use std::cmp::Ordering;

use crate::query::SamplePoint;

/// Index of the highest-scoring valid sample. The first index wins ties.
pub fn best_sample(samples: &[SamplePoint]) -> Option<usize> {
    samples
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_valid)
        .fold(None, |best: Option<(usize, f32)>, (i, s)| match best {
            Some((_, score)) if s.score.total_cmp(&score) != Ordering::Greater => best,
            _ => Some((i, s.score)),
        })
        .map(|(i, _)| i)
}

/// Indices of valid samples ordered by descending score. Equal scores keep index order.
pub fn ranked_indices(samples: &[SamplePoint]) -> Vec<usize> {
    let mut ranked: Vec<usize> = samples
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_valid)
        .map(|(i, _)| i)
        .collect();
    ranked.sort_by(|&a, &b| samples[b].score.total_cmp(&samples[a].score));
    ranked
}

/// Counts over a result array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuerySummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    /// Valid samples with a score above 0.
    pub scored: usize,
    pub best_index: Option<usize>,
}

impl QuerySummary {
    pub fn from_samples(samples: &[SamplePoint]) -> Self {
        let valid = samples.iter().filter(|s| s.is_valid).count();
        let scored = samples
            .iter()
            .filter(|s| s.is_valid && s.score > 0.0)
            .count();
        Self {
            total: samples.len(),
            valid,
            invalid: samples.len() - valid,
            scored,
            best_index: best_sample(samples),
        }
    }
}
