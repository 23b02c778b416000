//! Query orchestration: grid, validate every cell, score every valid cell, deliver.
//!
//! The result array lives for exactly one call. [`run_query`] lends it to the
//! continuation and drops it afterwards; [`evaluate`] hands ownership to the caller instead.
use glam::Vec3;
use tracing::{debug, trace, warn};

use crate::environment::{Environment, OverlapBuffer};
use crate::error::Result;
use crate::grid::SampleGrid;
use crate::query::events::{EventSink, QueryEvent, QueryEventKind};
use crate::query::scoring::score_samples;
use crate::query::selection::QuerySummary;
use crate::query::validator::evaluate_point;
use crate::query::{Query, SamplePoint};

/// Runs `query` synchronously and lends the results to `on_complete`.
///
/// `on_complete` is called exactly once on success and never on error. Environment
/// failures abort the query and are returned unchanged.
pub fn run_query<E, F>(
    query: &Query,
    env: &E,
    scratch: &mut OverlapBuffer,
    on_complete: F,
) -> Result<()>
where
    E: Environment + ?Sized,
    F: FnOnce(&[SamplePoint]),
{
    let samples = execute(query, env, scratch, &mut ())?;
    on_complete(&samples);
    Ok(())
}

/// Like [`run_query`], reporting progress to `sink`.
pub fn run_query_with_events<E, F>(
    query: &Query,
    env: &E,
    scratch: &mut OverlapBuffer,
    sink: &mut dyn EventSink,
    on_complete: F,
) -> Result<()>
where
    E: Environment + ?Sized,
    F: FnOnce(&[SamplePoint]),
{
    let samples = execute(query, env, scratch, sink)?;
    on_complete(&samples);
    Ok(())
}

/// Runs `query` and returns the scored result array.
pub fn evaluate<E>(query: &Query, env: &E, scratch: &mut OverlapBuffer) -> Result<Vec<SamplePoint>>
where
    E: Environment + ?Sized,
{
    execute(query, env, scratch, &mut ())
}

fn execute<E>(
    query: &Query,
    env: &E,
    scratch: &mut OverlapBuffer,
    sink: &mut dyn EventSink,
) -> Result<Vec<SamplePoint>>
where
    E: Environment + ?Sized,
{
    query.validate()?;
    let settings = &query.settings;
    let grid = SampleGrid::try_new(query.origin, settings.grid_size, settings.grid_spacing)?;

    debug!(
        "Query '{}': {}x{} grid at {} (spacing {}).",
        query.name(),
        grid.size,
        grid.size,
        grid.center,
        grid.spacing
    );
    if sink.wants(QueryEventKind::QueryStarted) {
        sink.send(QueryEvent::QueryStarted {
            label: query.name().to_string(),
            center: grid.center,
            grid_size: grid.size,
            spacing: grid.spacing,
        });
    }

    let candidates = grid.positions();
    let mut samples = validate_all(query, env, scratch, &candidates, sink)?;
    score_samples(query, &mut samples);

    if sink.wants(QueryEventKind::SampleScored) {
        for (index, sample) in samples.iter().enumerate().filter(|(_, s)| s.is_valid) {
            sink.send(QueryEvent::SampleScored {
                index,
                sample: *sample,
            });
        }
    }

    let summary = QuerySummary::from_samples(&samples);
    if summary.valid == 0 {
        warn!(
            "Query '{}': none of {} samples is valid.",
            query.name(),
            summary.total
        );
        if sink.wants(QueryEventKind::Warning) {
            sink.send(QueryEvent::Warning {
                context: query.name().to_string(),
                message: format!("none of {} samples is valid", summary.total),
            });
        }
    }

    debug!(
        "Query '{}': {} valid, {} invalid, {} scored, best {:?}.",
        query.name(),
        summary.valid,
        summary.invalid,
        summary.scored,
        summary.best_index
    );
    if sink.wants(QueryEventKind::QueryFinished) {
        sink.send(QueryEvent::QueryFinished {
            label: query.name().to_string(),
            summary,
        });
    }

    Ok(samples)
}

/// Validates every candidate in index order. Scoring must not start before this returns.
fn validate_all<E>(
    query: &Query,
    env: &E,
    scratch: &mut OverlapBuffer,
    candidates: &[Vec3],
    sink: &mut dyn EventSink,
) -> Result<Vec<SamplePoint>>
where
    E: Environment + ?Sized,
{
    let report = sink.wants(QueryEventKind::SampleEvaluated);
    let mut samples = Vec::with_capacity(candidates.len());

    for (index, &candidate) in candidates.iter().enumerate() {
        let outcome = evaluate_point(query, env, candidate, scratch)?;
        if let Some(rejection) = outcome.rejection {
            trace!(
                "Query '{}': sample {} at {} rejected: {:?}.",
                query.name(),
                index,
                candidate,
                rejection
            );
        }
        if report {
            sink.send(QueryEvent::SampleEvaluated {
                index,
                candidate,
                rejection: outcome.rejection,
            });
        }
        samples.push(outcome.sample);
    }

    Ok(samples)
}

/// Environment reference bundled with its own overlap scratch buffer.
pub struct QueryRunner<'a, E: Environment + ?Sized> {
    /// Navigation and physics provider queried by every run.
    pub env: &'a E,
    scratch: OverlapBuffer,
}

impl<'a, E: Environment + ?Sized> QueryRunner<'a, E> {
    pub fn new(env: &'a E) -> Self {
        Self {
            env,
            scratch: OverlapBuffer::default(),
        }
    }

    pub fn with_scratch(env: &'a E, scratch: OverlapBuffer) -> Self {
        Self { env, scratch }
    }

    /// Runs the query, lending the results to `on_complete`.
    pub fn run<F>(&mut self, query: &Query, on_complete: F) -> Result<()>
    where
        F: FnOnce(&[SamplePoint]),
    {
        run_query(query, self.env, &mut self.scratch, on_complete)
    }

    pub fn run_with_events<F>(
        &mut self,
        query: &Query,
        sink: &mut dyn EventSink,
        on_complete: F,
    ) -> Result<()>
    where
        F: FnOnce(&[SamplePoint]),
    {
        run_query_with_events(query, self.env, &mut self.scratch, sink, on_complete)
    }

    pub fn evaluate(&mut self, query: &Query) -> Result<Vec<SamplePoint>> {
        evaluate(query, self.env, &mut self.scratch)
    }
}
