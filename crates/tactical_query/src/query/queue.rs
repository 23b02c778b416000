//! Deferred query execution.
//!
//! Callers that must not pay for a query synchronously enqueue it together with its
//! continuation; the host then calls [`QueryQueue::drain_one`] once per tick. Queries run
//! in FIFO order and cannot be cancelled: a query whose requester has gone away still runs,
//! and its continuation has to cope with that.
use std::collections::VecDeque;
use std::fmt;

use tracing::{debug, warn};

use crate::environment::{Environment, OverlapBuffer};
use crate::error::{Error, Result};
use crate::query::runner::run_query;
use crate::query::{Query, SamplePoint};

/// Continuation receiving a deferred query's results.
pub type QueryCallback = Box<dyn FnOnce(&[SamplePoint]) + Send>;

/// FIFO of pending queries with an optional capacity bound.
#[derive(Default)]
pub struct QueryQueue {
    pending: VecDeque<(Query, QueryCallback)>,
    capacity: Option<usize>,
}

impl QueryQueue {
    /// Creates an unbounded queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a queue holding at most `capacity` pending queries.
    pub fn with_capacity_limit(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidConfig("queue capacity must be > 0".into()));
        }
        Ok(Self {
            pending: VecDeque::with_capacity(capacity),
            capacity: Some(capacity),
        })
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Queues `query`; `on_complete` runs when the query is drained.
    ///
    /// Fails with [`Error::QueueFull`] when the bound is reached; nothing is queued then.
    pub fn enqueue<F>(&mut self, query: Query, on_complete: F) -> Result<()>
    where
        F: FnOnce(&[SamplePoint]) + Send + 'static,
    {
        if let Some(capacity) = self.capacity {
            if self.pending.len() >= capacity {
                warn!(
                    "Query '{}' dropped: queue is full ({} pending).",
                    query.name(),
                    capacity
                );
                return Err(Error::QueueFull { capacity });
            }
        }
        debug!(
            "Query '{}' queued ({} ahead).",
            query.name(),
            self.pending.len()
        );
        self.pending.push_back((query, Box::new(on_complete)));
        Ok(())
    }

    /// Runs the oldest pending query, if any. Returns whether a query was run.
    ///
    /// A failing query is removed from the queue and its continuation is dropped uncalled.
    pub fn drain_one<E>(&mut self, env: &E, scratch: &mut OverlapBuffer) -> Result<bool>
    where
        E: Environment + ?Sized,
    {
        let Some((query, on_complete)) = self.pending.pop_front() else {
            return Ok(false);
        };
        if let Err(err) = run_query(&query, env, scratch, on_complete) {
            warn!("Query '{}' failed: {}.", query.name(), err);
            return Err(err);
        }
        Ok(true)
    }

    /// Runs pending queries until the queue is empty or one fails.
    ///
    /// Returns the number of queries completed. Queries behind a failing one stay queued.
    pub fn drain_all<E>(&mut self, env: &E, scratch: &mut OverlapBuffer) -> Result<usize>
    where
        E: Environment + ?Sized,
    {
        let mut completed = 0;
        while self.drain_one(env, scratch)? {
            completed += 1;
        }
        Ok(completed)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl fmt::Debug for QueryQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryQueue")
            .field("pending", &self.pending.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use glam::Vec3;

    use super::*;
    use crate::environment::scene::Scene;
    use crate::heuristics::Heuristic;
    use crate::settings::QuerySettings;

    fn query(label: &str, origin: Vec3) -> Query {
        Query::for_heuristic(
            origin,
            Vec3::new(10.0, 0.0, 0.0),
            QuerySettings::default().with_grid(2, 1.0),
            Heuristic::ShootingPosition,
        )
        .with_label(label)
    }

    type Log = Arc<Mutex<Vec<(String, usize)>>>;

    fn recorder(log: &Log, label: &str) -> impl FnOnce(&[SamplePoint]) + Send + 'static {
        let log = Arc::clone(log);
        let label = label.to_string();
        move |samples: &[SamplePoint]| {
            if let Ok(mut log) = log.lock() {
                log.push((label, samples.len()));
            }
        }
    }

    #[test]
    fn drains_one_query_per_call_in_fifo_order() {
        let scene = Scene::flat(20.0);
        let mut scratch = OverlapBuffer::default();
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut queue = QueryQueue::new();

        queue.enqueue(query("a", Vec3::ZERO), recorder(&log, "a")).unwrap();
        queue.enqueue(query("b", Vec3::X), recorder(&log, "b")).unwrap();
        assert_eq!(queue.len(), 2);

        assert!(queue.drain_one(&scene, &mut scratch).unwrap());
        assert_eq!(queue.len(), 1);
        assert_eq!(log.lock().unwrap().as_slice(), &[("a".to_string(), 4)]);

        assert!(queue.drain_one(&scene, &mut scratch).unwrap());
        assert!(!queue.drain_one(&scene, &mut scratch).unwrap());
        assert!(queue.is_empty());

        let labels: Vec<_> = log.lock().unwrap().iter().map(|(l, _)| l.clone()).collect();
        assert_eq!(labels, vec!["a", "b"]);
    }

    #[test]
    fn drain_all_runs_everything() {
        let scene = Scene::flat(20.0);
        let mut scratch = OverlapBuffer::default();
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut queue = QueryQueue::new();
        for label in ["a", "b", "c"] {
            queue.enqueue(query(label, Vec3::ZERO), recorder(&log, label)).unwrap();
        }

        assert_eq!(queue.drain_all(&scene, &mut scratch).unwrap(), 3);
        assert!(queue.is_empty());
        assert_eq!(log.lock().unwrap().len(), 3);
    }

    #[test]
    fn bounded_queue_rejects_overflow() {
        let mut queue = QueryQueue::with_capacity_limit(1).unwrap();
        assert_eq!(queue.capacity(), Some(1));
        queue.enqueue(query("a", Vec3::ZERO), |_: &[SamplePoint]| {}).unwrap();
        let err = queue
            .enqueue(query("b", Vec3::ZERO), |_: &[SamplePoint]| {})
            .unwrap_err();
        assert!(matches!(err, Error::QueueFull { capacity: 1 }));
        assert_eq!(queue.len(), 1);
        assert!(QueryQueue::with_capacity_limit(0).is_err());
    }

    #[test]
    fn failing_query_is_removed_and_rest_stay_queued() {
        let scene = Scene::flat(20.0);
        let mut scratch = OverlapBuffer::default();
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut queue = QueryQueue::new();

        let mut broken = query("broken", Vec3::ZERO);
        broken.settings.grid_size = 3;
        queue.enqueue(broken, recorder(&log, "broken")).unwrap();
        queue.enqueue(query("ok", Vec3::ZERO), recorder(&log, "ok")).unwrap();

        assert!(queue.drain_all(&scene, &mut scratch).is_err());
        assert_eq!(queue.len(), 1);
        assert!(log.lock().unwrap().is_empty());

        assert_eq!(queue.drain_all(&scene, &mut scratch).unwrap(), 1);
        assert_eq!(log.lock().unwrap().as_slice(), &[("ok".to_string(), 4)]);
    }
}
