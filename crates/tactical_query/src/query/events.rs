//! Event types and sinks for observing query runs.
//!
//! [`crate::query::runner::run_query_with_events`] reports progress through an
//! [`EventSink`]. Sinks can filter by [`QueryEventKind`] so that per-sample events are
//! only built when someone listens for them.
use glam::Vec3;

use crate::query::selection::QuerySummary;
use crate::query::validator::Rejection;
use crate::query::SamplePoint;

/// Describes events emitted while a query runs.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum QueryEvent {
    /// Emitted once the grid has been built.
    QueryStarted {
        /// Query label, or `<unnamed>`.
        label: String,
        /// Snapped grid center.
        center: Vec3,
        /// Cells per side.
        grid_size: usize,
        /// Distance between adjacent cells.
        spacing: f32,
    },

    /// Emitted after a cell was validated.
    SampleEvaluated {
        /// Cell index in the result array.
        index: usize,
        /// Grid position before navmesh snapping.
        candidate: Vec3,
        /// Why the cell was rejected, if it was.
        rejection: Option<Rejection>,
    },

    /// Emitted after a valid cell was scored.
    SampleScored {
        index: usize,
        sample: SamplePoint,
    },

    /// Emitted before results are delivered.
    QueryFinished {
        label: String,
        summary: QuerySummary,
    },

    /// Non-fatal warning generated during the query.
    Warning {
        /// Context string (query label).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`QueryEvent`], used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryEventKind {
    QueryStarted,
    SampleEvaluated,
    SampleScored,
    QueryFinished,
    Warning,
}

impl QueryEvent {
    pub fn kind(&self) -> QueryEventKind {
        match self {
            QueryEvent::QueryStarted { .. } => QueryEventKind::QueryStarted,
            QueryEvent::SampleEvaluated { .. } => QueryEventKind::SampleEvaluated,
            QueryEvent::SampleScored { .. } => QueryEventKind::SampleScored,
            QueryEvent::QueryFinished { .. } => QueryEventKind::QueryFinished,
            QueryEvent::Warning { .. } => QueryEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`QueryEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: QueryEvent);

    /// Whether events of `kind` should be built and sent at all.
    #[inline]
    fn wants(&self, _kind: QueryEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = QueryEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: QueryEvent) {}

    #[inline]
    fn wants(&self, _kind: QueryEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(QueryEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(QueryEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(QueryEvent),
{
    #[inline]
    fn send(&mut self, event: QueryEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally restricted to some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<QueryEvent>,
    only: Option<Vec<QueryEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects only events of the listed kinds.
    pub fn only(kinds: &[QueryEventKind]) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.to_vec()),
        }
    }

    pub fn into_inner(self) -> Vec<QueryEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[QueryEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of collected events of `kind`.
    pub fn count(&self, kind: QueryEventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: QueryEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: QueryEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}

/// Fan-out sink that forwards each event to every contained sink that wants it.
pub struct MultiSink<S: EventSink> {
    sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn sinks(&self) -> &[S] {
        &self.sinks
    }

    pub fn into_sinks(self) -> Vec<S> {
        self.sinks
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: QueryEvent) {
        let kind = event.kind();
        let Some(last) = self.sinks.iter().rposition(|s| s.wants(kind)) else {
            return;
        };
        for sink in self.sinks[..last].iter_mut() {
            if sink.wants(kind) {
                sink.send(event.clone());
            }
        }
        self.sinks[last].send(event);
    }

    fn wants(&self, kind: QueryEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}
