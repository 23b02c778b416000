#![forbid(unsafe_code)]
//! tactical_query: grid-sampled tactical position queries for game AI.
//!
//! A query lays a square grid of candidates around an origin, validates each candidate
//! against the host's navigation surface and physics world, scores every valid candidate
//! with a heuristic and hands the scored array to a continuation.
//!
//! Modules:
//! - environment: collaborator traits (navmesh snapping, overlap and ray tests) and an
//!   in-memory scene
//! - grid: world-aligned sample grids and neighbor lookup
//! - query: query description, validation, scoring, runner, deferred queue, events, selection
//! - heuristics: nearest-cover, shooting-position and retreat-position score functions
//! - settings, curve: per-query tunables and response curves
pub mod curve;
pub mod environment;
pub mod error;
pub mod grid;
pub mod heuristics;
pub mod query;
pub mod settings;

/// Convenient re-exports for common types. Import with `use tactical_query::prelude::*;`.
pub mod prelude {
    pub use crate::curve::ResponseCurve;
    pub use crate::environment::scene::{BoxCollider, NavRect, Scene};
    pub use crate::environment::{
        Environment, LayerMask, NavAreaMask, NavigationSurface, OverlapBuffer, PhysicsWorld,
        RayHit,
    };
    pub use crate::error::{Error, Result};
    pub use crate::grid::SampleGrid;
    pub use crate::heuristics::{Heuristic, HeuristicParams, HeuristicScorer};
    pub use crate::query::events::{
        EventSink, FnSink, MultiSink, QueryEvent, QueryEventKind, VecSink,
    };
    pub use crate::query::queue::QueryQueue;
    pub use crate::query::runner::{evaluate, run_query, run_query_with_events, QueryRunner};
    pub use crate::query::selection::{best_sample, ranked_indices, QuerySummary};
    pub use crate::query::validator::{validate_point, Rejection};
    pub use crate::query::{CoverType, Query, QueryFlags, SamplePoint, ScoreFunction};
    pub use crate::settings::QuerySettings;
}
