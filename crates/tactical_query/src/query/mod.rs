//! Query description and the evaluation pipeline.
//!
//! A [`Query`] is built once per request and stays read-only while it runs. The pipeline
//! is split into stages:
//! - [`validator`]: resolve one candidate against the environment into a [`SamplePoint`]
//! - [`scoring`]: run the query's [`ScoreFunction`] over every valid sample
//! - [`runner`]: grid -> validate all -> score all -> deliver
//! - [`queue`]: deferred execution, one query per host tick
//!
//! [`events`] and [`selection`] observe and consume results.
use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;
use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::heuristics::Heuristic;
use crate::settings::QuerySettings;

pub mod events;
pub mod queue;
pub mod runner;
pub mod sample;
pub mod scoring;
pub mod selection;
pub mod validator;

pub use sample::{CoverType, SamplePoint};
pub use scoring::ScoreFunction;

bitflags! {
    /// Optional stages of point validation.
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct QueryFlags: u32 {
        /// Reject points whose standing volume overlaps a physical collider.
        const CLEARANCE = 1 << 0;
        /// Compute `in_line_of_sight` from each point back to the origin.
        const ORIGIN_LINE_OF_SIGHT = 1 << 1;
    }
}

impl Default for QueryFlags {
    fn default() -> Self {
        QueryFlags::CLEARANCE | QueryFlags::ORIGIN_LINE_OF_SIGHT
    }
}

/// One tactical position request.
#[derive(Clone)]
pub struct Query {
    /// Name of the requester, used in log lines.
    pub label: Option<String>,
    /// Position the grid is built around.
    pub origin: Vec3,
    /// Eye point of the requester. Its height is used for visibility rays.
    pub line_of_sight_origin: Vec3,
    /// Position of the actor being evaluated against.
    pub target: Vec3,
    /// Point on the target that must be visible (head, chest).
    pub line_of_sight_target: Vec3,
    /// Grid shape, filters and tunables.
    pub settings: QuerySettings,
    /// Heuristic that turns validated samples into scores.
    pub scorer: Arc<dyn ScoreFunction>,
}

impl Query {
    /// Creates a query whose line-of-sight points coincide with origin and target.
    pub fn new(
        origin: impl Into<Vec3>,
        target: impl Into<Vec3>,
        settings: QuerySettings,
        scorer: impl ScoreFunction + 'static,
    ) -> Self {
        Self::with_shared_scorer(origin, target, settings, Arc::new(scorer))
    }

    /// Like [`Query::new`], validating the settings first.
    pub fn try_new(
        origin: impl Into<Vec3>,
        target: impl Into<Vec3>,
        settings: QuerySettings,
        scorer: impl ScoreFunction + 'static,
    ) -> Result<Self> {
        settings.validate()?;
        Ok(Self::new(origin, target, settings, scorer))
    }

    /// Creates a query reusing an already shared scorer.
    pub fn with_shared_scorer(
        origin: impl Into<Vec3>,
        target: impl Into<Vec3>,
        settings: QuerySettings,
        scorer: Arc<dyn ScoreFunction>,
    ) -> Self {
        let origin = origin.into();
        let target = target.into();
        Self {
            label: None,
            origin,
            line_of_sight_origin: origin,
            target,
            line_of_sight_target: target,
            settings,
            scorer,
        }
    }

    /// Creates a query scored by one of the built-in heuristics, parameterized from `settings`.
    pub fn for_heuristic(
        origin: impl Into<Vec3>,
        target: impl Into<Vec3>,
        settings: QuerySettings,
        heuristic: Heuristic,
    ) -> Self {
        let scorer = settings.scorer(heuristic);
        Self::new(origin, target, settings, scorer)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_line_of_sight_origin(mut self, eye: impl Into<Vec3>) -> Self {
        self.line_of_sight_origin = eye.into();
        self
    }

    pub fn with_line_of_sight_target(mut self, eye: impl Into<Vec3>) -> Self {
        self.line_of_sight_target = eye.into();
        self
    }

    /// Raises both line-of-sight points `height` above origin and target.
    pub fn with_eye_height(self, height: f32) -> Self {
        let (origin, target) = (self.origin, self.target);
        self.with_line_of_sight_origin(origin + Vec3::Y * height)
            .with_line_of_sight_target(target + Vec3::Y * height)
    }

    /// Validates the settings, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        self.settings.validate()
    }

    /// Label for log lines.
    pub fn name(&self) -> &str {
        self.label.as_deref().unwrap_or("<unnamed>")
    }
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("label", &self.label)
            .field("origin", &self.origin)
            .field("line_of_sight_origin", &self.line_of_sight_origin)
            .field("target", &self.target)
            .field("line_of_sight_target", &self.line_of_sight_target)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
