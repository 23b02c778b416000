//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias.
//! Variants cover invalid configuration, failures reported by the host environment, a
//! full deferred queue, and generic errors. Geometric rejections (off-navmesh, blocked
//! clearance) are not errors; they produce invalid samples instead.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("environment provider error: {0}")]
    Provider(String),

    #[error("query queue is full (capacity {capacity})")]
    QueueFull { capacity: usize },

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Wraps a failure reported by a navigation or physics provider.
    pub fn provider(details: impl Into<String>) -> Self {
        Self::Provider(details.into())
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
