//! Error types for the room visibility core
//!
//! This module defines the error types used throughout the crate.
//! Geometric degeneracy is deliberately *not* an error: broken polygons,
//! near-parallel rays and empty clip results are reported as sentinel
//! values (`Option`, `PlaneSide`, vertex counts) and skipped by callers.

use std::fmt;

/// Result type for room visibility operations
pub type Result<T> = std::result::Result<T, Error>;

/// Room visibility errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The frustum arena ran out of space mid-rebuild.
    ///
    /// The arena flags itself for a deferred 1.5x regrow; the current
    /// frame's visibility results must be discarded wholesale and the
    /// rebuild retried after the next reset.
    ArenaExhausted,

    /// Input geometry was degenerate where valid geometry is required
    /// (e.g. rebuilding a bounding volume from an inverted box).
    DegenerateGeometry(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ArenaExhausted => {
                write!(f, "Frustum arena exhausted; regrow pending at next reset")
            }
            Error::DegenerateGeometry(msg) => write!(f, "Degenerate geometry: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
