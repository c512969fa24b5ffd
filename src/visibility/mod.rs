//! Per-frame visibility
//!
//! The frustum arena hands out frustum records for one visibility
//! rebuild; the propagator walks the portal graph filling it and the
//! room frustum lists; the queries answer "is this polygon / box /
//! bounding volume visible" against the result.
//!
//! Everything here is frame-synchronous: all `FrustumId`s are
//! invalidated by the next arena reset.

mod arena;
mod frustum;
mod propagator;
mod queries;

pub use arena::{FrustumArena, FrustumId};
pub use frustum::PortalFrustum;
pub use propagator::VisibilityPropagator;
