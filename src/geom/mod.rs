//! Geometric primitives for the visibility core
//!
//! Planes, interpolatable vertices and convex polygons, plus the
//! split/classify/ray operations the portal clipper and the culling
//! queries are built from.

mod plane;
mod polygon;

pub use plane::Plane;
pub use polygon::{ConvexPolygon, PlaneSide, PolyVertex};

// ===== TOLERANCES =====
//
// Tuned per routine and deliberately kept distinct; see DESIGN.md for
// the rationale.

/// Plane-side classification and clipping tolerance, in world units.
pub const PLANE_EPSILON: f32 = 0.02;

/// Squared-distance threshold below which two vertices count as one
/// (broken-edge detection and post-clip seam merging).
pub const EDGE_EPSILON_SQ: f32 = 1e-4;

/// Minimum |normal . direction| for a ray to be considered non-parallel
/// to a plane.
pub const RAY_PARALLEL_EPSILON: f32 = 1e-3;

/// Accepted range for a supporting plane's squared normal length.
pub const NORMAL_LENGTH_SQ_MIN: f32 = 0.999;
/// Upper bound of [`NORMAL_LENGTH_SQ_MIN`]'s range.
pub const NORMAL_LENGTH_SQ_MAX: f32 = 1.001;
