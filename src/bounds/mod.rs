//! Bounding volumes
//!
//! Axis-aligned boxes for the simple cases and six-faced oriented
//! bounding volumes for everything that rotates. The oriented volume's
//! pairwise separating-axis test is shared with non-rendering code for
//! coarse collision and proximity checks.

mod aabb;
mod oriented_bounds;

pub use aabb::Aabb;
pub use oriented_bounds::{
    OrientedBounds, FACE_COUNT, FACE_DOWN, FACE_NEG_X, FACE_NEG_Z, FACE_POS_X,
    FACE_POS_Z, FACE_UP,
};
