//! Room/portal world model
//!
//! The room graph the visibility propagator walks: rooms owned in a
//! slotmap with stable keys, one-directional portals between them, and
//! the passive camera container the host drives.
//!
//! Room and entity *lifecycle* stays with the host engine; this module
//! only holds what the visibility core needs to see.

mod camera;
mod portal;
mod room;

pub use camera::Camera;
pub use portal::Portal;
pub use room::{Room, RoomFlags, RoomGraph, RoomKey};
