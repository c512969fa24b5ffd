/*!
# Room Visibility

Visibility and geometric-clipping core for indoor, room-based 3D levels.

Levels are graphs of rooms connected by portals. Every frame, the
[`visibility::VisibilityPropagator`] walks the portal graph from the camera's
room, clipping a new frustum out of each portal it can see through, and leaves
every reachable room with a list of frustums valid for that frame. Culling
code then asks those frustums whether individual polygons, axis-aligned boxes
or oriented bounding volumes are visible.

The same clipping arithmetic backs the collision-adjacent pieces: convex
polygon split/classify/ray tests ([`geom`]) and the pairwise oriented-box
separating-axis test ([`bounds`]).

Out of scope, consumed through narrow interfaces: draw submission, physics
integration, animation, audio and level loading. The crate decides only
"is X visible" and "do A and B overlap".

## Architecture

- **geom**: planes, convex polygons, split/classify/ray intersection
- **bounds**: axis-aligned and oriented bounding volumes
- **world**: the room/portal graph and the passive camera container
- **visibility**: the per-frame frustum arena, portal propagation and
  visibility queries
*/

mod error;
pub mod log;

pub mod bounds;
pub mod geom;
pub mod visibility;
pub mod world;

pub use error::{Error, Result};

// Re-export math library at crate root
pub use glam;
