/// VisibilityPropagator — portal-driven frustum propagation.
///
/// Owns the frustum arena. Once per frame, `rebuild` clears every
/// room's frustum list, resets the arena, builds the root frustum from
/// the camera and walks the portal graph with an explicit worklist,
/// clipping a child frustum out of every portal that survives. A room
/// reachable via several portal chains ends the frame with several
/// frustums.
///
/// Arena exhaustion aborts the frame: all partial results are discarded,
/// the arena grows at the next reset, and the host retries next frame.

use rustc_hash::FxHashSet;
use crate::geom::{Plane, PLANE_EPSILON};
use crate::world::{Camera, Portal, RoomGraph, RoomKey};
use crate::{vis_warn, Error, Result};
use super::arena::{FrustumArena, FrustumId};

const SOURCE: &str = "roomvis::Propagator";

/// Distance from the camera to the root clip window.
const ROOT_WINDOW_DISTANCE: f32 = 1.0;

/// Walks the portal graph once per frame, filling the arena and the
/// per-room frustum lists.
pub struct VisibilityPropagator {
    arena: FrustumArena,
}

impl VisibilityPropagator {
    /// Propagator with default arena budgets.
    pub fn new() -> Self {
        Self { arena: FrustumArena::new() }
    }

    /// Propagator with explicit arena budgets.
    pub fn with_capacity(frustums: usize, scratch_floats: usize) -> Self {
        Self { arena: FrustumArena::with_capacity(frustums, scratch_floats) }
    }

    /// The arena backing this frame's frustums. Queries resolve
    /// `FrustumId`s through it.
    pub fn arena(&self) -> &FrustumArena {
        &self.arena
    }

    /// Rebuild visibility for one frame.
    ///
    /// On `Error::ArenaExhausted` every room frustum list is cleared —
    /// partial results are never left for the renderer — and the arena
    /// regrows at the next rebuild. Any other outcome leaves each
    /// reachable room with its frustum list for this frame.
    pub fn rebuild(
        &mut self,
        rooms: &mut RoomGraph,
        camera: &Camera,
        start_room: RoomKey,
    ) -> Result<()> {
        rooms.clear_frustums();
        self.arena.reset();

        match self.propagate_all(rooms, camera, start_room) {
            Ok(()) => Ok(()),
            Err(Error::ArenaExhausted) => {
                rooms.clear_frustums();
                vis_warn!(
                    SOURCE,
                    "Arena exhausted after {} frustums; frame discarded, regrowing next reset",
                    self.arena.allocated()
                );
                Err(Error::ArenaExhausted)
            }
            Err(err) => Err(err),
        }
    }

    fn propagate_all(
        &mut self,
        rooms: &mut RoomGraph,
        camera: &Camera,
        start_room: RoomKey,
    ) -> Result<()> {
        let start_active = rooms.room(start_room).map_or(false, |room| room.is_active());
        if !start_active {
            return Ok(());
        }

        let root = self.build_root(camera, start_room)?;
        rooms.push_frustum(start_room, root);

        // Explicit DFS over (room, emitter) pairs; the visited set keeps
        // a malformed graph from re-queueing identical work.
        let mut stack: Vec<(RoomKey, FrustumId)> = vec![(start_room, root)];
        let mut visited: FxHashSet<(RoomKey, FrustumId)> = FxHashSet::default();
        visited.insert((start_room, root));

        while let Some((room_key, emitter)) = stack.pop() {
            let mut portal_index = 0;
            loop {
                let portal = match rooms
                    .room(room_key)
                    .and_then(|room| room.portals().get(portal_index))
                {
                    Some(portal) => portal.clone(),
                    None => break,
                };
                portal_index += 1;

                if let Some(child) =
                    self.propagate_through_portal(rooms, &portal, emitter, camera)?
                {
                    // Stop recursing once a room repeats on this chain;
                    // the frustum itself stays valid for queries.
                    let destination = portal.to_room();
                    if !self.arena.chain_visits_room(child, destination)
                        && visited.insert((destination, child))
                    {
                        stack.push((destination, child));
                    }
                }
            }
        }

        Ok(())
    }

    /// Build the root frustum from the camera's view rectangle.
    fn build_root(&mut self, camera: &Camera, room: RoomKey) -> Result<FrustumId> {
        let id = self.arena.create_frustum()?;
        let corners = camera.view_corners(ROOT_WINDOW_DISTANCE);

        let frustum = self.arena.get_mut(id);
        frustum.vertices.clear();
        frustum.vertices.extend_from_slice(&corners);
        frustum.norm = Plane::from_point_normal(camera.position(), camera.forward());
        frustum.origin = camera.position();
        frustum.parent = None;
        frustum.depth = 0;
        frustum.room = room;
        frustum.rebuild_edge_planes();

        Ok(id)
    }

    /// Propagate the emitter frustum through one portal.
    ///
    /// Returns the child frustum appended to the destination room's
    /// list, `Ok(None)` when the portal is rejected or clipped away, or
    /// `Error::ArenaExhausted` when the arena ran out mid-build (the
    /// partial child is rolled back either way).
    pub fn propagate_through_portal(
        &mut self,
        rooms: &mut RoomGraph,
        portal: &Portal,
        emitter: FrustumId,
        camera: &Camera,
    ) -> Result<Option<FrustumId>> {
        // Destination must exist and participate in visibility
        let destination = portal.to_room();
        let active = rooms.room(destination).map_or(false, |room| room.is_active());
        if !active {
            return Ok(None);
        }

        // Portals are one-directional: back-facing from the camera's
        // side never yields a frustum
        if portal.polygon().plane.signed_distance(camera.position()) < -PLANE_EPSILON {
            return Ok(None);
        }

        // At least one portal vertex must be in front of the emitter's
        // view plane and inside the far bound along it
        let emitter_norm = self.arena.get(emitter).norm;
        let far_clip = camera.far_clip();
        let reachable = portal.polygon().vertices.iter().any(|vertex| {
            let along = emitter_norm.signed_distance(vertex.position);
            along > 0.0 && along < far_clip
        });
        if !reachable {
            return Ok(None);
        }

        let emitter_planes: Vec<Plane> = self.arena.get(emitter).planes.clone();
        let emitter_depth = self.arena.get(emitter).depth;

        let child = self.arena.create_frustum()?;
        {
            let frustum = self.arena.get_mut(child);
            frustum.vertices.clear();
            frustum
                .vertices
                .extend(portal.polygon().vertices.iter().map(|v| v.position));
            // Inverted so "inside" faces back toward the camera
            frustum.norm = portal.polygon().plane.flipped();
            frustum.origin = camera.position();
            frustum.parent = Some(emitter);
            frustum.depth = emitter_depth + 1;
            frustum.room = destination;
        }

        match self.clip_child(child, &emitter_norm, &emitter_planes) {
            Ok(true) => {
                self.arena.get_mut(child).rebuild_edge_planes();
                rooms.push_frustum(destination, child);
                Ok(Some(child))
            }
            Ok(false) => {
                self.arena.truncate(child);
                Ok(None)
            }
            Err(err) => {
                self.arena.truncate(child);
                Err(err)
            }
        }
    }

    /// Clip a freshly seeded child against the emitter's view plane and
    /// every edge plane. `Ok(false)` means the child was clipped away.
    fn clip_child(
        &mut self,
        child: FrustumId,
        emitter_norm: &Plane,
        emitter_planes: &[Plane],
    ) -> Result<bool> {
        if self.arena.clip_frustum(child, emitter_norm)? < 3 {
            return Ok(false);
        }
        for plane in emitter_planes {
            if self.arena.clip_frustum(child, plane)? < 3 {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl Default for VisibilityPropagator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "propagator_tests.rs"]
mod tests;
