/// Room graph — slotmap-owned rooms with stable keys.
///
/// The graph owner (the host engine) creates rooms, wires portals and
/// toggles room activity; the visibility propagator only reads portals
/// and rewrites the per-frame frustum lists.

use bitflags::bitflags;
use glam::Vec3;
use slotmap::{new_key_type, SlotMap};
use crate::visibility::FrustumId;
use super::portal::Portal;

new_key_type! {
    /// Stable key for a Room within a RoomGraph.
    ///
    /// Keys remain valid even after other rooms are removed.
    pub struct RoomKey;
}

bitflags! {
    /// Room state bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RoomFlags: u32 {
        /// Room participates in visibility; inactive rooms reject
        /// propagation through their portals.
        const ACTIVE = 1 << 0;
    }
}

/// A room: its outgoing portals plus the per-frame frustum list the
/// propagator rebuilds.
#[derive(Debug, Clone)]
pub struct Room {
    portals: Vec<Portal>,
    flags: RoomFlags,
    /// Frustums reaching this room this frame, one per portal chain.
    /// Ids are valid until the next arena reset.
    frustums: Vec<FrustumId>,
}

impl Room {
    fn new() -> Self {
        Self {
            portals: Vec::new(),
            flags: RoomFlags::ACTIVE,
            frustums: Vec::new(),
        }
    }

    /// Outgoing portals of this room.
    pub fn portals(&self) -> &[Portal] {
        &self.portals
    }

    /// Whether the room participates in visibility.
    pub fn is_active(&self) -> bool {
        self.flags.contains(RoomFlags::ACTIVE)
    }

    /// Frustums that reached this room this frame.
    pub fn frustums(&self) -> &[FrustumId] {
        &self.frustums
    }

    pub(crate) fn push_frustum(&mut self, id: FrustumId) {
        self.frustums.push(id);
    }

    pub(crate) fn clear_frustums(&mut self) {
        self.frustums.clear();
    }
}

/// Owner of all rooms, keyed by `RoomKey`.
pub struct RoomGraph {
    rooms: SlotMap<RoomKey, Room>,
}

impl RoomGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self { rooms: SlotMap::with_key() }
    }

    /// Add an empty active room, returning its stable key.
    pub fn add_room(&mut self) -> RoomKey {
        self.rooms.insert(Room::new())
    }

    /// Remove a room. Portals in other rooms that lead here become
    /// dangling and are skipped by the propagator.
    pub fn remove_room(&mut self, key: RoomKey) -> bool {
        self.rooms.remove(key).is_some()
    }

    /// Get a room by key.
    pub fn room(&self, key: RoomKey) -> Option<&Room> {
        self.rooms.get(key)
    }

    /// Wire a portal out of `from`. Returns false if the source room is
    /// gone or the portal polygon was rejected.
    pub fn add_portal(&mut self, from: RoomKey, portal: Portal) -> bool {
        match self.rooms.get_mut(from) {
            Some(room) => {
                room.portals.push(portal);
                true
            }
            None => false,
        }
    }

    /// Toggle a room's participation in visibility.
    pub fn set_active(&mut self, key: RoomKey, active: bool) -> bool {
        match self.rooms.get_mut(key) {
            Some(room) => {
                room.flags.set(RoomFlags::ACTIVE, active);
                true
            }
            None => false,
        }
    }

    /// Shift a room's portals in world space (alternate-room flip).
    pub fn translate_room(&mut self, key: RoomKey, offset: Vec3) -> bool {
        match self.rooms.get_mut(key) {
            Some(room) => {
                for portal in &mut room.portals {
                    portal.translate(offset);
                }
                true
            }
            None => false,
        }
    }

    /// Number of rooms in the graph.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether the graph has no rooms.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Iterate over all rooms (key, room).
    pub fn iter(&self) -> impl Iterator<Item = (RoomKey, &Room)> {
        self.rooms.iter()
    }

    /// Clear every room's per-frame frustum list.
    ///
    /// Called by the propagator at the start of a rebuild, and by the
    /// graph owner whenever stale lists must not be consumed (room
    /// enable/disable, portal-graph edits).
    pub fn clear_frustums(&mut self) {
        for (_, room) in self.rooms.iter_mut() {
            room.clear_frustums();
        }
    }

    pub(crate) fn push_frustum(&mut self, key: RoomKey, id: FrustumId) {
        if let Some(room) = self.rooms.get_mut(key) {
            room.push_frustum(id);
        }
    }
}

impl Default for RoomGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "room_tests.rs"]
mod tests;
