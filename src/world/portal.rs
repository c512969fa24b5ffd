/// Portal — a convex opening from one room into another.
///
/// A portal is a convex polygon with an outward normal (facing the side
/// the viewer looks through it from) plus the room it leads to. Portals
/// are one-directional: a two-way opening is two portals, one in each
/// room, with opposite normals.

use glam::Vec3;
use crate::geom::ConvexPolygon;
use super::room::RoomKey;

/// A one-directional opening into a destination room.
#[derive(Debug, Clone)]
pub struct Portal {
    /// The opening itself; the plane normal faces the viewer side.
    polygon: ConvexPolygon,
    /// Room visible through this portal.
    to_room: RoomKey,
}

impl Portal {
    /// Build a portal from a polygon and destination.
    ///
    /// The polygon's winding must match its plane (CCW seen from the
    /// viewer side); broken polygons are rejected with `None`.
    pub fn new(polygon: ConvexPolygon, to_room: RoomKey) -> Option<Self> {
        if polygon.is_broken() {
            return None;
        }
        Some(Self { polygon, to_room })
    }

    /// Build a portal from bare corner positions (CCW from the viewer
    /// side), deriving the plane from the first three.
    pub fn from_positions(positions: &[Vec3], to_room: RoomKey) -> Option<Self> {
        ConvexPolygon::from_positions(positions).and_then(|polygon| Self::new(polygon, to_room))
    }

    /// The portal opening.
    pub fn polygon(&self) -> &ConvexPolygon {
        &self.polygon
    }

    /// Room this portal leads into.
    pub fn to_room(&self) -> RoomKey {
        self.to_room
    }

    /// Shift the portal in world space (alternate-room flips move rooms
    /// without rebuilding the graph). The plane offset follows the
    /// vertices; the normal is unchanged.
    pub fn translate(&mut self, offset: Vec3) {
        for vertex in &mut self.polygon.vertices {
            vertex.position += offset;
        }
        self.polygon.plane.distance -= self.polygon.plane.normal.dot(offset);
    }
}

#[cfg(test)]
#[path = "portal_tests.rs"]
mod tests;
