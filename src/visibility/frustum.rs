/// PortalFrustum — the visible cross-section through a portal chain.
///
/// Not the camera's native view cone: a frustum here is whatever convex
/// window survives clipping a portal against every plane of the frustum
/// it was seen through. It carries its vertex loop, one inward clip
/// plane per edge, the primary view-direction plane (`norm`), the
/// camera position it was built from, and its place in the portal
/// chain (parent id + depth).
///
/// Records are allocated from the [`FrustumArena`](super::FrustumArena)
/// and never mutated after the propagation step that created them.

use glam::Vec3;
use crate::geom::{Plane, EDGE_EPSILON_SQ, PLANE_EPSILON};
use crate::world::RoomKey;
use super::arena::FrustumId;

/// One frustum record. See the module docs for field semantics.
#[derive(Debug, Clone)]
pub struct PortalFrustum {
    /// The clip window as a convex vertex loop.
    pub(crate) vertices: Vec<Vec3>,
    /// One clip plane per edge; the positive half-space is inside.
    pub(crate) planes: Vec<Plane>,
    /// Primary view-direction plane: positive side is what the frustum
    /// can show. For portal frusta this is the inverted portal plane.
    pub(crate) norm: Plane,
    /// Camera position the frustum was built from.
    pub(crate) origin: Vec3,
    /// The frustum this one was clipped out of, if any.
    pub(crate) parent: Option<FrustumId>,
    /// Length of the parent chain (root = 0).
    pub(crate) depth: u32,
    /// Room this frustum shows.
    pub(crate) room: RoomKey,
}

impl PortalFrustum {
    /// Blank record for arena slots; filled in by the propagator.
    pub(crate) fn blank() -> Self {
        Self {
            vertices: Vec::new(),
            planes: Vec::new(),
            norm: Plane::new(Vec3::Z, 0.0),
            origin: Vec3::ZERO,
            parent: None,
            depth: 0,
            room: RoomKey::default(),
        }
    }

    // ===== GETTERS =====

    /// The clip-window vertex loop.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Per-edge clip planes (positive half-space inside).
    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// Primary view-direction plane.
    pub fn norm(&self) -> &Plane {
        &self.norm
    }

    /// Camera position used to build the frustum.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Parent frustum in the portal chain.
    pub fn parent(&self) -> Option<FrustumId> {
        self.parent
    }

    /// Length of the parent chain (root = 0).
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Room this frustum shows.
    pub fn room(&self) -> RoomKey {
        self.room
    }

    // ===== CLIPPING =====

    /// Clip the vertex loop against a plane, keeping the front side.
    ///
    /// `distances[i]` is the precomputed signed distance of vertex `i`
    /// (the arena buffers these in its scratch slab). Edges strictly
    /// crossing the plane emit an interpolated vertex; consecutive
    /// result vertices closer than the edge tolerance are merged.
    /// Returns the resulting vertex count — fewer than 3 means the
    /// frustum died on this plane.
    pub(crate) fn clip_with_distances(&mut self, distances: &[f32]) -> usize {
        let n = self.vertices.len();
        debug_assert_eq!(distances.len(), n);

        let mut clipped = Vec::with_capacity(n + 4);
        for i in 0..n {
            let j = (i + 1) % n;
            let di = distances[i];
            let dj = distances[j];

            if di >= -PLANE_EPSILON {
                clipped.push(self.vertices[i]);
            }

            let crosses = (di > PLANE_EPSILON && dj < -PLANE_EPSILON)
                || (di < -PLANE_EPSILON && dj > PLANE_EPSILON);
            if crosses {
                let t = di / (di - dj);
                clipped.push(self.vertices[i].lerp(self.vertices[j], t));
            }
        }

        // Merge consecutive near-duplicates, closing edge included
        let mut merged: Vec<Vec3> = Vec::with_capacity(clipped.len());
        for vertex in clipped {
            let keep = merged
                .last()
                .map_or(true, |last| last.distance_squared(vertex) >= EDGE_EPSILON_SQ);
            if keep {
                merged.push(vertex);
            }
        }
        while merged.len() > 1 {
            let first = merged[0];
            let last = *merged.last().unwrap_or(&first);
            if first.distance_squared(last) < EDGE_EPSILON_SQ {
                merged.pop();
            } else {
                break;
            }
        }

        self.vertices = merged;
        self.vertices.len()
    }

    /// Recompute the per-edge clip planes from the final vertex loop and
    /// the camera position.
    ///
    /// Each edge plane passes through the camera and one edge of the
    /// loop, oriented so the loop interior is on the positive side.
    /// Degenerate edges (camera collinear with the edge) produce no
    /// plane.
    pub(crate) fn rebuild_edge_planes(&mut self) {
        self.planes.clear();
        let n = self.vertices.len();
        if n < 3 {
            return;
        }

        let centroid = self.vertices.iter().sum::<Vec3>() / n as f32;
        for i in 0..n {
            let prev = self.vertices[(i + n - 1) % n];
            let curr = self.vertices[i];

            let normal = (prev - self.origin).cross(curr - prev);
            if normal.length_squared() < f32::EPSILON {
                continue;
            }

            let mut plane = Plane::from_point_normal(self.origin, normal.normalize());
            if plane.signed_distance(centroid) < 0.0 {
                plane = plane.flipped();
            }
            self.planes.push(plane);
        }
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
