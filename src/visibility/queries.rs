/// Visibility queries — read-only tests against built frustums.
///
/// Culling code calls these after a rebuild: polygons, axis-aligned
/// boxes and oriented bounding volumes against a single frustum or a
/// room's whole per-frame list. Nothing here mutates the frustum or
/// the geometry.
///
/// The queries are conservative: a borderline polygon may be reported
/// visible, never the other way around.

use glam::Vec3;
use crate::bounds::{Aabb, OrientedBounds};
use crate::geom::{ConvexPolygon, PLANE_EPSILON};
use super::arena::{FrustumArena, FrustumId};
use super::frustum::PortalFrustum;

impl PortalFrustum {
    /// Whether a polygon is visible through this frustum.
    ///
    /// With `check_backface`, polygons facing away from the frustum's
    /// camera are rejected outright. A polygon covering the entire clip
    /// window is accepted by casting a ray through each window corner;
    /// everything else is classified edge-plane by edge-plane: wholly
    /// outside any one plane rejects, a vertex sitting on one plane
    /// while inside all the others accepts (edge straddling), and
    /// surviving every plane accepts.
    pub fn is_polygon_visible(&self, polygon: &ConvexPolygon, check_backface: bool) -> bool {
        if polygon.is_broken() {
            return false;
        }
        if check_backface && polygon.plane.signed_distance(self.origin) < 0.0 {
            return false;
        }

        // Polygon covering the whole window (or degenerate very-close
        // geometry): a window-corner ray lands on it
        for corner in &self.vertices {
            if polygon.ray_intersect(self.origin, *corner - self.origin).is_some() {
                return true;
            }
        }

        // Wholly behind the view plane
        if self
            .vertices_all_outside(&polygon.vertices, |p| self.norm.signed_distance(p))
        {
            return false;
        }

        for (skip, plane) in self.planes.iter().enumerate() {
            let mut any_inside = false;
            for vertex in &polygon.vertices {
                let distance = plane.signed_distance(vertex.position);
                if distance >= -PLANE_EPSILON {
                    any_inside = true;
                    // On this edge and inside every other plane: the
                    // polygon pokes into the window here
                    if distance <= PLANE_EPSILON
                        && self.inside_planes_except(vertex.position, skip)
                    {
                        return true;
                    }
                }
            }
            if !any_inside {
                return false;
            }
        }

        true
    }

    /// Whether an axis-aligned box is visible through this frustum.
    ///
    /// The camera inside the box is trivially visible; otherwise the
    /// up-to-3 camera-facing faces are tested as quads.
    pub fn is_aabb_visible(&self, aabb: &Aabb) -> bool {
        if aabb.contains_point(self.origin) {
            return true;
        }

        for axis in 0..3 {
            let face = if self.origin[axis] < aabb.min[axis] {
                Some(aabb_face(aabb, axis, false))
            } else if self.origin[axis] > aabb.max[axis] {
                Some(aabb_face(aabb, axis, true))
            } else {
                None
            };

            if let Some(corners) = face {
                if let Some(quad) = ConvexPolygon::from_positions(&corners) {
                    if self.is_polygon_visible(&quad, false) {
                        return true;
                    }
                }
            }
        }

        false
    }

    /// Whether an oriented bounding volume is visible through this
    /// frustum.
    ///
    /// Tests each world face whose plane the camera is in front of;
    /// a camera behind every face is inside the volume and trivially
    /// visible.
    pub fn is_obv_visible(&self, obv: &OrientedBounds) -> bool {
        let mut in_front_of_any = false;

        for face in obv.world_faces() {
            if face.plane.signed_distance(self.origin) > 0.0 {
                in_front_of_any = true;
                if self.is_polygon_visible(face, false) {
                    return true;
                }
            }
        }

        !in_front_of_any
    }

    fn inside_planes_except(&self, point: Vec3, skip: usize) -> bool {
        self.planes
            .iter()
            .enumerate()
            .all(|(i, plane)| i == skip || plane.signed_distance(point) >= -PLANE_EPSILON)
    }

    fn vertices_all_outside<F>(&self, vertices: &[crate::geom::PolyVertex], distance: F) -> bool
    where
        F: Fn(Vec3) -> f32,
    {
        vertices
            .iter()
            .all(|vertex| distance(vertex.position) < -PLANE_EPSILON)
    }
}

impl FrustumArena {
    /// Whether an oriented bounding volume is visible through any
    /// frustum in a room's per-frame list.
    pub fn is_obv_visible_in_any(&self, frustums: &[FrustumId], obv: &OrientedBounds) -> bool {
        frustums.iter().any(|&id| self.get(id).is_obv_visible(obv))
    }

    /// Whether an axis-aligned box is visible through any frustum in a
    /// room's per-frame list.
    pub fn is_aabb_visible_in_any(&self, frustums: &[FrustumId], aabb: &Aabb) -> bool {
        frustums.iter().any(|&id| self.get(id).is_aabb_visible(aabb))
    }
}

/// Corners of one box face; `at_max` picks the max side of `axis`.
fn aabb_face(aabb: &Aabb, axis: usize, at_max: bool) -> [Vec3; 4] {
    let fixed = if at_max { aabb.max[axis] } else { aabb.min[axis] };
    let u = (axis + 1) % 3;
    let v = (axis + 2) % 3;

    let mut corners = [Vec3::ZERO; 4];
    let spans = [
        (aabb.min[u], aabb.min[v]),
        (aabb.max[u], aabb.min[v]),
        (aabb.max[u], aabb.max[v]),
        (aabb.min[u], aabb.max[v]),
    ];
    for (corner, (su, sv)) in corners.iter_mut().zip(spans) {
        corner[axis] = fixed;
        corner[u] = su;
        corner[v] = sv;
    }
    corners
}

#[cfg(test)]
#[path = "queries_tests.rs"]
mod tests;
