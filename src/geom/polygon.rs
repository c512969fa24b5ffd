/// ConvexPolygon — ordered vertex loop with a supporting plane.
///
/// The workhorse of the visibility core: OBV faces, portals and frustum
/// cross-sections are all convex polygons. Supports degeneracy checks,
/// plane-relative classification, splitting by a plane with attribute
/// interpolation, ray intersection and a convex-convex overlap test.
///
/// Degenerate polygons are never an error: callers check `is_broken` and
/// skip the offending geometry.

use glam::{Vec2, Vec3, Vec4};
use super::plane::Plane;
use super::{
    EDGE_EPSILON_SQ, NORMAL_LENGTH_SQ_MAX, NORMAL_LENGTH_SQ_MIN, PLANE_EPSILON,
    RAY_PARALLEL_EPSILON,
};

/// Tolerance for the barycentric containment test in `ray_intersect`.
const BARYCENTRIC_EPSILON: f32 = 1e-4;

// ===== PLANE SIDE =====

/// Position of a polygon relative to a plane (3-way + straddling).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// Every vertex is on or in front of the plane (within tolerance).
    Front,
    /// Every vertex is on or behind the plane (within tolerance).
    Back,
    /// Every vertex lies within tolerance of the plane.
    InPlane,
    /// Vertices on both sides: the plane crosses the polygon.
    Straddling,
}

// ===== VERTEX =====

/// A polygon vertex: position plus linearly interpolatable render
/// attributes.
///
/// The visibility core treats the attributes as an opaque payload, but
/// they MUST be interpolated at the same parameter as the position when
/// a polygon is split, so seams stay shading-continuous.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolyVertex {
    /// World- or base-space position
    pub position: Vec3,
    /// Shading normal (unit length)
    pub normal: Vec3,
    /// Vertex color (RGBA)
    pub color: Vec4,
    /// Texture coordinate
    pub uv: Vec2,
}

impl PolyVertex {
    /// Vertex at `position` with neutral attributes (normal +Y, white,
    /// zero UV). Used for faces built analytically rather than loaded.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            normal: Vec3::Y,
            color: Vec4::ONE,
            uv: Vec2::ZERO,
        }
    }

    /// Interpolate every attribute at parameter `t` in [0, 1].
    ///
    /// The interpolated normal is renormalized; if the endpoints cancel
    /// out exactly it falls back to `a`'s normal.
    pub fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        let normal = a.normal.lerp(b.normal, t);
        let normal = if normal.length_squared() > f32::EPSILON {
            normal.normalize()
        } else {
            a.normal
        };
        Self {
            position: a.position.lerp(b.position, t),
            normal,
            color: a.color.lerp(b.color, t),
            uv: a.uv.lerp(b.uv, t),
        }
    }
}

// ===== POLYGON =====

/// An ordered convex vertex loop (>= 3 vertices) with a supporting plane.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexPolygon {
    /// Vertex loop, wound counter-clockwise as seen from the front of
    /// `plane`.
    pub vertices: Vec<PolyVertex>,
    /// Supporting plane; the normal is the polygon's facing direction.
    pub plane: Plane,
}

impl ConvexPolygon {
    /// Build a polygon from a vertex loop and an explicit plane.
    pub fn new(vertices: Vec<PolyVertex>, plane: Plane) -> Self {
        Self { vertices, plane }
    }

    /// Build a polygon from bare positions, deriving the plane from the
    /// first three vertices (CCW winding).
    ///
    /// Returns `None` when fewer than 3 positions are given or the first
    /// three are collinear.
    pub fn from_positions(positions: &[Vec3]) -> Option<Self> {
        if positions.len() < 3 {
            return None;
        }
        let plane = Plane::from_points(positions[0], positions[1], positions[2])?;
        let vertices = positions.iter().map(|&p| PolyVertex::from_position(p)).collect();
        Some(Self { vertices, plane })
    }

    /// Whether the polygon is unusable and must be skipped by callers.
    ///
    /// Broken means: fewer than 3 vertices, a supporting plane whose
    /// normal drifted off unit length, or a degenerate edge (two
    /// consecutive vertices closer than the edge tolerance, including
    /// the closing edge).
    pub fn is_broken(&self) -> bool {
        if self.vertices.len() < 3 {
            return true;
        }

        let normal_len_sq = self.plane.normal.length_squared();
        if !(NORMAL_LENGTH_SQ_MIN..=NORMAL_LENGTH_SQ_MAX).contains(&normal_len_sq) {
            return true;
        }

        let n = self.vertices.len();
        for i in 0..n {
            let a = self.vertices[i].position;
            let b = self.vertices[(i + 1) % n].position;
            if a.distance_squared(b) < EDGE_EPSILON_SQ {
                return true;
            }
        }

        false
    }

    /// Classify the polygon relative to `plane` with the shared clipping
    /// tolerance.
    pub fn classify(&self, plane: &Plane) -> PlaneSide {
        let mut any_front = false;
        let mut any_back = false;

        for vertex in &self.vertices {
            let distance = plane.signed_distance(vertex.position);
            if distance > PLANE_EPSILON {
                any_front = true;
            } else if distance < -PLANE_EPSILON {
                any_back = true;
            }
        }

        match (any_front, any_back) {
            (false, false) => PlaneSide::InPlane,
            (true, false) => PlaneSide::Front,
            (false, true) => PlaneSide::Back,
            (true, true) => PlaneSide::Straddling,
        }
    }

    /// Split the polygon by `plane` into a front half and a back half.
    ///
    /// Walks the vertex loop; each edge crossing the plane emits an
    /// interpolated seam vertex into *both* outputs, and each original
    /// vertex goes to the side(s) it lies on — vertices within tolerance
    /// of the plane go to both, preserving a shared seam. Both outputs
    /// keep the source polygon's supporting plane verbatim.
    ///
    /// A polygon entirely on one side yields the full loop on that side
    /// and a degenerate (broken) polygon on the other; callers filter
    /// with `is_broken`.
    pub fn split(&self, plane: &Plane) -> (ConvexPolygon, ConvexPolygon) {
        let n = self.vertices.len();
        let mut front = Vec::with_capacity(n + 2);
        let mut back = Vec::with_capacity(n + 2);

        // Signed distances once per vertex; the edge walk reads pairs.
        let mut distances = Vec::with_capacity(n);
        for vertex in &self.vertices {
            distances.push(plane.signed_distance(vertex.position));
        }

        for i in 0..n {
            let j = (i + 1) % n;
            let di = distances[i];
            let dj = distances[j];
            let vertex = self.vertices[i];

            if di >= -PLANE_EPSILON {
                front.push(vertex);
            }
            if di <= PLANE_EPSILON {
                back.push(vertex);
            }

            // Edge strictly crossing: emit the seam vertex to both halves
            let crosses = (di > PLANE_EPSILON && dj < -PLANE_EPSILON)
                || (di < -PLANE_EPSILON && dj > PLANE_EPSILON);
            if crosses {
                let t = di / (di - dj);
                let seam = PolyVertex::lerp(&self.vertices[i], &self.vertices[j], t);
                front.push(seam);
                back.push(seam);
            }
        }

        (
            ConvexPolygon::new(front, self.plane),
            ConvexPolygon::new(back, self.plane),
        )
    }

    /// Intersect a ray with the polygon.
    ///
    /// Returns the ray parameter `t` (in units of `direction`) of the
    /// hit, or `None` when the ray is near-parallel to the supporting
    /// plane, hits behind the origin, or misses the loop. Containment
    /// uses a triangle fan from the first vertex with a barycentric test
    /// per triangle.
    pub fn ray_intersect(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let denom = self.plane.normal.dot(direction);
        if denom.abs() < RAY_PARALLEL_EPSILON {
            return None;
        }

        let t = -self.plane.signed_distance(origin) / denom;
        if t < 0.0 {
            return None;
        }

        let hit = origin + direction * t;
        let v0 = self.vertices[0].position;

        for i in 1..self.vertices.len().saturating_sub(1) {
            let edge_a = self.vertices[i].position - v0;
            let edge_b = self.vertices[i + 1].position - v0;
            let to_hit = hit - v0;

            let d00 = edge_a.dot(edge_a);
            let d01 = edge_a.dot(edge_b);
            let d11 = edge_b.dot(edge_b);
            let d20 = to_hit.dot(edge_a);
            let d21 = to_hit.dot(edge_b);

            let denom = d00 * d11 - d01 * d01;
            if denom.abs() < f32::EPSILON {
                continue; // degenerate fan triangle
            }

            let u = (d11 * d20 - d01 * d21) / denom;
            let v = (d00 * d21 - d01 * d20) / denom;
            if u >= -BARYCENTRIC_EPSILON
                && v >= -BARYCENTRIC_EPSILON
                && u + v <= 1.0 + BARYCENTRIC_EPSILON
            {
                return Some(t);
            }
        }

        None
    }

    /// Convex-convex overlap test between two polygons.
    ///
    /// Both polygons must straddle each other's supporting plane; the
    /// mutual intersection then lies along the planes' intersection
    /// line, and the polygons overlap iff the 1-D intervals they occupy
    /// on that line do. Used by portal/antiportal checks outside the
    /// rendering-critical path.
    pub fn overlaps(&self, other: &ConvexPolygon) -> bool {
        if self.classify(&other.plane) != PlaneSide::Straddling {
            return false;
        }
        if other.classify(&self.plane) != PlaneSide::Straddling {
            return false;
        }

        let axis = self.plane.normal.cross(other.plane.normal);
        if axis.length_squared() < f32::EPSILON {
            // Straddling checks above already exclude coplanar loops
            return false;
        }

        let (self_min, self_max) = match self.crossing_interval(&other.plane, axis) {
            Some(interval) => interval,
            None => return false,
        };
        let (other_min, other_max) = match other.crossing_interval(&self.plane, axis) {
            Some(interval) => interval,
            None => return false,
        };

        self_max >= other_min - PLANE_EPSILON && other_max >= self_min - PLANE_EPSILON
    }

    /// Interval this polygon's boundary occupies along `axis` where it
    /// crosses `plane`.
    fn crossing_interval(&self, plane: &Plane, axis: Vec3) -> Option<(f32, f32)> {
        let n = self.vertices.len();
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut found = false;

        for i in 0..n {
            let j = (i + 1) % n;
            let a = self.vertices[i].position;
            let b = self.vertices[j].position;
            let da = plane.signed_distance(a);
            let db = plane.signed_distance(b);

            let crossing = if da.abs() <= PLANE_EPSILON {
                Some(a)
            } else if (da > 0.0) != (db > 0.0) {
                let t = da / (da - db);
                Some(a.lerp(b, t))
            } else {
                None
            };

            if let Some(point) = crossing {
                let s = axis.dot(point);
                min = min.min(s);
                max = max.max(s);
                found = true;
            }
        }

        found.then_some((min, max))
    }
}

#[cfg(test)]
#[path = "polygon_tests.rs"]
mod tests;
