/// Plane — oriented plane in 3D space.
///
/// Stored as a unit normal plus a signed offset, with the plane equation
/// `normal . p + distance = 0`. The positive half-space is the side the
/// normal points into. Normals are unit length by convention but not
/// enforced; `ConvexPolygon::is_broken` rejects planes that drift.

use glam::{Mat4, Vec3};

/// A plane `normal . p + distance = 0`.
///
/// Positive signed distance means "in front" (the side the normal
/// points toward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal pointing into the positive half-space.
    pub normal: Vec3,
    /// Signed offset from the origin (`normal . p + distance = 0`).
    pub distance: f32,
}

impl Plane {
    /// Create a plane from a normal and offset. No normalization is applied.
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Plane through `point` with the given normal.
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        Self {
            normal,
            distance: -normal.dot(point),
        }
    }

    /// Plane through three points, wound counter-clockwise as seen from
    /// the front side.
    ///
    /// Returns `None` if the points are collinear (degenerate cross
    /// product).
    pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Option<Self> {
        let normal = (b - a).cross(c - a);
        if normal.length_squared() < f32::EPSILON {
            return None;
        }
        let normal = normal.normalize();
        Some(Self::from_point_normal(a, normal))
    }

    /// Signed distance from `point` to the plane.
    ///
    /// Positive = in front (normal side), negative = behind.
    #[inline]
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }

    /// The same plane facing the other way.
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            distance: -self.distance,
        }
    }

    /// Transform the plane by a rigid matrix.
    ///
    /// The normal is rotated and the offset recomputed from a transformed
    /// point on the plane, so the result always passes exactly through
    /// the transformed geometry.
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        let normal = matrix.transform_vector3(self.normal);
        let point_on_plane = self.normal * -self.distance;
        Self::from_point_normal(matrix.transform_point3(point_on_plane), normal)
    }
}

#[cfg(test)]
#[path = "plane_tests.rs"]
mod tests;
