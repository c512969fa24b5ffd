/// OrientedBounds — six-faced oriented bounding volume.
///
/// An axis-aligned extent promoted to six convex quad faces, carried in
/// two spaces at once: base faces built by `rebuild`, and world faces
/// refreshed whenever the owning transform changes. Rendering code
/// culls the world faces through portal frustums; collision code reuses
/// the pairwise separating-axis test, entirely decoupled from frustums.
///
/// Transforms are assumed rigid (rotation + translation): the SAT
/// projects the stored half-extents onto world axes.

use glam::{Mat4, Vec2, Vec3, Vec4};
use crate::error::{Error, Result};
use crate::geom::{ConvexPolygon, Plane, PolyVertex};

/// Number of faces of a bounding volume.
pub const FACE_COUNT: usize = 6;

/// Face indices
pub const FACE_UP: usize = 0;
pub const FACE_DOWN: usize = 1;
pub const FACE_POS_X: usize = 2;
pub const FACE_NEG_X: usize = 3;
pub const FACE_POS_Z: usize = 4;
pub const FACE_NEG_Z: usize = 5;

/// Outward normal per face, Y-up.
const FACE_NORMALS: [Vec3; FACE_COUNT] =
    [Vec3::Y, Vec3::NEG_Y, Vec3::X, Vec3::NEG_X, Vec3::Z, Vec3::NEG_Z];

/// Corner indices per face, wound CCW seen from outside.
///
/// Corners are numbered with bit 0 = x, bit 1 = y, bit 2 = z
/// (0 = min, 1 = max per axis).
const FACE_CORNERS: [[usize; 4]; FACE_COUNT] = [
    [2, 6, 7, 3], // up    (+y)
    [0, 1, 5, 4], // down  (-y)
    [1, 3, 7, 5], // +x
    [0, 4, 6, 2], // -x
    [4, 5, 7, 6], // +z
    [0, 2, 3, 1], // -z
];

/// UV corners per face, in winding order.
const FACE_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

/// Six-faced oriented bounding volume.
///
/// Created once per owning object; `rebuild` on bounding-box change,
/// `update_world` after the owning transform changes.
#[derive(Debug, Clone)]
pub struct OrientedBounds {
    /// Faces of the axis-aligned extent, base space
    base_faces: [ConvexPolygon; FACE_COUNT],
    /// Base faces carried into world space by `transform`
    world_faces: [ConvexPolygon; FACE_COUNT],
    /// Base-space center
    center: Vec3,
    /// World-space center (== `center` when no transform is set)
    world_center: Vec3,
    /// Half-size per local axis
    half_extents: Vec3,
    /// Radius of the bounding sphere: `|half_extents|`
    inner_radius: f32,
    /// World transform supplied by the owner, if any
    transform: Option<Mat4>,
}

impl OrientedBounds {
    /// Build a volume from an axis-aligned extent, no transform attached.
    ///
    /// Returns `Error::DegenerateGeometry` when `min > max` on any axis.
    pub fn new(min: Vec3, max: Vec3) -> Result<Self> {
        if min.x > max.x || min.y > max.y || min.z > max.z {
            return Err(Error::DegenerateGeometry(format!(
                "inverted extent: min {:?} > max {:?}",
                min, max
            )));
        }

        let center = (min + max) * 0.5;
        let half_extents = (max - min) * 0.5;
        let base_faces = build_faces(min, max);

        Ok(Self {
            world_faces: base_faces.clone(),
            base_faces,
            center,
            world_center: center,
            half_extents,
            inner_radius: half_extents.length(),
            transform: None,
        })
    }

    /// Recompute the base faces from a new axis-aligned extent.
    ///
    /// Shared corners between faces are copied from one corner table so
    /// shared edges stay bit-identical. The world faces are refreshed
    /// afterwards with the current transform.
    pub fn rebuild(&mut self, min: Vec3, max: Vec3) -> Result<()> {
        if min.x > max.x || min.y > max.y || min.z > max.z {
            return Err(Error::DegenerateGeometry(format!(
                "inverted extent: min {:?} > max {:?}",
                min, max
            )));
        }

        self.center = (min + max) * 0.5;
        self.half_extents = (max - min) * 0.5;
        self.inner_radius = self.half_extents.length();
        self.base_faces = build_faces(min, max);
        self.update_world();
        Ok(())
    }

    /// Attach or detach the world transform and refresh the world faces.
    pub fn set_transform(&mut self, transform: Option<Mat4>) {
        self.transform = transform;
        self.update_world();
    }

    /// Refresh the world-space faces and center from the base faces.
    ///
    /// With a transform: every vertex position and normal is carried
    /// into world space, and each face plane's distance is recomputed
    /// from its first transformed vertex so the plane always passes
    /// exactly through the transformed geometry. Without: the base
    /// faces are copied verbatim.
    pub fn update_world(&mut self) {
        match self.transform {
            Some(matrix) => {
                for (world, base) in self.world_faces.iter_mut().zip(&self.base_faces) {
                    for (wv, bv) in world.vertices.iter_mut().zip(&base.vertices) {
                        wv.position = matrix.transform_point3(bv.position);
                        wv.normal = matrix.transform_vector3(bv.normal);
                        wv.color = bv.color;
                        wv.uv = bv.uv;
                    }
                    let normal = matrix.transform_vector3(base.plane.normal);
                    world.plane =
                        Plane::from_point_normal(world.vertices[0].position, normal);
                }
                self.world_center = matrix.transform_point3(self.center);
            }
            None => {
                self.world_faces = self.base_faces.clone();
                self.world_center = self.center;
            }
        }
    }

    // ===== GETTERS =====

    /// Base-space center.
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// World-space center.
    pub fn world_center(&self) -> Vec3 {
        self.world_center
    }

    /// Half-size per local axis.
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// Radius of the enclosing sphere.
    pub fn inner_radius(&self) -> f32 {
        self.inner_radius
    }

    /// The six base-space faces.
    pub fn base_faces(&self) -> &[ConvexPolygon; FACE_COUNT] {
        &self.base_faces
    }

    /// The six world-space faces.
    pub fn world_faces(&self) -> &[ConvexPolygon; FACE_COUNT] {
        &self.world_faces
    }

    /// The attached world transform, if any.
    pub fn transform(&self) -> Option<&Mat4> {
        self.transform.as_ref()
    }

    /// Local axes carried into world space (identity when untransformed).
    fn world_axes(&self) -> [Vec3; 3] {
        match self.transform {
            Some(matrix) => [
                matrix.x_axis.truncate().normalize(),
                matrix.y_axis.truncate().normalize(),
                matrix.z_axis.truncate().normalize(),
            ],
            None => [Vec3::X, Vec3::Y, Vec3::Z],
        }
    }

    // ===== SAT =====

    /// Pairwise overlap test: classic 15-axis separating-axis test.
    ///
    /// Tests this volume's 3 axes, the other's 3 axes, and the 9 cross
    /// products, early-exiting on the first separating axis. Exact for
    /// convex boxes with orthonormal bases.
    pub fn overlaps(&self, other: &OrientedBounds) -> bool {
        // Absolute rotation terms get a small epsilon so near-parallel
        // edge pairs do not produce a false separating axis.
        const AXIS_EPSILON: f32 = 1e-6;

        let a_axes = self.world_axes();
        let b_axes = other.world_axes();
        let a_ext = self.half_extents;
        let b_ext = other.half_extents;

        // Center separation expressed in this volume's local basis
        let delta = other.world_center - self.world_center;
        let t = [
            delta.dot(a_axes[0]),
            delta.dot(a_axes[1]),
            delta.dot(a_axes[2]),
        ];

        // Relative rotation and its absolute value
        let mut r = [[0.0f32; 3]; 3];
        let mut abs_r = [[0.0f32; 3]; 3];
        for i in 0..3 {
            for k in 0..3 {
                r[i][k] = a_axes[i].dot(b_axes[k]);
                abs_r[i][k] = r[i][k].abs() + AXIS_EPSILON;
            }
        }

        // This volume's axes
        for i in 0..3 {
            let ra = a_ext[i];
            let rb = b_ext[0] * abs_r[i][0] + b_ext[1] * abs_r[i][1] + b_ext[2] * abs_r[i][2];
            if t[i].abs() > ra + rb {
                return false;
            }
        }

        // Other volume's axes
        for k in 0..3 {
            let ra = a_ext[0] * abs_r[0][k] + a_ext[1] * abs_r[1][k] + a_ext[2] * abs_r[2][k];
            let rb = b_ext[k];
            let separation = (t[0] * r[0][k] + t[1] * r[1][k] + t[2] * r[2][k]).abs();
            if separation > ra + rb {
                return false;
            }
        }

        // Cross products of one axis from each (cyclic index form)
        for i in 0..3 {
            let i1 = (i + 1) % 3;
            let i2 = (i + 2) % 3;
            for k in 0..3 {
                let k1 = (k + 1) % 3;
                let k2 = (k + 2) % 3;
                let ra = a_ext[i1] * abs_r[i2][k] + a_ext[i2] * abs_r[i1][k];
                let rb = b_ext[k1] * abs_r[i][k2] + b_ext[k2] * abs_r[i][k1];
                let separation = (t[i2] * r[i1][k] - t[i1] * r[i2][k]).abs();
                if separation > ra + rb {
                    return false;
                }
            }
        }

        true
    }
}

/// Build the six quad faces of the extent `[min, max]`.
///
/// The 8 corners are computed once; faces copy corners from that table,
/// never recompute them, so shared edges match bit for bit.
fn build_faces(min: Vec3, max: Vec3) -> [ConvexPolygon; FACE_COUNT] {
    let corners = [
        Vec3::new(min.x, min.y, min.z),
        Vec3::new(max.x, min.y, min.z),
        Vec3::new(min.x, max.y, min.z),
        Vec3::new(max.x, max.y, min.z),
        Vec3::new(min.x, min.y, max.z),
        Vec3::new(max.x, min.y, max.z),
        Vec3::new(min.x, max.y, max.z),
        Vec3::new(max.x, max.y, max.z),
    ];

    std::array::from_fn(|face| {
        let normal = FACE_NORMALS[face];
        let vertices = FACE_CORNERS[face]
            .iter()
            .zip(FACE_UVS)
            .map(|(&corner, uv)| PolyVertex {
                position: corners[corner],
                normal,
                color: Vec4::ONE,
                uv,
            })
            .collect();
        ConvexPolygon::new(
            vertices,
            Plane::from_point_normal(corners[FACE_CORNERS[face][0]], normal),
        )
    })
}

#[cfg(test)]
#[path = "oriented_bounds_tests.rs"]
mod tests;
