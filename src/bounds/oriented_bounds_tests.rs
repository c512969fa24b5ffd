use glam::{Mat4, Quat, Vec3};
use super::*;

fn unit_box_at(center: Vec3, half: f32) -> OrientedBounds {
    OrientedBounds::new(center - Vec3::splat(half), center + Vec3::splat(half))
        .expect("valid extent")
}

// ============================================================================
// rebuild
// ============================================================================

#[test]
fn test_new_computes_center_extents_radius() {
    let obv = OrientedBounds::new(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(1.0, 2.0, 3.0))
        .unwrap();

    assert_eq!(obv.center(), Vec3::ZERO);
    assert_eq!(obv.half_extents(), Vec3::new(1.0, 2.0, 3.0));
    assert!((obv.inner_radius() - Vec3::new(1.0, 2.0, 3.0).length()).abs() < 1e-6);
}

#[test]
fn test_new_rejects_inverted_extent() {
    let result = OrientedBounds::new(Vec3::splat(1.0), Vec3::splat(-1.0));
    assert!(matches!(result, Err(crate::Error::DegenerateGeometry(_))));
}

#[test]
fn test_faces_are_valid_quads_with_outward_planes() {
    let obv = unit_box_at(Vec3::ZERO, 1.0);

    for (i, face) in obv.base_faces().iter().enumerate() {
        assert_eq!(face.vertices.len(), 4, "face {} must be a quad", i);
        assert!(!face.is_broken(), "face {} must not be broken", i);

        // Every face vertex lies on the face plane
        for vertex in &face.vertices {
            assert!(
                face.plane.signed_distance(vertex.position).abs() < 1e-6,
                "face {} vertex off its plane",
                i
            );
        }

        // Plane faces outward: the center is behind it
        assert!(face.plane.signed_distance(obv.center()) < 0.0);
    }
}

#[test]
fn test_face_normals_match_indices() {
    let obv = unit_box_at(Vec3::ZERO, 1.0);
    let faces = obv.base_faces();
    assert_eq!(faces[FACE_UP].plane.normal, Vec3::Y);
    assert_eq!(faces[FACE_DOWN].plane.normal, Vec3::NEG_Y);
    assert_eq!(faces[FACE_POS_X].plane.normal, Vec3::X);
    assert_eq!(faces[FACE_NEG_X].plane.normal, Vec3::NEG_X);
    assert_eq!(faces[FACE_POS_Z].plane.normal, Vec3::Z);
    assert_eq!(faces[FACE_NEG_Z].plane.normal, Vec3::NEG_Z);
}

#[test]
fn test_shared_corners_are_bit_identical() {
    let obv = unit_box_at(Vec3::new(0.3, -0.7, 1.9), 0.77);

    // The max corner is shared by up, +x and +z
    let up_max = obv.base_faces()[FACE_UP]
        .vertices
        .iter()
        .map(|v| v.position)
        .find(|p| p.x > 0.3 && p.z > 1.9)
        .unwrap();
    for face in [FACE_POS_X, FACE_POS_Z] {
        assert!(
            obv.base_faces()[face].vertices.iter().any(|v| v.position == up_max),
            "shared corner must match bit for bit"
        );
    }
}

#[test]
fn test_rebuild_replaces_extent() {
    let mut obv = unit_box_at(Vec3::ZERO, 1.0);
    obv.rebuild(Vec3::new(9.0, 9.0, 9.0), Vec3::new(11.0, 11.0, 11.0)).unwrap();
    assert_eq!(obv.center(), Vec3::splat(10.0));
    assert_eq!(obv.half_extents(), Vec3::ONE);
    assert_eq!(obv.world_center(), Vec3::splat(10.0));
}

// ============================================================================
// update_world
// ============================================================================

#[test]
fn test_identity_transform_reproduces_base_exactly() {
    let mut obv = unit_box_at(Vec3::new(1.0, 2.0, 3.0), 1.0);
    obv.set_transform(Some(Mat4::IDENTITY));

    for (world, base) in obv.world_faces().iter().zip(obv.base_faces()) {
        for (wv, bv) in world.vertices.iter().zip(&base.vertices) {
            assert_eq!(wv.position, bv.position, "identity transform must not drift");
        }
    }
    assert_eq!(obv.world_center(), obv.center());
}

#[test]
fn test_no_transform_copies_base_faces() {
    let mut obv = unit_box_at(Vec3::ZERO, 1.0);
    obv.set_transform(Some(Mat4::from_translation(Vec3::X)));
    obv.set_transform(None);

    for (world, base) in obv.world_faces().iter().zip(obv.base_faces()) {
        assert_eq!(world, base);
    }
}

#[test]
fn test_transform_carries_planes_through_geometry() {
    let mut obv = unit_box_at(Vec3::ZERO, 1.0);
    let matrix = Mat4::from_rotation_translation(
        Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0).normalize(), 0.9),
        Vec3::new(4.0, -2.0, 7.0),
    );
    obv.set_transform(Some(matrix));

    for face in obv.world_faces() {
        assert!(!face.is_broken());
        for vertex in &face.vertices {
            // Plane distance is recomputed from transformed geometry: no drift
            assert!(face.plane.signed_distance(vertex.position).abs() < 1e-4);
        }
        assert!(face.plane.signed_distance(obv.world_center()) < 0.0);
    }
}

// ============================================================================
// overlaps (SAT)
// ============================================================================

#[test]
fn test_disjoint_axis_aligned_boxes_do_not_overlap() {
    let a = unit_box_at(Vec3::ZERO, 1.0);
    let b = unit_box_at(Vec3::new(5.0, 0.0, 0.0), 1.0);
    assert!(!a.overlaps(&b));
    assert!(!b.overlaps(&a));
}

#[test]
fn test_touching_axis_aligned_boxes_overlap_per_axis() {
    // Disjoint on exactly one axis is enough for separation
    let a = unit_box_at(Vec3::ZERO, 1.0);
    let b = unit_box_at(Vec3::new(1.5, 0.0, 0.0), 1.0); // overlap on x too
    assert!(a.overlaps(&b));

    let c = unit_box_at(Vec3::new(1.5, 5.0, 0.0), 1.0); // separated on y only
    assert!(!a.overlaps(&c));
}

#[test]
fn test_contained_box_overlaps() {
    let outer = unit_box_at(Vec3::ZERO, 5.0);
    let inner = unit_box_at(Vec3::new(0.5, -0.5, 0.25), 0.5);
    assert!(outer.overlaps(&inner));
    assert!(inner.overlaps(&outer));
}

#[test]
fn test_rotation_invariance() {
    let mut a = unit_box_at(Vec3::ZERO, 1.0);
    let mut b = unit_box_at(Vec3::new(2.5, 0.0, 0.0), 1.0);
    let before = a.overlaps(&b);

    // The same rigid rotation applied to both must not change the result
    let rotation = Mat4::from_quat(Quat::from_euler(glam::EulerRot::XYZ, 0.7, -1.1, 0.4));
    a.set_transform(Some(rotation));
    b.set_transform(Some(rotation));

    assert_eq!(a.overlaps(&b), before);
}

#[test]
fn test_crossing_thin_boxes_overlap() {
    // Two long thin boxes crossing at right angles through the origin
    let mut a = OrientedBounds::new(
        Vec3::new(-3.0, -0.1, -0.1),
        Vec3::new(3.0, 0.1, 0.1),
    )
    .unwrap();
    let b = OrientedBounds::new(
        Vec3::new(-0.1, -3.0, -0.1),
        Vec3::new(0.1, 3.0, 0.1),
    )
    .unwrap();
    assert!(a.overlaps(&b));

    // Lift the first clear of the other's Z extent: separated again
    a.set_transform(Some(Mat4::from_rotation_translation(
        Quat::from_rotation_z(std::f32::consts::FRAC_PI_4),
        Vec3::new(0.0, 0.0, 0.5),
    )));
    assert!(!a.overlaps(&b));
}

#[test]
fn test_rotated_box_projected_reach() {
    // A cube rotated 45 degrees about Y projects to half-width sqrt(2)
    // on the world X axis; a second cube probes both sides of that reach.
    let mut a = unit_box_at(Vec3::ZERO, 1.0);
    a.set_transform(Some(Mat4::from_quat(Quat::from_rotation_y(
        std::f32::consts::FRAC_PI_4,
    ))));

    let near = unit_box_at(Vec3::new(2.3, 0.0, 0.0), 1.0);
    assert!(a.overlaps(&near), "within projected reach {:.3} + 1", 2.0f32.sqrt());

    let far = unit_box_at(Vec3::new(3.5, 0.0, 0.0), 1.0);
    assert!(!a.overlaps(&far));
}
