use glam::Vec3;
use super::*;

// ============================================================================
// Helpers
// ============================================================================

/// Frustum with a unit-ish square window at z = 0 seen from (0, 0, 5).
fn window_frustum(half: f32) -> PortalFrustum {
    let mut frustum = PortalFrustum::blank();
    frustum.vertices = vec![
        Vec3::new(-half, -half, 0.0),
        Vec3::new(half, -half, 0.0),
        Vec3::new(half, half, 0.0),
        Vec3::new(-half, half, 0.0),
    ];
    frustum.origin = Vec3::new(0.0, 0.0, 5.0);
    frustum.norm = Plane::from_point_normal(frustum.origin, Vec3::NEG_Z);
    frustum
}

// ============================================================================
// clip_with_distances
// ============================================================================

#[test]
fn test_clip_all_inside_is_noop() {
    let mut frustum = window_frustum(1.0);
    let before = frustum.vertices.clone();

    let count = frustum.clip_with_distances(&[4.0, 4.0, 6.0, 6.0]);

    assert_eq!(count, 4);
    assert_eq!(frustum.vertices, before);
}

#[test]
fn test_clip_all_outside_empties_the_loop() {
    let mut frustum = window_frustum(1.0);
    let count = frustum.clip_with_distances(&[-4.0, -4.0, -6.0, -6.0]);
    assert_eq!(count, 0);
    assert!(frustum.vertices.is_empty());
}

#[test]
fn test_clip_crossing_plane_emits_seam_vertices() {
    let mut frustum = window_frustum(1.0);
    // Distances of the square's corners from the plane x = 0 (keep x >= 0)
    let count = frustum.clip_with_distances(&[-1.0, 1.0, 1.0, -1.0]);

    assert_eq!(count, 4);
    let expected = [
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::new(1.0, -1.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ];
    for (vertex, want) in frustum.vertices.iter().zip(expected) {
        assert!(vertex.distance(want) < 1e-5, "got {vertex:?}, want {want:?}");
    }
}

#[test]
fn test_clip_on_plane_vertices_are_kept() {
    let mut frustum = window_frustum(1.0);
    // Two corners inside the tolerance band, two clearly in front
    let count = frustum.clip_with_distances(&[0.0, 1.0, 1.0, 0.01]);
    assert_eq!(count, 4);
}

#[test]
fn test_clip_merges_sliver_vertices() {
    let mut frustum = window_frustum(0.5);
    // Crossings land within the edge tolerance of the kept corners; the
    // merged loop collapses below 3 vertices
    let count = frustum.clip_with_distances(&[-10.0, 0.021, 0.021, -10.0]);
    assert!(count < 3, "sliver survived with {count} vertices");
}

// ============================================================================
// rebuild_edge_planes
// ============================================================================

#[test]
fn test_edge_planes_pass_through_origin_and_window() {
    let mut frustum = window_frustum(1.0);
    frustum.rebuild_edge_planes();

    assert_eq!(frustum.planes.len(), 4);
    for plane in &frustum.planes {
        assert!(
            plane.signed_distance(frustum.origin).abs() < 1e-5,
            "edge plane misses the camera"
        );
        for vertex in &frustum.vertices {
            assert!(
                plane.signed_distance(*vertex) >= -1e-4,
                "window vertex behind its own edge plane"
            );
        }
    }
}

#[test]
fn test_edge_planes_face_the_window_interior() {
    let mut frustum = window_frustum(1.0);
    frustum.rebuild_edge_planes();

    let centroid = Vec3::ZERO;
    for plane in &frustum.planes {
        assert!(plane.signed_distance(centroid) > 0.0);
    }
    // A point far to the right must fall behind at least one plane
    let outside = Vec3::new(10.0, 0.0, 0.0);
    assert!(frustum.planes.iter().any(|p| p.signed_distance(outside) < 0.0));
}

#[test]
fn test_edge_planes_require_three_vertices() {
    let mut frustum = window_frustum(1.0);
    frustum.vertices.truncate(2);
    frustum.rebuild_edge_planes();
    assert!(frustum.planes.is_empty());
}
