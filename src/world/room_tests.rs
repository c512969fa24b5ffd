use glam::Vec3;
use super::*;
use crate::visibility::FrustumId;
use crate::world::Portal;

fn portal_quad(to: RoomKey) -> Portal {
    Portal::from_positions(
        &[
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ],
        to,
    )
    .unwrap()
}

#[test]
fn test_add_and_remove_rooms() {
    let mut graph = RoomGraph::new();
    assert!(graph.is_empty());

    let a = graph.add_room();
    let b = graph.add_room();
    assert_eq!(graph.len(), 2);

    assert!(graph.remove_room(a));
    assert!(!graph.remove_room(a), "double remove must fail");
    assert!(graph.room(a).is_none());
    assert!(graph.room(b).is_some(), "other keys stay valid");
}

#[test]
fn test_rooms_start_active() {
    let mut graph = RoomGraph::new();
    let a = graph.add_room();
    assert!(graph.room(a).unwrap().is_active());

    assert!(graph.set_active(a, false));
    assert!(!graph.room(a).unwrap().is_active());
}

#[test]
fn test_add_portal_wires_source_room() {
    let mut graph = RoomGraph::new();
    let a = graph.add_room();
    let b = graph.add_room();

    assert!(graph.add_portal(a, portal_quad(b)));
    assert_eq!(graph.room(a).unwrap().portals().len(), 1);
    assert_eq!(graph.room(a).unwrap().portals()[0].to_room(), b);

    graph.remove_room(a);
    assert!(!graph.add_portal(a, portal_quad(b)), "dead source room");
}

#[test]
fn test_translate_room_moves_portals() {
    let mut graph = RoomGraph::new();
    let a = graph.add_room();
    let b = graph.add_room();
    graph.add_portal(a, portal_quad(b));

    assert!(graph.translate_room(a, Vec3::new(0.0, 0.0, 5.0)));
    let moved = &graph.room(a).unwrap().portals()[0];
    for vertex in &moved.polygon().vertices {
        assert!((vertex.position.z - 5.0).abs() < 1e-6);
    }
}

#[test]
fn test_clear_frustums_clears_every_room() {
    let mut graph = RoomGraph::new();
    let a = graph.add_room();
    let b = graph.add_room();

    graph.push_frustum(a, FrustumId(0));
    graph.push_frustum(b, FrustumId(1));
    assert_eq!(graph.room(a).unwrap().frustums().len(), 1);

    graph.clear_frustums();
    assert!(graph.room(a).unwrap().frustums().is_empty());
    assert!(graph.room(b).unwrap().frustums().is_empty());
}
