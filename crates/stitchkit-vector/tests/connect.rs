//! Integration tests for point-to-point connections.

use stitchkit_core::{Point, PathId, VectorError};
use stitchkit_vector::Engine;

fn segment(engine: &mut Engine, from: Point, to: Point) -> PathId {
    engine.start_path(from).unwrap();
    engine.add_point(to).unwrap();
    engine.finish(false).unwrap()
}

#[test]
fn connection_bridges_two_paths_with_a_new_open_path() {
    let mut engine = Engine::new();
    let a = segment(&mut engine, Point::new(0.0, 0.0), Point::new(50.0, 0.0));
    let b = segment(&mut engine, Point::new(0.0, 100.0), Point::new(50.0, 100.0));
    let end_a = engine.path(a).unwrap().anchors[1].id;
    let start_b = engine.path(b).unwrap().anchors[0].id;

    let bridge = engine.connect_points(a, end_a, b, start_b).unwrap();

    let path = engine.path(bridge).unwrap();
    assert_eq!(path.anchors.len(), 2);
    assert!(!path.closed);
    assert_eq!(path.fill_opacity, 0.0);
    assert_eq!(path.anchors[0].position, Point::new(50.0, 0.0));
    assert_eq!(path.anchors[1].position, Point::new(0.0, 100.0));
    assert_eq!(engine.selected_paths(), &[bridge]);
}

#[test]
fn source_anchors_are_left_untouched() {
    let mut engine = Engine::new();
    let a = segment(&mut engine, Point::new(0.0, 0.0), Point::new(50.0, 0.0));
    let b = segment(&mut engine, Point::new(0.0, 100.0), Point::new(50.0, 100.0));
    let end_a = engine.path(a).unwrap().anchors[1].id;
    let start_b = engine.path(b).unwrap().anchors[0].id;

    engine.connect_points(a, end_a, b, start_b).unwrap();

    assert_eq!(engine.path(a).unwrap().anchors.len(), 2);
    assert_eq!(engine.path(b).unwrap().anchors.len(), 2);
}

#[test]
fn self_connection_is_rejected_without_mutation() {
    let mut engine = Engine::new();
    let a = segment(&mut engine, Point::new(0.0, 0.0), Point::new(50.0, 0.0));
    let anchor = engine.path(a).unwrap().anchors[0].id;
    let before = engine.visible_paths().len();

    let err = engine.connect_points(a, anchor, a, anchor).unwrap_err();
    assert!(matches!(err, VectorError::InvalidOperation { .. }));
    assert_eq!(engine.visible_paths().len(), before);
}

#[test]
fn connecting_within_one_path_is_allowed() {
    let mut engine = Engine::new();
    let a = segment(&mut engine, Point::new(0.0, 0.0), Point::new(50.0, 0.0));
    let first = engine.path(a).unwrap().anchors[0].id;
    let second = engine.path(a).unwrap().anchors[1].id;

    let bridge = engine.connect_points(a, first, a, second).unwrap();
    assert_eq!(engine.path(bridge).unwrap().anchors.len(), 2);
}

#[test]
fn missing_endpoints_are_reported_in_order() {
    let mut engine = Engine::new();
    let a = segment(&mut engine, Point::new(0.0, 0.0), Point::new(50.0, 0.0));
    let anchor = engine.path(a).unwrap().anchors[0].id;

    let err = engine
        .connect_points(PathId(9999), anchor, a, anchor)
        .unwrap_err();
    assert!(matches!(err, VectorError::PathNotFound { .. }));

    let err = engine
        .connect_points(a, stitchkit_core::AnchorId(9999), a, anchor)
        .unwrap_err();
    assert!(matches!(err, VectorError::AnchorNotFound { .. }));
}

#[test]
fn connections_land_on_the_active_layer() {
    let mut engine = Engine::new();
    let a = segment(&mut engine, Point::new(0.0, 0.0), Point::new(50.0, 0.0));
    let b = segment(&mut engine, Point::new(0.0, 100.0), Point::new(50.0, 100.0));
    let end_a = engine.path(a).unwrap().anchors[1].id;
    let start_b = engine.path(b).unwrap().anchors[0].id;

    let second = engine.add_layer(None);
    let bridge = engine.connect_points(a, end_a, b, start_b).unwrap();

    assert_eq!(engine.path(bridge).unwrap().layer, second);
    let layer = engine.store().layer(second).unwrap();
    assert!(layer.paths.iter().any(|p| p.id == bridge));
}
