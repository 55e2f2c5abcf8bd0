//! Integration tests for corner/smooth conversion and curve sculpting.

use stitchkit_core::{Point, PathId};
use stitchkit_vector::{AnchorKind, CurveDirection, Engine};

fn zigzag(engine: &mut Engine) -> PathId {
    engine.start_path(Point::new(0.0, 0.0)).unwrap();
    engine.add_point(Point::new(50.0, 0.0)).unwrap();
    engine.add_point(Point::new(100.0, 0.0)).unwrap();
    engine.finish(false).unwrap()
}

#[test]
fn smooth_conversion_gives_middle_anchor_both_handles() {
    let mut engine = Engine::new();
    let id = zigzag(&mut engine);
    let middle = engine.path(id).unwrap().anchors[1].id;

    engine
        .convert_point_type(id, middle, AnchorKind::Smooth)
        .unwrap();

    let path = engine.path(id).unwrap();
    let anchor = &path.anchors[1];
    assert_eq!(anchor.kind, AnchorKind::Smooth);
    let control_in = anchor.control_in.unwrap().position;
    let control_out = anchor.control_out.unwrap().position;
    assert!(control_in.distance_to(&Point::new(35.0, 0.0)) < 1e-9);
    assert!(control_out.distance_to(&Point::new(65.0, 0.0)) < 1e-9);
}

#[test]
fn smooth_conversion_fixes_up_both_neighbors() {
    let mut engine = Engine::new();
    let id = zigzag(&mut engine);
    let middle = engine.path(id).unwrap().anchors[1].id;

    engine
        .convert_point_type(id, middle, AnchorKind::Smooth)
        .unwrap();

    // The adjoining anchors get counterpart handles on the shared
    // sides, so both segments actually curve.
    let path = engine.path(id).unwrap();
    assert!(path.anchors[0].control_out.is_some());
    assert!(path.anchors[2].control_in.is_some());
    let commands = stitchkit_vector::generate_path_data(path);
    assert!(commands
        .iter()
        .all(|c| !matches!(c, stitchkit_vector::DrawCommand::LineTo(_))));
}

#[test]
fn corner_conversion_drops_handles_and_leaves_neighbors() {
    let mut engine = Engine::new();
    let id = zigzag(&mut engine);
    let middle = engine.path(id).unwrap().anchors[1].id;
    engine
        .convert_point_type(id, middle, AnchorKind::Smooth)
        .unwrap();

    engine
        .convert_point_type(id, middle, AnchorKind::Corner)
        .unwrap();

    let path = engine.path(id).unwrap();
    let anchor = &path.anchors[1];
    assert_eq!(anchor.kind, AnchorKind::Corner);
    assert!(anchor.control_in.is_none());
    assert!(anchor.control_out.is_none());
    assert!(path.anchors[0].control_out.is_some());
}

#[test]
fn endpoint_conversion_mirrors_a_shorter_open_handle() {
    let mut engine = Engine::new();
    engine.start_path(Point::new(0.0, 0.0)).unwrap();
    engine.add_point(Point::new(100.0, 0.0)).unwrap();
    let id = engine.finish(false).unwrap();
    let first = engine.path(id).unwrap().anchors[0].id;

    engine
        .convert_point_type(id, first, AnchorKind::Smooth)
        .unwrap();

    let anchor = &engine.path(id).unwrap().anchors[0];
    let control_out = anchor.control_out.unwrap().position;
    let control_in = anchor.control_in.unwrap().position;
    // 0.3 of the neighbor distance toward it, 0.6 of that mirrored away.
    assert!(control_out.distance_to(&Point::new(30.0, 0.0)) < 1e-9);
    assert!(control_in.distance_to(&Point::new(-18.0, 0.0)) < 1e-9);
}

#[test]
fn bezier_conversion_respects_explicit_direction() {
    let mut engine = Engine::new();
    let id = zigzag(&mut engine);
    let middle = engine.path(id).unwrap().anchors[1].id;

    engine
        .convert_to_bezier(id, middle, CurveDirection::Up, 50.0)
        .unwrap();

    let anchor = &engine.path(id).unwrap().anchors[1];
    let control_in = anchor.control_in.unwrap().position;
    let control_out = anchor.control_out.unwrap().position;
    // Reach is 0.25 of the 100-unit neighbor span; Up biases -20 in y.
    assert!(control_in.distance_to(&Point::new(25.0, -20.0)) < 1e-9);
    assert!(control_out.distance_to(&Point::new(75.0, -20.0)) < 1e-9);
}

#[test]
fn bezier_conversion_caps_reach_at_strength() {
    let mut engine = Engine::new();
    let id = zigzag(&mut engine);
    let middle = engine.path(id).unwrap().anchors[1].id;

    engine
        .convert_to_bezier(id, middle, CurveDirection::Down, 10.0)
        .unwrap();

    let anchor = &engine.path(id).unwrap().anchors[1];
    let control_in = anchor.control_in.unwrap().position;
    assert!(control_in.distance_to(&Point::new(40.0, 20.0)) < 1e-9);
}

#[test]
fn auto_direction_bows_away_from_the_anchor_side() {
    let mut engine = Engine::new();
    engine.start_path(Point::new(0.0, 0.0)).unwrap();
    engine.add_point(Point::new(50.0, 30.0)).unwrap();
    engine.add_point(Point::new(100.0, 0.0)).unwrap();
    let id = engine.finish(false).unwrap();
    let middle = engine.path(id).unwrap().anchors[1].id;

    engine
        .convert_to_bezier(id, middle, CurveDirection::Auto, 50.0)
        .unwrap();

    // The anchor sits below the neighbor midpoint in canvas
    // coordinates (larger y), so the bias pushes further down.
    let anchor = &engine.path(id).unwrap().anchors[1];
    assert!(anchor.control_in.unwrap().position.y > 30.0);
    assert!(anchor.control_out.unwrap().position.y > 30.0);
}

#[test]
fn bezier_conversion_on_an_endpoint_only_sets_the_inner_side() {
    let mut engine = Engine::new();
    engine.start_path(Point::new(0.0, 0.0)).unwrap();
    engine.add_point(Point::new(100.0, 0.0)).unwrap();
    let id = engine.finish(false).unwrap();
    let last = engine.path(id).unwrap().anchors[1].id;

    engine
        .convert_to_bezier(id, last, CurveDirection::Auto, 50.0)
        .unwrap();

    let anchor = &engine.path(id).unwrap().anchors[1];
    // 0.4 of the neighbor distance, trailing back along the tangent.
    let control_in = anchor.control_in.unwrap().position;
    assert!(control_in.distance_to(&Point::new(60.0, 0.0)) < 1e-9);
    assert!(anchor.control_out.is_none());
}

#[test]
fn selected_anchors_convert_in_bulk() {
    let mut engine = Engine::new();
    let id = zigzag(&mut engine);
    let path = engine.path(id).unwrap();
    let (first, middle) = (path.anchors[0].id, path.anchors[1].id);

    engine.select_anchor(first, false);
    engine.select_anchor(middle, true);
    engine.convert_selected_to_smooth();

    let path = engine.path(id).unwrap();
    assert_eq!(path.anchors[0].kind, AnchorKind::Smooth);
    assert_eq!(path.anchors[1].kind, AnchorKind::Smooth);
    assert_eq!(path.anchors[2].kind, AnchorKind::Corner);
}
