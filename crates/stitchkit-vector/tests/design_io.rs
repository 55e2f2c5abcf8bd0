//! Integration tests for design file persistence.

use stitchkit_core::Point;
use stitchkit_vector::{AnchorKind, DesignFile, Engine, LayerUpdate};

fn studio_document() -> Engine {
    let mut engine = Engine::with_canvas_size(1024.0, 768.0);

    engine.start_path(Point::new(0.0, 0.0)).unwrap();
    engine.add_point(Point::new(100.0, 0.0)).unwrap();
    engine.add_point(Point::new(100.0, 100.0)).unwrap();
    let outline = engine.finish(true).unwrap();
    let middle = engine.path(outline).unwrap().anchors[1].id;
    engine
        .convert_point_type(outline, middle, AnchorKind::Smooth)
        .unwrap();

    let details = engine.add_layer(Some("Details".to_string()));
    engine
        .update_layer(
            details,
            LayerUpdate {
                opacity: Some(0.5),
                locked: Some(true),
                ..Default::default()
            },
        )
        .unwrap();
    engine.start_path(Point::new(10.0, 10.0)).unwrap();
    engine.add_point(Point::new(40.0, 10.0)).unwrap();
    engine.finish(false).unwrap();

    engine
}

#[test]
fn round_trip_preserves_document_geometry() {
    let engine = studio_document();
    let file = DesignFile::from_engine(&engine, "vest");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vest.skv");
    file.save_to_file(&path).unwrap();
    let loaded = DesignFile::load_from_file(&path).unwrap();

    let mut restored = Engine::new();
    loaded.apply_to_engine(&mut restored).unwrap();

    assert_eq!(restored.canvas_size(), (1024.0, 768.0));
    let original_layers = engine.store().layers();
    let restored_layers = restored.store().layers();
    assert_eq!(original_layers.len(), restored_layers.len());

    for (original, restored) in original_layers.iter().zip(restored_layers) {
        assert_eq!(original.name, restored.name);
        assert_eq!(original.visible, restored.visible);
        assert_eq!(original.locked, restored.locked);
        assert_eq!(original.opacity, restored.opacity);
        assert_eq!(original.paths.len(), restored.paths.len());
        for (a, b) in original.paths.iter().zip(&restored.paths) {
            assert_eq!(a.closed, b.closed);
            assert_eq!(a.stroke_color, b.stroke_color);
            assert_eq!(a.fill_opacity, b.fill_opacity);
            assert_eq!(a.anchors.len(), b.anchors.len());
            for (x, y) in a.anchors.iter().zip(&b.anchors) {
                assert_eq!(x.position, y.position);
                assert_eq!(x.kind, y.kind);
                assert_eq!(
                    x.control_in.map(|h| h.position),
                    y.control_in.map(|h| h.position)
                );
                assert_eq!(
                    x.control_out.map(|h| h.position),
                    y.control_out.map(|h| h.position)
                );
            }
        }
    }
}

#[test]
fn loading_mints_fresh_ids() {
    let engine = studio_document();
    let file = DesignFile::from_engine(&engine, "vest");

    let mut restored = Engine::new();
    file.apply_to_engine(&mut restored).unwrap();

    // New paths after a load must not collide with restored ones.
    restored.start_path(Point::new(0.0, 0.0)).unwrap();
    restored.add_point(Point::new(5.0, 5.0)).unwrap();
    let fresh = restored.finish(false).unwrap();

    let all: Vec<_> = restored
        .store()
        .layers()
        .iter()
        .flat_map(|l| l.paths.iter())
        .filter(|p| p.id == fresh)
        .collect();
    assert_eq!(all.len(), 1);
}

#[test]
fn loading_discards_in_progress_state() {
    let engine = studio_document();
    let file = DesignFile::from_engine(&engine, "vest");

    let mut restored = Engine::new();
    restored.start_path(Point::new(0.0, 0.0)).unwrap();
    file.apply_to_engine(&mut restored).unwrap();

    assert!(!restored.is_drawing());
    assert!(restored.selected_paths().is_empty());
    assert!(restored.selected_anchors().is_empty());
}

#[test]
fn load_rejects_malformed_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.skv");
    std::fs::write(&path, "not a design file").unwrap();

    assert!(DesignFile::load_from_file(&path).is_err());
    assert!(DesignFile::load_from_file(dir.path().join("missing.skv")).is_err());
}

#[test]
fn new_files_carry_version_and_identity() {
    let a = DesignFile::new("one");
    let b = DesignFile::new("two");
    assert_eq!(a.version, "1.0");
    assert_ne!(a.metadata.id, b.metadata.id);
    assert!(a.layers.is_empty());
}
