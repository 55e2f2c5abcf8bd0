//! Minimal ASCII DXF export for cutting workflows.
//!
//! Emits one entity per committed path on a visible layer: a LINE for
//! two-anchor paths, otherwise an LWPOLYLINE carrying the closed flag.
//! Curves are flattened to their anchor polygon. DXF uses a Y-up
//! coordinate system, so canvas coordinates are flipped against the
//! canvas height on the way out.

use std::fmt::Write;

use crate::engine::Engine;
use crate::model::{VectorLayer, VectorPath};

/// Renders the whole document as an ASCII DXF string.
pub fn export_dxf(engine: &Engine) -> String {
    let (_, height) = engine.canvas_size();
    let mut dxf = String::new();

    dxf.push_str("0\nSECTION\n2\nHEADER\n0\nENDSEC\n");
    dxf.push_str("0\nSECTION\n2\nENTITIES\n");

    for layer in engine.store().layers() {
        if !layer.visible {
            continue;
        }
        for path in &layer.paths {
            write_entity(&mut dxf, layer, path, height);
        }
    }

    dxf.push_str("0\nENDSEC\n0\nEOF\n");
    dxf
}

fn write_entity(dxf: &mut String, layer: &VectorLayer, path: &VectorPath, height: f64) {
    // A single anchor has no extent; nothing to cut.
    if path.anchors.len() < 2 {
        return;
    }

    if path.anchors.len() == 2 {
        let start = path.anchors[0].position;
        let end = path.anchors[1].position;
        let _ = write!(
            dxf,
            "0\nLINE\n8\n{}\n10\n{}\n20\n{}\n30\n0\n11\n{}\n21\n{}\n31\n0\n",
            layer.name,
            start.x,
            height - start.y,
            end.x,
            height - end.y
        );
        return;
    }

    let _ = write!(
        dxf,
        "0\nLWPOLYLINE\n8\n{}\n90\n{}\n70\n{}\n",
        layer.name,
        path.anchors.len(),
        if path.closed { 1 } else { 0 }
    );
    for anchor in &path.anchors {
        let _ = write!(
            dxf,
            "10\n{}\n20\n{}\n",
            anchor.position.x,
            height - anchor.position.y
        );
    }
}
