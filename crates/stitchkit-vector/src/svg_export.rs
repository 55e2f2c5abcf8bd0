//! SVG document export.
//!
//! Renders every visible layer as a `<g>` with the layer's opacity,
//! each path as a `<path>` element, and a small measurement label at
//! the midpoint of each straight segment span. Hidden layers are
//! omitted entirely rather than emitted invisible.

use std::fmt::Write;

use crate::engine::Engine;
use crate::model::VectorPath;
use crate::path_data::path_data_string;

/// Renders the whole document as a standalone SVG string.
pub fn export_svg(engine: &Engine) -> String {
    let (width, height) = engine.canvas_size();
    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">",
        width, height
    );

    for layer in engine.store().layers() {
        if !layer.visible || layer.paths.is_empty() {
            continue;
        }
        let _ = write!(svg, "<g opacity=\"{}\">", layer.opacity);
        for path in &layer.paths {
            render_path(&mut svg, path);
        }
        svg.push_str("</g>");
    }

    svg.push_str("</svg>");
    svg
}

fn render_path(svg: &mut String, path: &VectorPath) {
    let fill = if path.fill_opacity > 0.0 && path.closed {
        path.fill_color.as_str()
    } else {
        "none"
    };
    let _ = write!(
        svg,
        "<path d=\"{}\" stroke=\"{}\" stroke-width=\"{}\" fill=\"{}\" fill-opacity=\"{}\" />",
        path_data_string(path),
        path.stroke_color,
        path.stroke_width,
        fill,
        path.fill_opacity
    );

    // Measurement label per segment, floated just above the midpoint.
    for pair in path.anchors.windows(2) {
        let a = pair[0].position;
        let b = pair[1].position;
        let mid = a.midpoint(&b);
        let _ = write!(
            svg,
            "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"10\" fill=\"{}\">{:.2}</text>",
            mid.x,
            mid.y - 6.0,
            path.stroke_color,
            a.distance_to(&b)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stitchkit_core::Point;

    fn engine_with_triangle() -> Engine {
        let mut engine = Engine::new();
        engine.start_path(Point::new(0.0, 0.0)).unwrap();
        engine.add_point(Point::new(10.0, 0.0)).unwrap();
        engine.add_point(Point::new(10.0, 10.0)).unwrap();
        engine.finish(true).unwrap();
        engine
    }

    #[test]
    fn document_wraps_layers_in_groups() {
        let engine = engine_with_triangle();
        let svg = export_svg(&engine);
        assert!(svg.starts_with("<svg width=\"800\" height=\"600\""));
        assert!(svg.contains("<g opacity=\"1\">"));
        assert!(svg.contains("d=\"M 0 0 L 10 0 L 10 10 Z\""));
        assert!(svg.ends_with("</g></svg>"));
    }

    #[test]
    fn hidden_layers_are_omitted() {
        let mut engine = engine_with_triangle();
        let layer = engine.active_layer_id();
        engine
            .update_layer(
                layer,
                crate::layer_store::LayerUpdate {
                    visible: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();

        let svg = export_svg(&engine);
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn open_paths_render_without_fill() {
        let mut engine = Engine::new();
        engine.start_path(Point::new(0.0, 0.0)).unwrap();
        engine.add_point(Point::new(10.0, 0.0)).unwrap();
        engine.finish(false).unwrap();

        let svg = export_svg(&engine);
        assert!(svg.contains("fill=\"none\""));
        assert!(svg.contains(">10.00</text>"));
    }
}
