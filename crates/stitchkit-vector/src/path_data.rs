//! Draw-command serialization for vector paths.
//!
//! Converts an anchor sequence into move/line/cubic commands consumable
//! by any rendering backend, plus the `M/L/C/Z` exchange string form.
//! A segment is emitted as a cubic curve only when *both* flanking
//! control handles are present; otherwise it is a straight line, so a
//! path can mix curved and straight segments freely.

use std::fmt::Write;

use serde::{Deserialize, Serialize};
use stitchkit_core::Point;

use crate::model::VectorPath;

/// A single draw command in path order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Cubic bezier: outgoing handle of the previous anchor, incoming
    /// handle of the current anchor, then the current anchor.
    CurveTo(Point, Point, Point),
    ClosePath,
}

/// Converts a path into its draw-command sequence.
///
/// An empty path produces no commands. An open path with `N` anchors
/// produces `N` commands (the leading `MoveTo` plus one per segment);
/// a closed path appends a final `ClosePath`.
pub fn generate_path_data(path: &VectorPath) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(path.anchors.len() + 1);
    let Some(first) = path.anchors.first() else {
        return commands;
    };

    commands.push(DrawCommand::MoveTo(first.position));

    for pair in path.anchors.windows(2) {
        let previous = &pair[0];
        let current = &pair[1];
        match (previous.control_out, current.control_in) {
            (Some(out), Some(inn)) => {
                commands.push(DrawCommand::CurveTo(
                    out.position,
                    inn.position,
                    current.position,
                ));
            }
            _ => commands.push(DrawCommand::LineTo(current.position)),
        }
    }

    if path.closed {
        commands.push(DrawCommand::ClosePath);
    }

    commands
}

/// Renders the draw commands as an `M/L/C/Z` path string.
pub fn path_data_string(path: &VectorPath) -> String {
    let mut data = String::new();
    for command in generate_path_data(path) {
        match command {
            DrawCommand::MoveTo(p) => {
                let _ = write!(data, "M {} {}", p.x, p.y);
            }
            DrawCommand::LineTo(p) => {
                let _ = write!(data, " L {} {}", p.x, p.y);
            }
            DrawCommand::CurveTo(c1, c2, p) => {
                let _ = write!(
                    data,
                    " C {} {}, {} {}, {} {}",
                    c1.x, c1.y, c2.x, c2.y, p.x, p.y
                );
            }
            DrawCommand::ClosePath => data.push_str(" Z"),
        }
    }
    data
}
