//! Data model for the vector engine.
//!
//! Ownership is strictly tree-shaped: a layer owns its paths, a path
//! owns its anchors, and an anchor owns up to two control handles.
//! Cross-path relationships are expressed through ids only.

use serde::{Deserialize, Serialize};

use stitchkit_core::{AnchorId, LayerId, PathId, Point};

mod path;

pub use path::VectorPath;

/// Which side of an anchor a control handle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleSide {
    In,
    Out,
}

/// A bezier control handle, owned exclusively by its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlHandle {
    pub position: Point,
    pub side: HandleSide,
}

impl ControlHandle {
    pub fn new(position: Point, side: HandleSide) -> Self {
        Self { position, side }
    }

    pub fn incoming(position: Point) -> Self {
        Self::new(position, HandleSide::In)
    }

    pub fn outgoing(position: Point) -> Self {
        Self::new(position, HandleSide::Out)
    }
}

/// Anchor classification: corners join segments straight, smooth
/// anchors carry curve-bearing handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorKind {
    Corner,
    Smooth,
}

/// A vertex of a vector path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorPoint {
    pub id: AnchorId,
    pub position: Point,
    pub control_in: Option<ControlHandle>,
    pub control_out: Option<ControlHandle>,
    pub kind: AnchorKind,
}

impl AnchorPoint {
    /// Creates a handle-less anchor of the given kind.
    pub fn new(id: AnchorId, position: Point, kind: AnchorKind) -> Self {
        Self {
            id,
            position,
            control_in: None,
            control_out: None,
            kind,
        }
    }

    pub fn set_control_in(&mut self, position: Point) {
        self.control_in = Some(ControlHandle::incoming(position));
    }

    pub fn set_control_out(&mut self, position: Point) {
        self.control_out = Some(ControlHandle::outgoing(position));
    }

    /// Drops both handles, demoting the anchor to a corner.
    pub fn clear_handles(&mut self) {
        self.control_in = None;
        self.control_out = None;
    }
}

/// Explicit patch for a single anchor. Unset fields are left untouched;
/// the `Option<Option<_>>` handles distinguish "leave alone" from
/// "remove the handle".
#[derive(Debug, Clone, Default)]
pub struct AnchorUpdate {
    pub position: Option<Point>,
    pub control_in: Option<Option<ControlHandle>>,
    pub control_out: Option<Option<ControlHandle>>,
    pub kind: Option<AnchorKind>,
}

impl AnchorUpdate {
    pub fn apply(&self, anchor: &mut AnchorPoint) {
        if let Some(position) = self.position {
            anchor.position = position;
        }
        if let Some(control_in) = self.control_in {
            anchor.control_in = control_in;
        }
        if let Some(control_out) = self.control_out {
            anchor.control_out = control_out;
        }
        if let Some(kind) = self.kind {
            anchor.kind = kind;
        }
    }
}

/// Explicit patch for a path's style and closed flag.
#[derive(Debug, Clone, Default)]
pub struct PathUpdate {
    pub closed: Option<bool>,
    pub stroke_color: Option<String>,
    pub stroke_width: Option<f64>,
    pub fill_color: Option<String>,
    pub fill_opacity: Option<f64>,
}

impl PathUpdate {
    pub fn apply(&self, path: &mut VectorPath) {
        if let Some(closed) = self.closed {
            path.closed = closed;
        }
        if let Some(ref stroke_color) = self.stroke_color {
            path.stroke_color = stroke_color.clone();
        }
        if let Some(stroke_width) = self.stroke_width {
            path.stroke_width = stroke_width;
        }
        if let Some(ref fill_color) = self.fill_color {
            path.fill_color = fill_color.clone();
        }
        if let Some(fill_opacity) = self.fill_opacity {
            path.fill_opacity = fill_opacity;
        }
    }
}

/// A named layer owning an ordered set of paths (insertion order is
/// paint order, later paths on top).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorLayer {
    pub id: LayerId,
    pub name: String,
    pub visible: bool,
    pub locked: bool,
    pub opacity: f64,
    pub paths: Vec<VectorPath>,
}

impl VectorLayer {
    pub fn new(id: LayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            visible: true,
            locked: false,
            opacity: 1.0,
            paths: Vec::new(),
        }
    }

    pub fn path(&self, id: PathId) -> Option<&VectorPath> {
        self.paths.iter().find(|p| p.id == id)
    }

    pub fn path_mut(&mut self, id: PathId) -> Option<&mut VectorPath> {
        self.paths.iter_mut().find(|p| p.id == id)
    }
}
