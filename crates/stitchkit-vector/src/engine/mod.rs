//! Engine state manager.
//!
//! Owns the layer store, tool mode, style defaults, selection, and the
//! drawing/drag state machines. All mutation goes through explicit
//! methods on [`Engine`]; there are no hidden singletons.
//!
//! This module is split into submodules by concern:
//! - `drawing`: path construction state machine
//! - `curves`: corner/smooth conversion and curve sculpting
//! - `drag`: anchor and control-handle manipulation
//! - `connect`: point-to-point connection paths
//! - `fill`: hit-testing and area-based color application

mod connect;
mod curves;
mod drag;
mod drawing;
mod fill;

pub use curves::CurveDirection;
pub use drag::DragKind;
pub use fill::FillTarget;

use tracing::debug;

use stitchkit_core::{AnchorId, LayerId, PathId, Result, VectorError};

use crate::layer_store::{LayerStore, LayerUpdate};
use crate::model::{AnchorPoint, AnchorUpdate, PathUpdate, VectorPath};

/// Editing tools exposed to the host UI. Operation validity is checked
/// against the active tool by the state machines, not by call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Select,
    DirectSelect,
    Pen,
    Bezier,
    Connect,
}

impl Tool {
    /// Tools that may start a new path.
    pub fn is_drawing_tool(&self) -> bool {
        matches!(self, Tool::Pen | Tool::Bezier)
    }
}

/// Style defaults applied to newly created paths and connections.
#[derive(Debug, Clone)]
pub struct StyleDefaults {
    pub stroke_color: String,
    pub stroke_width: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self {
            stroke_color: "#000000".to_string(),
            stroke_width: 2.0,
            fill_color: "#a031a0".to_string(),
            fill_opacity: 0.6,
        }
    }
}

/// The vector path editing engine. One instance per document/session.
#[derive(Debug, Clone)]
pub struct Engine {
    pub(crate) store: LayerStore,
    pub(crate) tool: Tool,
    pub(crate) style: StyleDefaults,
    pub(crate) canvas_width: f64,
    pub(crate) canvas_height: f64,
    pub(crate) current_path: Option<VectorPath>,
    pub(crate) drag: Option<drag::DragState>,
    pub(crate) selected_paths: Vec<PathId>,
    pub(crate) selected_anchors: Vec<AnchorId>,
}

impl Engine {
    /// Creates an engine with the default 800x600 canvas.
    pub fn new() -> Self {
        Self::with_canvas_size(800.0, 600.0)
    }

    pub fn with_canvas_size(width: f64, height: f64) -> Self {
        Self {
            store: LayerStore::new(),
            tool: Tool::Pen,
            style: StyleDefaults::default(),
            canvas_width: width,
            canvas_height: height,
            current_path: None,
            drag: None,
            selected_paths: Vec::new(),
            selected_anchors: Vec::new(),
        }
    }

    pub fn store(&self) -> &LayerStore {
        &self.store
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn style(&self) -> &StyleDefaults {
        &self.style
    }

    pub fn set_stroke_color(&mut self, color: impl Into<String>) {
        self.style.stroke_color = color.into();
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.style.stroke_width = width.max(0.0);
    }

    pub fn set_fill_color(&mut self, color: impl Into<String>) {
        self.style.fill_color = color.into();
    }

    pub fn set_fill_opacity(&mut self, opacity: f64) {
        self.style.fill_opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn canvas_size(&self) -> (f64, f64) {
        (self.canvas_width, self.canvas_height)
    }

    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    // --- Layer operations -------------------------------------------------

    pub fn active_layer_id(&self) -> LayerId {
        self.store.active_layer_id()
    }

    /// Appends a new layer and activates it. Any in-progress path is
    /// first committed into the previously active layer.
    pub fn add_layer(&mut self, name: Option<String>) -> LayerId {
        let previous = self.store.active_layer_id();
        self.reconcile_drawing(previous);
        self.store.add_layer(name)
    }

    /// Deletes a layer. If the active layer is being deleted while a
    /// path is in progress, the path is committed into the layer that
    /// activation falls back to, so it is not lost with the layer.
    pub fn delete_layer(&mut self, id: LayerId) -> Result<()> {
        if self.store.layer(id).is_none() {
            return Err(VectorError::LayerNotFound { id });
        }
        if id == self.store.active_layer_id() {
            let fallback = self
                .store
                .layers()
                .iter()
                .map(|l| l.id)
                .find(|&other| other != id);
            if let Some(fallback) = fallback {
                self.reconcile_drawing(fallback);
            }
        }
        self.store.delete_layer(id)
    }

    pub fn update_layer(&mut self, id: LayerId, update: LayerUpdate) -> Result<()> {
        self.store.update_layer(id, update)
    }

    /// Activates a layer. Commits any in-progress path into the
    /// previously active layer and clears drawing state and selection
    /// before the switch, so the path is never silently lost.
    pub fn set_active_layer(&mut self, id: LayerId) -> Result<()> {
        if self.store.layer(id).is_none() {
            return Err(VectorError::LayerNotFound { id });
        }
        let previous = self.store.active_layer_id();
        if previous == id {
            return Ok(());
        }
        self.reconcile_drawing(previous);
        self.store.set_active_layer(id)
    }

    /// Commits the in-progress path (if any) into `layer`: closed only
    /// if it already had enough anchors and a close was requested,
    /// otherwise open with zero fill opacity. Clears drawing state and
    /// both selections.
    fn reconcile_drawing(&mut self, layer: LayerId) {
        if let Some(mut path) = self.current_path.take() {
            path.closed =
                path.anchors.len() >= stitchkit_core::constants::MIN_CLOSE_ANCHORS && path.closed;
            if !path.closed {
                path.fill_opacity = 0.0;
            }
            path.layer = layer;
            debug!(layer = %layer, path = %path.id, "committing in-progress path on layer switch");
            // The target layer is known to exist at every call site.
            let _ = self.store.commit_path(layer, path);
        }
        self.selected_paths.clear();
        self.selected_anchors.clear();
    }

    // --- Path and anchor access -------------------------------------------

    pub fn path(&self, id: PathId) -> Option<&VectorPath> {
        self.store.path(id)
    }

    pub fn anchor(&self, path: PathId, anchor: AnchorId) -> Result<&AnchorPoint> {
        self.store.anchor(path, anchor)
    }

    /// All paths on visible layers, in paint order.
    pub fn visible_paths(&self) -> Vec<&VectorPath> {
        self.store.visible_paths().collect()
    }

    pub fn delete_path(&mut self, id: PathId) -> Result<()> {
        self.store.delete_path(id)?;
        self.selected_paths.retain(|&p| p != id);
        Ok(())
    }

    pub fn update_path(&mut self, id: PathId, update: PathUpdate) -> Result<()> {
        let path = self
            .store
            .path_mut(id)
            .ok_or(VectorError::PathNotFound { id })?;
        update.apply(path);
        Ok(())
    }

    pub fn update_anchor(
        &mut self,
        path: PathId,
        anchor: AnchorId,
        update: AnchorUpdate,
    ) -> Result<()> {
        let path = self
            .store
            .path_mut(path)
            .ok_or(VectorError::PathNotFound { id: path })?;
        let anchor = path
            .anchor_mut(anchor)
            .ok_or(VectorError::AnchorNotFound { id: anchor })?;
        update.apply(anchor);
        Ok(())
    }

    // --- Selection --------------------------------------------------------

    pub fn selected_paths(&self) -> &[PathId] {
        &self.selected_paths
    }

    pub fn selected_anchors(&self) -> &[AnchorId] {
        &self.selected_anchors
    }

    /// Selects a path. With `multi`, toggles membership in the current
    /// selection instead of replacing it. Path selection clears any
    /// anchor selection.
    pub fn select_path(&mut self, id: PathId, multi: bool) {
        if multi {
            if let Some(index) = self.selected_paths.iter().position(|&p| p == id) {
                self.selected_paths.remove(index);
            } else {
                self.selected_paths.push(id);
            }
        } else {
            self.selected_paths.clear();
            self.selected_paths.push(id);
        }
        self.selected_anchors.clear();
    }

    /// Selects an anchor, toggling with `multi` like [`select_path`].
    ///
    /// [`select_path`]: Engine::select_path
    pub fn select_anchor(&mut self, id: AnchorId, multi: bool) {
        if multi {
            if let Some(index) = self.selected_anchors.iter().position(|&a| a == id) {
                self.selected_anchors.remove(index);
            } else {
                self.selected_anchors.push(id);
            }
        } else {
            self.selected_anchors.clear();
            self.selected_anchors.push(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_paths.clear();
        self.selected_anchors.clear();
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
