//! Point-to-point connection paths.
//!
//! The connect tool joins two existing anchors with a new straight
//! open path. The source and target anchors are untouched; the new
//! path only copies their coordinates.

use tracing::debug;

use stitchkit_core::{AnchorId, PathId, Result, VectorError};

use crate::model::{AnchorKind, AnchorPoint, VectorPath};

use super::Engine;

impl Engine {
    /// Connects two committed anchors with a new two-anchor open path
    /// on the active layer. Connecting an anchor to itself is rejected
    /// before any mutation.
    pub fn connect_points(
        &mut self,
        source_path: PathId,
        source_anchor: AnchorId,
        target_path: PathId,
        target_anchor: AnchorId,
    ) -> Result<PathId> {
        let source = self.store.anchor(source_path, source_anchor)?.position;
        let target = self.store.anchor(target_path, target_anchor)?.position;
        if source_anchor == target_anchor {
            return Err(VectorError::invalid(
                "cannot connect an anchor to itself",
            ));
        }

        let path_id = self.store.ids_mut().next_path_id();
        let start_id = self.store.ids_mut().next_anchor_id();
        let end_id = self.store.ids_mut().next_anchor_id();
        let layer = self.store.active_layer_id();

        let path = VectorPath {
            id: path_id,
            anchors: vec![
                AnchorPoint::new(start_id, source, AnchorKind::Corner),
                AnchorPoint::new(end_id, target, AnchorKind::Corner),
            ],
            closed: false,
            stroke_color: self.style.stroke_color.clone(),
            stroke_width: self.style.stroke_width,
            fill_color: self.style.fill_color.clone(),
            fill_opacity: 0.0,
            layer,
        };

        debug!(
            path = %path_id,
            from = %source_anchor,
            to = %target_anchor,
            "connecting anchors"
        );
        let id = self.store.commit_path(layer, path)?;
        self.selected_paths = vec![id];
        Ok(id)
    }
}
