//! Ordered layer collection with a single active layer.
//!
//! The store always contains at least one layer; new paths are always
//! committed into the active layer. Layer and path ids come from one
//! monotonic generator and are never reused within a session.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use stitchkit_core::{AnchorId, IdGenerator, LayerId, PathId, Result, VectorError};

use crate::model::{AnchorPoint, VectorLayer, VectorPath};

/// Explicit patch for a layer. Unset fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct LayerUpdate {
    pub name: Option<String>,
    pub visible: Option<bool>,
    pub locked: Option<bool>,
    pub opacity: Option<f64>,
}

/// Layer store: ordered layers, active-layer tracking, id minting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerStore {
    layers: Vec<VectorLayer>,
    active: LayerId,
    ids: IdGenerator,
}

impl LayerStore {
    /// Creates a store with one empty, active layer.
    pub fn new() -> Self {
        let mut ids = IdGenerator::new();
        let id = ids.next_layer_id();
        Self {
            layers: vec![VectorLayer::new(id, "Layer 1")],
            active: id,
            ids,
        }
    }

    pub fn ids_mut(&mut self) -> &mut IdGenerator {
        &mut self.ids
    }

    pub fn active_layer_id(&self) -> LayerId {
        self.active
    }

    pub fn layers(&self) -> &[VectorLayer] {
        &self.layers
    }

    pub fn layer(&self, id: LayerId) -> Option<&VectorLayer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut VectorLayer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    /// Appends a new layer and makes it active. Default names follow
    /// the "Layer N" convention.
    pub fn add_layer(&mut self, name: Option<String>) -> LayerId {
        let id = self.ids.next_layer_id();
        let name = name.unwrap_or_else(|| format!("Layer {}", self.layers.len() + 1));
        debug!(layer = %id, name = %name, "adding layer");
        self.layers.push(VectorLayer::new(id, name));
        self.active = id;
        id
    }

    /// Deletes a layer. The last remaining layer cannot be deleted; if
    /// the active layer is deleted, activation falls to the first
    /// remaining layer.
    pub fn delete_layer(&mut self, id: LayerId) -> Result<()> {
        if self.layers.len() <= 1 {
            warn!(layer = %id, "refusing to delete the last layer");
            return Err(VectorError::invalid("cannot delete the last layer"));
        }
        let index = self
            .layers
            .iter()
            .position(|l| l.id == id)
            .ok_or(VectorError::LayerNotFound { id })?;

        self.layers.remove(index);
        if self.active == id {
            self.active = self.layers[0].id;
        }
        Ok(())
    }

    pub fn update_layer(&mut self, id: LayerId, update: LayerUpdate) -> Result<()> {
        let layer = self
            .layer_mut(id)
            .ok_or(VectorError::LayerNotFound { id })?;
        if let Some(name) = update.name {
            layer.name = name;
        }
        if let Some(visible) = update.visible {
            layer.visible = visible;
        }
        if let Some(locked) = update.locked {
            layer.locked = locked;
        }
        if let Some(opacity) = update.opacity {
            layer.opacity = opacity.clamp(0.0, 1.0);
        }
        Ok(())
    }

    /// Activates a layer. Reconciliation of any in-progress path is the
    /// engine's responsibility and must happen before this call.
    pub fn set_active_layer(&mut self, id: LayerId) -> Result<()> {
        if self.layer(id).is_none() {
            return Err(VectorError::LayerNotFound { id });
        }
        self.active = id;
        Ok(())
    }

    /// Commits a finished path into the given layer.
    pub fn commit_path(&mut self, layer_id: LayerId, path: VectorPath) -> Result<PathId> {
        let id = path.id;
        let layer = self
            .layer_mut(layer_id)
            .ok_or(VectorError::LayerNotFound { id: layer_id })?;
        debug!(layer = %layer_id, path = %id, anchors = path.anchors.len(), "committing path");
        layer.paths.push(path);
        Ok(id)
    }

    /// Removes a path from whichever layer owns it.
    pub fn delete_path(&mut self, id: PathId) -> Result<VectorPath> {
        for layer in &mut self.layers {
            if let Some(index) = layer.paths.iter().position(|p| p.id == id) {
                return Ok(layer.paths.remove(index));
            }
        }
        Err(VectorError::PathNotFound { id })
    }

    pub fn path(&self, id: PathId) -> Option<&VectorPath> {
        self.layers.iter().find_map(|l| l.path(id))
    }

    pub fn path_mut(&mut self, id: PathId) -> Option<&mut VectorPath> {
        self.layers.iter_mut().find_map(|l| l.path_mut(id))
    }

    /// All paths on visible layers, in paint order.
    pub fn visible_paths(&self) -> impl Iterator<Item = &VectorPath> {
        self.layers
            .iter()
            .filter(|l| l.visible)
            .flat_map(|l| l.paths.iter())
    }

    /// Finds the path owning an anchor, searching every layer.
    pub fn path_of_anchor(&self, id: AnchorId) -> Option<&VectorPath> {
        self.layers
            .iter()
            .flat_map(|l| l.paths.iter())
            .find(|p| p.anchor(id).is_some())
    }

    pub fn anchor(&self, path: PathId, anchor: AnchorId) -> Result<&AnchorPoint> {
        let path = self
            .path(path)
            .ok_or(VectorError::PathNotFound { id: path })?;
        path.anchor(anchor)
            .ok_or(VectorError::AnchorNotFound { id: anchor })
    }
}

impl Default for LayerStore {
    fn default() -> Self {
        Self::new()
    }
}
