//! Serialization and deserialization for design files.
//!
//! Implements save/load for `.skv` design files using JSON format with
//! complete document state preservation. Engine ids are session-local,
//! so they are not persisted; loading mints fresh ids for every layer,
//! path, and anchor.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

use stitchkit_core::Point;

use crate::engine::Engine;
use crate::layer_store::LayerUpdate;
use crate::model::{AnchorKind, AnchorPoint, ControlHandle, HandleSide, VectorLayer, VectorPath};

/// Design file format version
const FILE_FORMAT_VERSION: &str = "1.0";

/// Complete design file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignFile {
    pub version: String,
    pub metadata: DesignMetadata,
    pub canvas: CanvasSize,
    pub layers: Vec<LayerData>,
}

/// Design metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignMetadata {
    pub name: String,
    pub id: Uuid,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

/// Serialized layer data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerData {
    pub name: String,
    pub visible: bool,
    pub locked: bool,
    pub opacity: f64,
    pub paths: Vec<PathData>,
}

/// Serialized path data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathData {
    pub anchors: Vec<AnchorData>,
    pub closed: bool,
    pub stroke_color: String,
    pub stroke_width: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
}

/// Serialized anchor data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnchorData {
    pub x: f64,
    pub y: f64,
    pub kind: AnchorKind,
    #[serde(default)]
    pub control_in: Option<HandleData>,
    #[serde(default)]
    pub control_out: Option<HandleData>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HandleData {
    pub x: f64,
    pub y: f64,
}

impl DesignFile {
    /// Create a new, empty design file
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: DesignMetadata {
                name: name.into(),
                id: Uuid::new_v4(),
                created: now,
                modified: now,
            },
            canvas: CanvasSize {
                width: 800.0,
                height: 600.0,
            },
            layers: Vec::new(),
        }
    }

    /// Snapshot the engine's committed document state
    pub fn from_engine(engine: &Engine, name: impl Into<String>) -> Self {
        let (width, height) = engine.canvas_size();
        let mut file = Self::new(name);
        file.canvas = CanvasSize { width, height };
        file.layers = engine
            .store()
            .layers()
            .iter()
            .map(LayerData::from_layer)
            .collect();
        file
    }

    /// Save design to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize design")?;

        std::fs::write(path.as_ref(), json).context("Failed to write design file")?;

        Ok(())
    }

    /// Load design from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read design file")?;

        let mut design: DesignFile =
            serde_json::from_str(&content).context("Failed to parse design file")?;

        // Update modified timestamp
        design.metadata.modified = Utc::now();

        Ok(design)
    }

    /// Replace the engine's document with this design. Any in-progress
    /// path and selection are discarded; every layer, path, and anchor
    /// gets a freshly minted id.
    pub fn apply_to_engine(&self, engine: &mut Engine) -> Result<()> {
        engine.current_path = None;
        engine.drag = None;
        engine.clear_selection();
        engine.set_canvas_size(self.canvas.width, self.canvas.height);

        // Collapse to a single layer, then rebuild from the file.
        let extras: Vec<_> = engine
            .store()
            .layers()
            .iter()
            .skip(1)
            .map(|l| l.id)
            .collect();
        for id in extras {
            engine.delete_layer(id)?;
        }

        for (index, data) in self.layers.iter().enumerate() {
            let id = if index == 0 {
                let first = engine.store.layers()[0].id;
                if let Some(layer) = engine.store.layer_mut(first) {
                    layer.paths.clear();
                }
                first
            } else {
                engine.store.add_layer(Some(data.name.clone()))
            };
            engine.update_layer(
                id,
                LayerUpdate {
                    name: Some(data.name.clone()),
                    visible: Some(data.visible),
                    locked: Some(data.locked),
                    opacity: Some(data.opacity),
                },
            )?;

            for path_data in &data.paths {
                let path = path_data.to_path(engine, id)?;
                engine.store.commit_path(id, path)?;
            }
        }

        if let Some(last) = engine.store.layers().last().map(|l| l.id) {
            engine.store.set_active_layer(last)?;
        }
        Ok(())
    }
}

impl LayerData {
    fn from_layer(layer: &VectorLayer) -> Self {
        Self {
            name: layer.name.clone(),
            visible: layer.visible,
            locked: layer.locked,
            opacity: layer.opacity,
            paths: layer.paths.iter().map(PathData::from_path).collect(),
        }
    }
}

impl PathData {
    fn from_path(path: &VectorPath) -> Self {
        Self {
            anchors: path.anchors.iter().map(AnchorData::from_anchor).collect(),
            closed: path.closed,
            stroke_color: path.stroke_color.clone(),
            stroke_width: path.stroke_width,
            fill_color: path.fill_color.clone(),
            fill_opacity: path.fill_opacity,
        }
    }

    fn to_path(
        &self,
        engine: &mut Engine,
        layer: stitchkit_core::LayerId,
    ) -> Result<VectorPath> {
        let id = engine.store.ids_mut().next_path_id();
        let mut anchors = Vec::with_capacity(self.anchors.len());
        for data in &self.anchors {
            let anchor_id = engine.store.ids_mut().next_anchor_id();
            let mut anchor =
                AnchorPoint::new(anchor_id, Point::new(data.x, data.y), data.kind);
            if let Some(handle) = data.control_in {
                anchor.control_in = Some(ControlHandle {
                    position: Point::new(handle.x, handle.y),
                    side: HandleSide::In,
                });
            }
            if let Some(handle) = data.control_out {
                anchor.control_out = Some(ControlHandle {
                    position: Point::new(handle.x, handle.y),
                    side: HandleSide::Out,
                });
            }
            anchors.push(anchor);
        }

        Ok(VectorPath {
            id,
            anchors,
            closed: self.closed,
            stroke_color: self.stroke_color.clone(),
            stroke_width: self.stroke_width,
            fill_color: self.fill_color.clone(),
            fill_opacity: self.fill_opacity,
            layer,
        })
    }
}

impl AnchorData {
    fn from_anchor(anchor: &AnchorPoint) -> Self {
        Self {
            x: anchor.position.x,
            y: anchor.position.y,
            kind: anchor.kind,
            control_in: anchor.control_in.map(|h| HandleData {
                x: h.position.x,
                y: h.position.y,
            }),
            control_out: anchor.control_out.map(|h| HandleData {
                x: h.position.x,
                y: h.position.y,
            }),
        }
    }
}
