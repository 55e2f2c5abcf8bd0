//! # Stitchkit Vector
//!
//! Vector path editing engine for garment and pattern design. Provides
//! the anchor/path/layer document model, the interactive construction
//! and manipulation state machines, hit-testing and fill tools, and
//! export to SVG, DXF, and a JSON design file format.
//!
//! ## Core Components
//!
//! ### Document Model
//! - **Anchors**: Corner and smooth points with optional control handles
//! - **Paths**: Ordered anchor sequences with stroke and fill style
//! - **Layers**: Ordered, individually visible/lockable path groups
//!
//! ### Editing
//! - **Drawing**: Pen and bezier path construction state machine
//! - **Curves**: Corner/smooth conversion and strength-based sculpting
//! - **Drag**: Anchor and handle manipulation with auto-smoothing
//! - **Connect**: Straight connection paths between existing anchors
//! - **Fill**: Innermost-region hit-testing and color application
//!
//! ### Import/Export
//! - **Path data**: Move/line/cubic command lists and `M/L/C/Z` strings
//! - **SVG**: Layered document rendering with measurement labels
//! - **DXF**: Polyline entity export for cutting workflows
//! - **Design files**: Versioned JSON persistence
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stitchkit_vector::Engine;
//! use stitchkit_core::Point;
//!
//! let mut engine = Engine::new();
//! engine.start_path(Point::new(0.0, 0.0))?;
//! engine.add_point(Point::new(10.0, 0.0))?;
//! engine.add_point(Point::new(10.0, 10.0))?;
//! let path = engine.finish(true)?;
//! ```

pub mod dxf_export;
pub mod engine;
pub mod layer_store;
pub mod model;
pub mod path_data;
pub mod serialization;
pub mod svg_export;

pub use engine::{CurveDirection, DragKind, Engine, FillTarget, StyleDefaults, Tool};
pub use layer_store::{LayerStore, LayerUpdate};
pub use model::{
    AnchorKind, AnchorPoint, AnchorUpdate, ControlHandle, HandleSide, PathUpdate, VectorLayer,
    VectorPath,
};
pub use path_data::{generate_path_data, path_data_string, DrawCommand};
pub use serialization::DesignFile;
