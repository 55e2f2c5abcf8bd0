//! Engine tuning constants.
//!
//! The handle-length ratios and bias offsets are empirically tuned for
//! visually pleasant curves rather than derived from a curvature model.
//! They are kept here so call sites stay tunable in one place.

/// Fixed reach of the handles synthesized by the bezier drawing tool.
pub const BEZIER_HANDLE_REACH: f64 = 30.0;

/// Handle length as a fraction of the distance to a neighbor anchor.
pub const NEIGHBOR_HANDLE_RATIO: f64 = 0.3;

/// Shortening applied to the mirrored handle on the open side of an
/// endpoint anchor.
pub const MIRROR_HANDLE_RATIO: f64 = 0.6;

/// Tangent-handle length ratio for mid-path free-form curve sculpting.
pub const TANGENT_HANDLE_RATIO: f64 = 0.25;

/// Tangent-handle length ratio at path endpoints for curve sculpting.
pub const END_TANGENT_RATIO: f64 = 0.4;

/// Perpendicular bias applied when an explicit curve direction is given.
pub const CURVE_BIAS: f64 = 20.0;

/// Perpendicular bias applied when the direction is inferred from the
/// anchor's position relative to its neighbors.
pub const AUTO_CURVE_BIAS: f64 = 15.0;

/// Default strength cap for free-form curve sculpting.
pub const DEFAULT_CURVE_STRENGTH: f64 = 50.0;

/// Vertical displacement (in engine units) above which an anchor drag
/// starts re-deriving control handles.
pub const DRAG_SMOOTHING_THRESHOLD: f64 = 5.0;

/// Fraction of the drag displacement folded into the synthesized
/// handles' vertical bow.
pub const DRAG_BOW_RATIO: f64 = 0.3;

/// Minimum fill opacity forced when a fill color is applied, so a fill
/// assignment is never invisible.
pub const MIN_VISIBLE_FILL_OPACITY: f64 = 0.3;

/// Minimum number of anchors required to close a path.
pub const MIN_CLOSE_ANCHORS: usize = 3;
