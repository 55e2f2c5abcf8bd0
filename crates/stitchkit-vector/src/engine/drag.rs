//! Drag state machine for anchors and control handles.
//!
//! Handle drags are direct moves with no derived side effects. Anchor
//! drags additionally re-derive the anchor's handles once the vertical
//! displacement since the drag origin passes a small threshold, so
//! dragging a point bows the adjoining segments into curves without a
//! separate conversion step.

use tracing::debug;

use stitchkit_core::constants::{DRAG_BOW_RATIO, DRAG_SMOOTHING_THRESHOLD, NEIGHBOR_HANDLE_RATIO};
use stitchkit_core::{AnchorId, PathId, Point, Result, VectorError};

use crate::model::AnchorKind;

use super::Engine;

/// What a drag is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Anchor,
    ControlIn,
    ControlOut,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct DragState {
    pub kind: DragKind,
    pub anchor: AnchorId,
    pub path: PathId,
    pub origin: Point,
}

impl Engine {
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Enters the dragging state. The target anchor must exist on the
    /// target path.
    pub fn start_drag(
        &mut self,
        kind: DragKind,
        anchor: AnchorId,
        path: PathId,
        origin: Point,
    ) -> Result<()> {
        if self.drag.is_some() {
            return Err(VectorError::state_conflict("Dragging", "start_drag"));
        }
        self.store.anchor(path, anchor)?;

        debug!(path = %path, anchor = %anchor, ?kind, "starting drag");
        self.drag = Some(DragState {
            kind,
            anchor,
            path,
            origin,
        });
        Ok(())
    }

    /// Applies the current pointer position to the drag target.
    pub fn update_drag(&mut self, current: Point) -> Result<()> {
        let state = self
            .drag
            .ok_or_else(|| VectorError::state_conflict("Idle", "update_drag"))?;

        match state.kind {
            DragKind::ControlIn | DragKind::ControlOut => {
                let path = self
                    .store
                    .path_mut(state.path)
                    .ok_or(VectorError::PathNotFound { id: state.path })?;
                let anchor = path
                    .anchor_mut(state.anchor)
                    .ok_or(VectorError::AnchorNotFound { id: state.anchor })?;
                if state.kind == DragKind::ControlIn {
                    anchor.set_control_in(current);
                } else {
                    anchor.set_control_out(current);
                }
                Ok(())
            }
            DragKind::Anchor => {
                self.move_anchor_with_curves(state.path, state.anchor, current, state.origin)
            }
        }
    }

    /// Leaves the dragging state. The last `update_drag` is final; no
    /// further mutation happens here.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Moves an anchor and, past the smoothing threshold, re-derives
    /// its handles: 0.3x the shorter neighbor distance, angled toward
    /// each neighbor from the anchor's pre-drag position, with a
    /// fraction of the vertical displacement folded in as bow.
    fn move_anchor_with_curves(
        &mut self,
        path_id: PathId,
        anchor_id: AnchorId,
        current: Point,
        origin: Point,
    ) -> Result<()> {
        let path = self
            .store
            .path_mut(path_id)
            .ok_or(VectorError::PathNotFound { id: path_id })?;
        let index = path
            .anchor_index(anchor_id)
            .ok_or(VectorError::AnchorNotFound { id: anchor_id })?;

        let old = path.anchors[index].position;
        let prev = index.checked_sub(1).map(|i| path.anchors[i].position);
        let next = path.anchors.get(index + 1).map(|a| a.position);
        let delta_y = current.y - origin.y;

        let anchor = &mut path.anchors[index];
        anchor.position = current;

        if delta_y.abs() <= DRAG_SMOOTHING_THRESHOLD {
            return Ok(());
        }
        let bow = delta_y * DRAG_BOW_RATIO;

        match (prev, next) {
            (Some(prev), Some(next)) => {
                let handle_length =
                    old.distance_to(&prev).min(old.distance_to(&next)) * NEIGHBOR_HANDLE_RATIO;
                if handle_length > f64::EPSILON {
                    let in_angle = old.angle_to(&prev);
                    let out_angle = old.angle_to(&next);
                    let control_in = current.offset_along(in_angle, handle_length);
                    let control_out = current.offset_along(out_angle, handle_length);
                    anchor.set_control_in(Point::new(control_in.x, control_in.y + bow));
                    anchor.set_control_out(Point::new(control_out.x, control_out.y + bow));
                    anchor.kind = AnchorKind::Smooth;
                }
            }
            (Some(prev), None) => {
                let handle_length = old.distance_to(&prev) * NEIGHBOR_HANDLE_RATIO;
                if handle_length > f64::EPSILON {
                    let angle = old.angle_to(&prev);
                    let control_in = current.offset_along(angle, handle_length);
                    anchor.set_control_in(Point::new(control_in.x, control_in.y + bow));
                    anchor.kind = AnchorKind::Smooth;
                }
            }
            (None, Some(next)) => {
                let handle_length = old.distance_to(&next) * NEIGHBOR_HANDLE_RATIO;
                if handle_length > f64::EPSILON {
                    let angle = old.angle_to(&next);
                    let control_out = current.offset_along(angle, handle_length);
                    anchor.set_control_out(Point::new(control_out.x, control_out.y + bow));
                    anchor.kind = AnchorKind::Smooth;
                }
            }
            (None, None) => {}
        }

        Ok(())
    }
}
