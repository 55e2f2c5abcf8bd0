//! Path construction state machine.
//!
//! The engine is either idle or drawing exactly one in-progress path.
//! The in-progress path lives outside the layer store until `finish`
//! (or a layer switch) commits it into the active layer.

use tracing::debug;

use stitchkit_core::constants::{BEZIER_HANDLE_REACH, MIN_CLOSE_ANCHORS, NEIGHBOR_HANDLE_RATIO};
use stitchkit_core::{closest_point_on_segment, AnchorId, PathId, Point, Result, VectorError};

use crate::model::{AnchorKind, AnchorPoint, VectorPath};

use super::{Engine, Tool};

impl Engine {
    pub fn is_drawing(&self) -> bool {
        self.current_path.is_some()
    }

    /// The in-progress path, while drawing.
    pub fn current_path(&self) -> Option<&VectorPath> {
        self.current_path.as_ref()
    }

    /// Starts a new path at `point`. Requires the idle state and a
    /// drawing tool; the pen tool starts with a corner anchor, the
    /// bezier tool with a smooth one.
    pub fn start_path(&mut self, point: Point) -> Result<AnchorId> {
        if self.current_path.is_some() {
            return Err(VectorError::state_conflict("Drawing", "start_path"));
        }
        if !self.tool.is_drawing_tool() {
            return Err(VectorError::invalid(format!(
                "cannot start a path with the {:?} tool",
                self.tool
            )));
        }

        let path_id = self.store.ids_mut().next_path_id();
        let anchor_id = self.store.ids_mut().next_anchor_id();
        let kind = if self.tool == Tool::Bezier {
            AnchorKind::Smooth
        } else {
            AnchorKind::Corner
        };

        let path = VectorPath {
            id: path_id,
            anchors: vec![AnchorPoint::new(anchor_id, point, kind)],
            closed: false,
            stroke_color: self.style.stroke_color.clone(),
            stroke_width: self.style.stroke_width,
            fill_color: self.style.fill_color.clone(),
            fill_opacity: self.style.fill_opacity,
            layer: self.store.active_layer_id(),
        };

        debug!(path = %path_id, x = point.x, y = point.y, "starting path");
        self.current_path = Some(path);
        self.selected_anchors = vec![anchor_id];
        Ok(anchor_id)
    }

    /// Appends an anchor to the in-progress path. The bezier tool
    /// synthesizes fixed-reach horizontal handles around the new point
    /// so the segment is immediately editable as a curve.
    pub fn add_point(&mut self, point: Point) -> Result<AnchorId> {
        let bezier = self.tool == Tool::Bezier;
        let anchor_id = self.store.ids_mut().next_anchor_id();
        let path = self
            .current_path
            .as_mut()
            .ok_or_else(|| VectorError::state_conflict("Idle", "add_point"))?;

        let kind = if bezier {
            AnchorKind::Smooth
        } else {
            AnchorKind::Corner
        };
        let mut anchor = AnchorPoint::new(anchor_id, point, kind);
        if bezier {
            anchor.set_control_in(Point::new(point.x - BEZIER_HANDLE_REACH, point.y));
            anchor.set_control_out(Point::new(point.x + BEZIER_HANDLE_REACH, point.y));
        }

        path.anchors.push(anchor);
        self.selected_anchors = vec![anchor_id];
        Ok(anchor_id)
    }

    /// Sculpts the last anchor's handles while the pointer is dragged:
    /// the outgoing handle follows the cursor and the incoming handle
    /// mirrors it about the anchor.
    pub fn drag_out_handles(&mut self, current: Point) -> Result<()> {
        let path = self
            .current_path
            .as_mut()
            .ok_or_else(|| VectorError::state_conflict("Idle", "drag_out_handles"))?;
        let anchor = path
            .anchors
            .last_mut()
            .ok_or_else(|| VectorError::invalid("in-progress path has no anchors"))?;

        let mirrored = Point::new(
            anchor.position.x * 2.0 - current.x,
            anchor.position.y * 2.0 - current.y,
        );
        anchor.set_control_out(current);
        anchor.set_control_in(mirrored);
        anchor.kind = AnchorKind::Smooth;
        Ok(())
    }

    /// Ends a pen-drag curve segment by appending a smooth anchor with
    /// fixed-reach handles at `end`.
    pub fn finish_curve_segment(&mut self, end: Point) -> Result<AnchorId> {
        let anchor_id = self.store.ids_mut().next_anchor_id();
        let path = self
            .current_path
            .as_mut()
            .ok_or_else(|| VectorError::state_conflict("Idle", "finish_curve_segment"))?;

        let mut anchor = AnchorPoint::new(anchor_id, end, AnchorKind::Smooth);
        anchor.set_control_in(Point::new(end.x - BEZIER_HANDLE_REACH, end.y));
        anchor.set_control_out(Point::new(end.x + BEZIER_HANDLE_REACH, end.y));
        path.anchors.push(anchor);
        self.selected_anchors = vec![anchor_id];
        Ok(anchor_id)
    }

    /// Commits the in-progress path into the active layer and selects
    /// it. A close request on a path with fewer than three anchors is
    /// silently downgraded to an open commit; open commits get zero
    /// fill opacity.
    pub fn finish(&mut self, close: bool) -> Result<PathId> {
        let mut path = self
            .current_path
            .take()
            .ok_or_else(|| VectorError::state_conflict("Idle", "finish"))?;

        let should_close = close && path.anchors.len() >= MIN_CLOSE_ANCHORS;
        path.closed = should_close;
        path.fill_opacity = if should_close {
            self.style.fill_opacity
        } else {
            0.0
        };

        let layer = self.store.active_layer_id();
        path.layer = layer;
        let id = self.store.commit_path(layer, path)?;
        self.selected_paths = vec![id];
        Ok(id)
    }

    /// Discards the in-progress path without committing.
    pub fn cancel(&mut self) -> Result<()> {
        if self.current_path.take().is_none() {
            return Err(VectorError::state_conflict("Idle", "cancel"));
        }
        self.selected_anchors.clear();
        Ok(())
    }

    /// Finds the segment of a committed path closest to `point`.
    /// Returns the insertion index for [`insert_point_on_segment`] and
    /// the snapped point on that segment. The closing segment of a
    /// closed path maps to insertion at the end.
    ///
    /// [`insert_point_on_segment`]: Engine::insert_point_on_segment
    pub fn nearest_segment(&self, path_id: PathId, point: Point) -> Result<(usize, Point)> {
        let path = self
            .store
            .path(path_id)
            .ok_or(VectorError::PathNotFound { id: path_id })?;
        if path.anchors.len() < 2 {
            return Err(VectorError::invalid("path has no segments"));
        }

        let mut best: Option<(usize, Point, f64)> = None;
        let count = path.anchors.len();
        let segments = if path.closed { count } else { count - 1 };
        for i in 0..segments {
            let a = path.anchors[i].position;
            let b = path.anchors[(i + 1) % count].position;
            let (snapped, _) = closest_point_on_segment(&point, &a, &b);
            let distance = point.distance_to(&snapped);
            if best.map(|(_, _, d)| distance < d).unwrap_or(true) {
                best = Some((i + 1, snapped, distance));
            }
        }

        // `segments >= 1` here, so a best candidate always exists.
        let (index, snapped, _) = best.ok_or_else(|| VectorError::invalid("path has no segments"))?;
        Ok((index, snapped))
    }

    /// Splices a new anchor into a committed path at `index`. With
    /// `as_curve`, control handles are derived from the two flanking
    /// anchors so the curve stays smooth through the new point.
    pub fn insert_point_on_segment(
        &mut self,
        path_id: PathId,
        point: Point,
        index: usize,
        as_curve: bool,
    ) -> Result<AnchorId> {
        let anchor_id = self.store.ids_mut().next_anchor_id();
        let path = self
            .store
            .path_mut(path_id)
            .ok_or(VectorError::PathNotFound { id: path_id })?;
        if index > path.anchors.len() {
            return Err(VectorError::invalid(format!(
                "insert index {} out of bounds for {} anchors",
                index,
                path.anchors.len()
            )));
        }

        let kind = if as_curve {
            AnchorKind::Smooth
        } else {
            AnchorKind::Corner
        };
        let mut anchor = AnchorPoint::new(anchor_id, point, kind);

        if as_curve {
            let prev = index.checked_sub(1).map(|i| path.anchors[i].position);
            let next = path.anchors.get(index).map(|a| a.position);
            if let (Some(prev), Some(next)) = (prev, next) {
                let handle_length =
                    point.distance_to(&prev).min(point.distance_to(&next)) * NEIGHBOR_HANDLE_RATIO;
                let in_angle = point.angle_to(&prev);
                let out_angle = point.angle_to(&next);
                anchor.set_control_in(point.offset_along(in_angle, handle_length));
                anchor.set_control_out(point.offset_along(out_angle, handle_length));
            }
        }

        path.anchors.insert(index, anchor);
        self.selected_anchors = vec![anchor_id];
        Ok(anchor_id)
    }
}
