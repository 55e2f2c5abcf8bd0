//! Anchor classification changes and curve sculpting.
//!
//! Corner-to-smooth promotion synthesizes handles from neighboring
//! geometry; the neighbor anchors also receive counterpart handles on
//! the shared side, otherwise only one half of each segment would
//! curve and the join would look broken.

use stitchkit_core::constants::{
    AUTO_CURVE_BIAS, CURVE_BIAS, END_TANGENT_RATIO, MIRROR_HANDLE_RATIO, NEIGHBOR_HANDLE_RATIO,
    TANGENT_HANDLE_RATIO,
};
use stitchkit_core::{AnchorId, PathId, Point, Result, VectorError};

use crate::model::AnchorKind;

use super::Engine;

/// Concavity bias for free-form curve sculpting. `Auto` infers the
/// direction from the anchor's position relative to its neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveDirection {
    Auto,
    Up,
    Down,
}

impl Engine {
    /// Converts an anchor between corner and smooth classification.
    ///
    /// Corner -> Smooth derives handles from the previous and next
    /// anchors (0.3x the shorter neighbor distance; endpoints get a
    /// shorter mirrored handle on the open side) and synthesizes any
    /// missing counterpart handle on the neighbors. Smooth -> Corner
    /// drops both handles and leaves the neighbors untouched.
    pub fn convert_point_type(
        &mut self,
        path_id: PathId,
        anchor_id: AnchorId,
        kind: AnchorKind,
    ) -> Result<()> {
        let path = self
            .store
            .path_mut(path_id)
            .ok_or(VectorError::PathNotFound { id: path_id })?;
        let index = path
            .anchor_index(anchor_id)
            .ok_or(VectorError::AnchorNotFound { id: anchor_id })?;

        if kind == AnchorKind::Corner {
            let anchor = &mut path.anchors[index];
            anchor.clear_handles();
            anchor.kind = AnchorKind::Corner;
            return Ok(());
        }

        let position = path.anchors[index].position;
        let prev = index.checked_sub(1).map(|i| path.anchors[i].position);
        let next = path.anchors.get(index + 1).map(|a| a.position);

        {
            let anchor = &mut path.anchors[index];
            anchor.kind = AnchorKind::Smooth;

            match (prev, next) {
                (Some(prev), Some(next)) => {
                    let handle_length = position.distance_to(&prev).min(position.distance_to(&next))
                        * NEIGHBOR_HANDLE_RATIO;
                    if handle_length > f64::EPSILON {
                        let in_angle = position.angle_to(&prev);
                        let out_angle = position.angle_to(&next);
                        anchor.set_control_in(position.offset_along(in_angle, handle_length));
                        anchor.set_control_out(position.offset_along(out_angle, handle_length));
                    }
                }
                (Some(prev), None) => {
                    let handle_length = position.distance_to(&prev) * NEIGHBOR_HANDLE_RATIO;
                    if handle_length > f64::EPSILON {
                        let in_angle = position.angle_to(&prev);
                        anchor.set_control_in(position.offset_along(in_angle, handle_length));
                        // Shorter mirrored handle on the open side keeps
                        // the tangent natural instead of kinking.
                        anchor.set_control_out(position.offset_along(
                            in_angle + std::f64::consts::PI,
                            handle_length * MIRROR_HANDLE_RATIO,
                        ));
                    }
                }
                (None, Some(next)) => {
                    let handle_length = position.distance_to(&next) * NEIGHBOR_HANDLE_RATIO;
                    if handle_length > f64::EPSILON {
                        let out_angle = position.angle_to(&next);
                        anchor.set_control_out(position.offset_along(out_angle, handle_length));
                        anchor.set_control_in(position.offset_along(
                            out_angle + std::f64::consts::PI,
                            handle_length * MIRROR_HANDLE_RATIO,
                        ));
                    }
                }
                (None, None) => {}
            }
        }

        // Dual-sided fix-up: the segment only curves if the neighbor
        // carries a handle on the shared side too.
        if let Some(prev) = prev {
            let distance = position.distance_to(&prev);
            if distance > f64::EPSILON {
                let neighbor = &mut path.anchors[index - 1];
                if neighbor.control_out.is_none() {
                    let angle = prev.angle_to(&position);
                    neighbor
                        .set_control_out(prev.offset_along(angle, distance * NEIGHBOR_HANDLE_RATIO));
                }
            }
        }
        if let Some(next) = next {
            let distance = position.distance_to(&next);
            if distance > f64::EPSILON {
                let neighbor = &mut path.anchors[index + 1];
                if neighbor.control_in.is_none() {
                    let angle = next.angle_to(&position);
                    neighbor
                        .set_control_in(next.offset_along(angle, distance * NEIGHBOR_HANDLE_RATIO));
                }
            }
        }

        Ok(())
    }

    /// Strength-parameterized smooth conversion for free-form curve
    /// sculpting. The tangent runs between the neighbors and the curve
    /// is biased perpendicular to it; `Auto` picks the bias from
    /// whether the anchor sits above or below the neighbor midpoint.
    /// Handles only materialize on sides that have a neighbor.
    pub fn convert_to_bezier(
        &mut self,
        path_id: PathId,
        anchor_id: AnchorId,
        direction: CurveDirection,
        strength: f64,
    ) -> Result<()> {
        let path = self
            .store
            .path_mut(path_id)
            .ok_or(VectorError::PathNotFound { id: path_id })?;
        let index = path
            .anchor_index(anchor_id)
            .ok_or(VectorError::AnchorNotFound { id: anchor_id })?;

        let position = path.anchors[index].position;
        let prev = index.checked_sub(1).map(|i| path.anchors[i].position);
        let next = path.anchors.get(index + 1).map(|a| a.position);

        let anchor = &mut path.anchors[index];
        anchor.kind = AnchorKind::Smooth;

        match (prev, next) {
            (Some(prev), Some(next)) => {
                let dx = next.x - prev.x;
                let dy = next.y - prev.y;
                let distance = (dx * dx + dy * dy).sqrt();
                if distance < f64::EPSILON {
                    return Ok(());
                }
                let reach = (distance * TANGENT_HANDLE_RATIO).min(strength);
                let tx = dx / distance;
                let ty = dy / distance;

                let bias = match direction {
                    CurveDirection::Up => -CURVE_BIAS,
                    CurveDirection::Down => CURVE_BIAS,
                    CurveDirection::Auto => {
                        if position.y > (prev.y + next.y) / 2.0 {
                            AUTO_CURVE_BIAS
                        } else {
                            -AUTO_CURVE_BIAS
                        }
                    }
                };

                anchor.set_control_in(Point::new(
                    position.x - tx * reach,
                    position.y - ty * reach + bias,
                ));
                anchor.set_control_out(Point::new(
                    position.x + tx * reach,
                    position.y + ty * reach + bias,
                ));
            }
            (Some(prev), None) => {
                let distance = position.distance_to(&prev);
                if distance < f64::EPSILON {
                    return Ok(());
                }
                let reach = (distance * END_TANGENT_RATIO).min(strength);
                let angle = prev.angle_to(&position);
                anchor.set_control_in(position.offset_along(angle, -reach));
            }
            (None, Some(next)) => {
                let distance = position.distance_to(&next);
                if distance < f64::EPSILON {
                    return Ok(());
                }
                let reach = (distance * END_TANGENT_RATIO).min(strength);
                let angle = position.angle_to(&next);
                anchor.set_control_out(position.offset_along(angle, reach));
            }
            (None, None) => {}
        }

        Ok(())
    }

    /// Promotes every selected anchor to smooth, with the same neighbor
    /// fix-up as [`convert_point_type`]. Anchors whose owning path has
    /// disappeared are skipped.
    ///
    /// [`convert_point_type`]: Engine::convert_point_type
    pub fn convert_selected_to_smooth(&mut self) {
        let targets: Vec<(PathId, AnchorId)> = self
            .selected_anchors
            .iter()
            .filter_map(|&anchor| {
                self.store
                    .path_of_anchor(anchor)
                    .map(|path| (path.id, anchor))
            })
            .collect();

        for (path, anchor) in targets {
            let _ = self.convert_point_type(path, anchor, AnchorKind::Smooth);
        }
    }
}
