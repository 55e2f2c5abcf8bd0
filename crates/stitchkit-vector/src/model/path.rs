use serde::{Deserialize, Serialize};

use stitchkit_core::constants::MIN_CLOSE_ANCHORS;
use stitchkit_core::{AnchorId, LayerId, PathId, Point};

use super::{AnchorKind, AnchorPoint};

/// A multi-segment vector path: an ordered anchor sequence with stroke
/// and fill style. `closed` joins the last anchor back to the first and
/// is only meaningful with at least three anchors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorPath {
    pub id: PathId,
    pub anchors: Vec<AnchorPoint>,
    pub closed: bool,
    pub stroke_color: String,
    pub stroke_width: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
    pub layer: LayerId,
}

impl VectorPath {
    pub fn anchor(&self, id: AnchorId) -> Option<&AnchorPoint> {
        self.anchors.iter().find(|a| a.id == id)
    }

    pub fn anchor_mut(&mut self, id: AnchorId) -> Option<&mut AnchorPoint> {
        self.anchors.iter_mut().find(|a| a.id == id)
    }

    pub fn anchor_index(&self, id: AnchorId) -> Option<usize> {
        self.anchors.iter().position(|a| a.id == id)
    }

    /// Ray-casting parity test against the anchor polygon. Curved
    /// segments are approximated by their chords, which matches the
    /// fill behavior users see. Open or degenerate paths never contain
    /// anything.
    pub fn contains_point(&self, point: &Point) -> bool {
        if !self.closed || self.anchors.len() < MIN_CLOSE_ANCHORS {
            return false;
        }

        let mut inside = false;
        let n = self.anchors.len();
        let mut j = n - 1;
        for i in 0..n {
            let pi = self.anchors[i].position;
            let pj = self.anchors[j].position;
            if (pi.y > point.y) != (pj.y > point.y)
                && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
            {
                inside = !inside;
            }
            j = i;
        }

        inside
    }

    /// Polygon area via the shoelace formula, over anchor positions.
    /// Used to rank nested shapes; smaller area means more specific.
    pub fn area(&self) -> f64 {
        if self.anchors.len() < MIN_CLOSE_ANCHORS {
            return 0.0;
        }

        let mut area = 0.0;
        let n = self.anchors.len();
        for i in 0..n {
            let a = self.anchors[i].position;
            let b = self.anchors[(i + 1) % n].position;
            area += a.x * b.y;
            area -= b.x * a.y;
        }

        area.abs() / 2.0
    }

    /// Straight-line lengths of each consecutive anchor pair.
    pub fn segment_lengths(&self) -> Vec<f64> {
        self.anchors
            .windows(2)
            .map(|w| w[0].position.distance_to(&w[1].position))
            .collect()
    }

    /// True when every anchor is a corner with no handles.
    pub fn is_polyline(&self) -> bool {
        self.anchors
            .iter()
            .all(|a| a.kind == AnchorKind::Corner && a.control_in.is_none() && a.control_out.is_none())
    }
}
