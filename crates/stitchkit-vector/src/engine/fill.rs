//! Hit-testing and area-based color application.

use tracing::debug;

use stitchkit_core::constants::MIN_VISIBLE_FILL_OPACITY;
use stitchkit_core::{PathId, Point, Result, VectorError};

use super::Engine;

/// Which color a paint operation applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillTarget {
    Stroke,
    Fill,
}

impl Engine {
    /// All closed paths on visible layers containing `point`, sorted by
    /// enclosed area ascending. The first entry is the innermost region
    /// under the point, so nested shapes resolve to the smallest hit.
    pub fn find_paths_containing_point(&self, point: Point) -> Vec<PathId> {
        let mut hits: Vec<(PathId, f64)> = self
            .store
            .visible_paths()
            .filter(|path| path.contains_point(&point))
            .map(|path| (path.id, path.area()))
            .collect();
        hits.sort_by(|a, b| a.1.total_cmp(&b.1));
        hits.into_iter().map(|(id, _)| id).collect()
    }

    /// Applies `color` to a path's stroke or fill and makes it the new
    /// default for subsequent paths. Filling also raises the opacity to
    /// a visible floor, so painting a fully transparent shape has a
    /// visible effect.
    pub fn apply_color_to_path(
        &mut self,
        id: PathId,
        color: &str,
        target: FillTarget,
    ) -> Result<()> {
        match target {
            FillTarget::Stroke => {
                let path = self
                    .store
                    .path_mut(id)
                    .ok_or(VectorError::PathNotFound { id })?;
                path.stroke_color = color.to_string();
                self.style.stroke_color = color.to_string();
            }
            FillTarget::Fill => {
                let opacity = self.style.fill_opacity.max(MIN_VISIBLE_FILL_OPACITY);
                let path = self
                    .store
                    .path_mut(id)
                    .ok_or(VectorError::PathNotFound { id })?;
                path.fill_color = color.to_string();
                path.fill_opacity = opacity;
                self.style.fill_color = color.to_string();
                self.style.fill_opacity = opacity;
            }
        }
        self.select_path(id, false);
        Ok(())
    }

    /// Paints the innermost visible region under `point`. Returns false
    /// when no closed path contains the point.
    pub fn apply_color_to_area(&mut self, point: Point, color: &str, target: FillTarget) -> bool {
        let Some(&id) = self.find_paths_containing_point(point).first() else {
            debug!(x = point.x, y = point.y, "no fillable region under point");
            return false;
        };
        // The id was just looked up, so the path exists.
        self.apply_color_to_path(id, color, target).is_ok()
    }
}
