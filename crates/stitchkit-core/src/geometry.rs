//! 2D geometry primitives.
//!
//! All engine coordinates live in an abstract 2D space; callers are
//! responsible for converting pointer/pixel coordinates before they
//! reach the engine.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Angle of the vector from `self` toward `other`, in radians.
    pub fn angle_to(&self, other: &Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Point offset from `self` by `length` along `angle` (radians).
    pub fn offset_along(&self, angle: f64, length: f64) -> Point {
        Point::new(self.x + angle.cos() * length, self.y + angle.sin() * length)
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Projects `p` onto the segment `a`-`b`, clamped to the segment ends.
///
/// Returns the closest point and the clamped parameter `t` in `[0, 1]`.
pub fn closest_point_on_segment(p: &Point, a: &Point, b: &Point) -> (Point, f64) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq < f64::EPSILON {
        return (*a, 0.0);
    }

    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    (Point::new(a.x + t * dx, a.y + t * dy), t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
    }

    #[test]
    fn angle_points_toward_target() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(0.0, 2.0);
        assert!((a.angle_to(&b) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn segment_projection_clamps_to_ends() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);

        let (on, t) = closest_point_on_segment(&Point::new(4.0, 3.0), &a, &b);
        assert_eq!(on, Point::new(4.0, 0.0));
        assert!((t - 0.4).abs() < 1e-12);

        let (clamped, t) = closest_point_on_segment(&Point::new(-5.0, 1.0), &a, &b);
        assert_eq!(clamped, a);
        assert_eq!(t, 0.0);
    }

    #[test]
    fn degenerate_segment_projects_to_endpoint() {
        let a = Point::new(2.0, 2.0);
        let (on, t) = closest_point_on_segment(&Point::new(9.0, 9.0), &a, &a);
        assert_eq!(on, a);
        assert_eq!(t, 0.0);
    }
}
