use crate::angle::segment_angle_deg;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Straight edge reported by a line detector, in image pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub p0: [f64; 2],
    pub p1: [f64; 2],
}

impl LineSegment {
    pub fn new(p0: [f64; 2], p1: [f64; 2]) -> Self {
        Self { p0, p1 }
    }

    /// Build from integer endpoints `(x1, y1)-(x2, y2)` as produced by the Hough stage.
    pub fn from_ints(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self::new([x1 as f64, y1 as f64], [x2 as f64, y2 as f64])
    }

    /// `(x2 - x1, y2 - y1)`
    pub fn delta(&self) -> [f64; 2] {
        [self.p1[0] - self.p0[0], self.p1[1] - self.p0[1]]
    }

    pub fn length(&self) -> f64 {
        let [dx, dy] = self.delta();
        dx.hypot(dy)
    }

    /// Orientation relative to the horizontal axis in degrees, range (-180, 180].
    pub fn angle_deg(&self) -> f64 {
        let [dx, dy] = self.delta();
        segment_angle_deg(dx, dy)
    }
}

/// Region in which pairwise intersections are retained: `[0, 2W) x [0, 2H)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ImageBounds {
    pub width: u32,
    pub height: u32,
}

impl ImageBounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn contains(&self, p: &Point2<f64>) -> bool {
        let max_x = 2.0 * self.width as f64;
        let max_y = 2.0 * self.height as f64;
        p.x >= 0.0 && p.y >= 0.0 && p.x < max_x && p.y < max_y
    }
}
