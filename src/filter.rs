//! Orientation filter applied to raw detector output.
//!
//! A segment is kept iff `min_angle_deg < |angle| < max_angle_deg`, where
//! `angle = atan2(dy, dx)` in degrees. With the default `(20, 160)` window this
//! drops near-horizontal segments only; near-vertical ones (|angle| ≈ 90) pass.
use crate::types::LineSegment;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationFilter {
    /// Exclusive lower bound on `|angle|` in degrees.
    pub min_angle_deg: f64,
    /// Exclusive upper bound on `|angle|` in degrees.
    pub max_angle_deg: f64,
}

impl Default for OrientationFilter {
    fn default() -> Self {
        Self {
            min_angle_deg: 20.0,
            max_angle_deg: 160.0,
        }
    }
}

impl OrientationFilter {
    #[inline]
    pub fn accepts(&self, seg: &LineSegment) -> bool {
        let a = seg.angle_deg().abs();
        a > self.min_angle_deg && a < self.max_angle_deg
    }

    /// Ordered subsequence of `segments` that pass the orientation test.
    pub fn apply(&self, segments: &[LineSegment]) -> Vec<LineSegment> {
        segments
            .iter()
            .filter(|s| self.accepts(s))
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_diagonals_and_verticals() {
        let f = OrientationFilter::default();
        assert!(f.accepts(&LineSegment::from_ints(0, 0, 10, 10)));
        assert!(f.accepts(&LineSegment::from_ints(0, 10, 10, 0)));
        assert!(f.accepts(&LineSegment::from_ints(5, 0, 5, 100)));
        assert!(f.accepts(&LineSegment::from_ints(5, 100, 5, 0)));
    }

    #[test]
    fn drops_near_horizontal_both_directions() {
        let f = OrientationFilter::default();
        assert!(!f.accepts(&LineSegment::from_ints(0, 0, 10, 0)));
        assert!(!f.accepts(&LineSegment::from_ints(10, 5, 0, 5)));
        // ~11.3 degrees
        assert!(!f.accepts(&LineSegment::from_ints(0, 0, 10, 2)));
        // ~168.7 degrees
        assert!(!f.accepts(&LineSegment::from_ints(10, 0, 0, 2)));
    }

    #[test]
    fn bounds_are_exclusive() {
        let f = OrientationFilter {
            min_angle_deg: 45.0,
            max_angle_deg: 135.0,
        };
        assert!(!f.accepts(&LineSegment::from_ints(0, 0, 10, 10)));
        assert!(!f.accepts(&LineSegment::from_ints(10, 0, 0, 10)));
        assert!(f.accepts(&LineSegment::from_ints(0, 0, 10, 11)));
    }

    #[test]
    fn degenerate_segment_is_rejected() {
        let f = OrientationFilter::default();
        assert!(!f.accepts(&LineSegment::from_ints(4, 4, 4, 4)));
    }

    #[test]
    fn apply_preserves_order_and_is_idempotent() {
        let f = OrientationFilter::default();
        let input = vec![
            LineSegment::from_ints(0, 0, 10, 10),
            LineSegment::from_ints(0, 0, 10, 0),
            LineSegment::from_ints(3, 0, 3, 50),
            LineSegment::from_ints(0, 5, 10, 5),
            LineSegment::from_ints(0, 10, 10, 0),
        ];
        let once = f.apply(&input);
        assert_eq!(once, vec![input[0], input[2], input[4]]);
        assert_eq!(f.apply(&once), once);
    }

    #[test]
    fn empty_output_is_valid() {
        let f = OrientationFilter::default();
        assert!(f.apply(&[]).is_empty());
        assert!(f.apply(&[LineSegment::from_ints(0, 0, 50, 1)]).is_empty());
    }
}
