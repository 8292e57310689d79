//! Pairwise intersection aggregation and vanishing point reduction.
//!
//! Every unordered pair `(i, j)` with `i < j` of filtered lines is intersected.
//! Defined points inside [`ImageBounds`] are retained and reduced to a single
//! estimate, by default the component-wise arithmetic mean. The pass is
//! quadratic in the number of lines, which stays small after filtering.

mod context;

pub use context::{PairStats, ProcessingContext};

use crate::intersection::{intersect, Intersection};
use crate::types::{ImageBounds, LineSegment};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Reduction applied to the retained intersection set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimatorKind {
    /// Component-wise arithmetic mean.
    #[default]
    Mean,
    /// Component-wise median; less sensitive to stray intersections.
    Median,
}

impl EstimatorKind {
    /// Reduce `points` to one estimate; `None` when the set is empty.
    pub fn reduce(self, points: &[Point2<f64>]) -> Option<Point2<f64>> {
        match self {
            EstimatorKind::Mean => mean_point(points),
            EstimatorKind::Median => median_point(points),
        }
    }
}

pub fn mean_point(points: &[Point2<f64>]) -> Option<Point2<f64>> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point2::new(sx / n, sy / n))
}

pub fn median_point(points: &[Point2<f64>]) -> Option<Point2<f64>> {
    if points.is_empty() {
        return None;
    }
    let mut xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let mut ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    Some(Point2::new(median(&mut xs), median(&mut ys)))
}

fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        0.5 * (values[mid - 1] + values[mid])
    }
}

/// Intersections of all unordered line pairs that fall inside `bounds`.
pub fn collect_intersections(lines: &[LineSegment], bounds: ImageBounds) -> Vec<Point2<f64>> {
    let mut stats = PairStats::default();
    collect_with_stats(lines, bounds, &mut stats)
}

pub(crate) fn collect_with_stats(
    lines: &[LineSegment],
    bounds: ImageBounds,
    stats: &mut PairStats,
) -> Vec<Point2<f64>> {
    let mut retained = Vec::new();
    for (i, a) in lines.iter().enumerate() {
        for b in &lines[i + 1..] {
            stats.pairs += 1;
            match intersect(a, b) {
                Intersection::Parallel => stats.parallel += 1,
                Intersection::Point(p) if bounds.contains(&p) => retained.push(p),
                Intersection::Point(_) => stats.out_of_bounds += 1,
            }
        }
    }
    retained
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn mean_of_empty_set_is_undefined() {
        assert!(EstimatorKind::Mean.reduce(&[]).is_none());
        assert!(EstimatorKind::Median.reduce(&[]).is_none());
    }

    #[test]
    fn mean_is_componentwise_and_order_independent() {
        let pts = vec![
            Point2::new(1.0, 10.0),
            Point2::new(2.0, 20.0),
            Point2::new(6.0, 30.0),
            Point2::new(3.5, 0.25),
        ];
        let m = EstimatorKind::Mean.reduce(&pts).unwrap();
        assert_abs_diff_eq!(m.x, 12.5 / 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.y, 60.25 / 4.0, epsilon = 1e-12);

        let mut rev = pts.clone();
        rev.reverse();
        let r = EstimatorKind::Mean.reduce(&rev).unwrap();
        assert_abs_diff_eq!(m.x, r.x, epsilon = 1e-12);
        assert_abs_diff_eq!(m.y, r.y, epsilon = 1e-12);
    }

    #[test]
    fn median_ignores_a_single_outlier() {
        let pts = vec![
            Point2::new(10.0, 10.0),
            Point2::new(11.0, 9.0),
            Point2::new(9.0, 11.0),
            Point2::new(500.0, 400.0),
        ];
        let m = EstimatorKind::Median.reduce(&pts).unwrap();
        assert_abs_diff_eq!(m.x, 10.5, epsilon = 1e-12);
        assert_abs_diff_eq!(m.y, 10.5, epsilon = 1e-12);
    }

    #[test]
    fn pairs_are_visited_once_without_self_pairing() {
        // Three lines through (50, 50), none parallel.
        let lines = vec![
            LineSegment::from_ints(0, 0, 100, 100),
            LineSegment::from_ints(0, 100, 100, 0),
            LineSegment::from_ints(50, 0, 50, 100),
        ];
        let mut stats = PairStats::default();
        let pts = collect_with_stats(&lines, ImageBounds::new(100, 100), &mut stats);
        assert_eq!(stats.pairs, 3);
        assert_eq!(pts.len(), 3);
        for p in pts {
            assert_abs_diff_eq!(p.x, 50.0, epsilon = 1e-9);
            assert_abs_diff_eq!(p.y, 50.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn out_of_bounds_and_parallel_pairs_are_dropped() {
        let bounds = ImageBounds::new(10, 10);
        let lines = vec![
            // These two meet at (-5, 5): negative x.
            LineSegment::from_ints(0, 0, -1, 1),
            LineSegment::from_ints(0, 10, -1, 9),
            // Parallel to the first.
            LineSegment::from_ints(3, 0, 2, 1),
        ];
        let mut stats = PairStats::default();
        let pts = collect_with_stats(&lines, bounds, &mut stats);
        assert_eq!(stats.pairs, 3);
        assert_eq!(stats.parallel, 1);
        for p in &pts {
            assert!(bounds.contains(p));
        }
        assert_eq!(pts.len() + stats.parallel + stats.out_of_bounds, 3);
    }
}
