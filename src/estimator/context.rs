use super::{collect_with_stats, EstimatorKind};
use crate::filter::OrientationFilter;
use crate::types::{ImageBounds, LineSegment};
use log::debug;
use nalgebra::Point2;
use serde::Serialize;

/// Counters describing how the line pairs of one image were resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairStats {
    pub pairs: usize,
    pub parallel: usize,
    pub out_of_bounds: usize,
}

/// State of a single image's estimation pass. Nothing here outlives the image.
#[derive(Clone, Debug)]
pub struct ProcessingContext {
    pub bounds: ImageBounds,
    /// Number of segments reported by the detector before filtering.
    pub raw_segments: usize,
    pub filtered: Vec<LineSegment>,
    pub intersections: Vec<Point2<f64>>,
    pub stats: PairStats,
    /// `None` when no retained intersection exists.
    pub estimate: Option<Point2<f64>>,
}

impl ProcessingContext {
    /// Filter `segments`, intersect every remaining pair and reduce the
    /// retained points with `estimator`.
    pub fn run(
        segments: &[LineSegment],
        bounds: ImageBounds,
        filter: &OrientationFilter,
        estimator: EstimatorKind,
    ) -> Self {
        let filtered = filter.apply(segments);
        let mut stats = PairStats::default();
        let intersections = collect_with_stats(&filtered, bounds, &mut stats);
        let estimate = estimator.reduce(&intersections);
        debug!(
            "estimate: raw={} filtered={} pairs={} parallel={} out_of_bounds={} retained={} vp={:?}",
            segments.len(),
            filtered.len(),
            stats.pairs,
            stats.parallel,
            stats.out_of_bounds,
            intersections.len(),
            estimate.map(|p| (p.x, p.y))
        );
        Self {
            bounds,
            raw_segments: segments.len(),
            filtered,
            intersections,
            stats,
            estimate,
        }
    }
}
