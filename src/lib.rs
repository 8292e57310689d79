#![doc = include_str!("../README.md")]

// Geometric core
pub mod angle;
pub mod estimator;
pub mod filter;
pub mod intersection;
pub mod types;

// Line detection collaborator and raster plumbing
pub mod edges;
pub mod image;
pub mod lines;
pub mod overlay;

// Driver layer
pub mod batch;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod pipeline;

// --- High-level re-exports -------------------------------------------------

pub use crate::batch::run_batch;
pub use crate::config::{load_config, BatchConfig};
pub use crate::diagnostics::{BatchReport, ImageReport};
pub use crate::error::{Error, Result};
pub use crate::estimator::{EstimatorKind, ProcessingContext};
pub use crate::filter::OrientationFilter;
pub use crate::intersection::{intersect, Intersection};
pub use crate::lines::{DetectorParams, HoughLineDetector, LineDetector};
pub use crate::pipeline::Pipeline;
pub use crate::types::{ImageBounds, LineSegment};

/// Small prelude for quick experiments.
///
/// ```no_run
/// use vanishing_point::prelude::*;
///
/// # fn main() -> vanishing_point::Result<()> {
/// let img = image::open("street.jpg").expect("readable image");
/// let pipeline = Pipeline::new(HoughLineDetector::default());
/// let ctx = pipeline.estimate(&img);
/// println!("lines={} vp={:?}", ctx.filtered.len(), ctx.estimate);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::{
        EstimatorKind, HoughLineDetector, LineDetector, LineSegment, OrientationFilter, Pipeline,
    };
}
