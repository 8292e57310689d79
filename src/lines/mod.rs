//! Line segment detection: the collaborator that turns a raster into
//! candidate straight edges for the estimator.

pub mod detector;
pub mod hough;

pub use detector::{DetectorParams, HoughLineDetector, LineDetector};
pub use hough::{probabilistic_hough, HoughParams};
