//! Edge extraction for the line detector: Gaussian smoothing, Sobel gradients
//! and Canny-style non-maximum suppression with hysteresis.
//!
//! All stages work on [`ImageF32`](crate::image::ImageF32) buffers holding
//! 8-bit scale intensities, replicate the border when sampling outside the
//! image, and leave the outermost one-pixel frame free of edges.

pub mod blur;
pub mod canny;
pub mod grad;

pub use blur::{gaussian_blur, GaussianKernel, SeparableFilter};
pub use canny::{canny, hysteresis, non_max_suppression, EdgeMap};
pub use grad::{sobel_gradients, Grad, GradientNorm};
