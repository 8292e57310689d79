use super::hough::{probabilistic_hough, HoughParams};
use crate::edges::canny::blurred_canny;
use crate::error::{Error, Result};
use crate::image::ImageF32;
use crate::types::LineSegment;
use image::GrayImage;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Source of candidate line segments for one grayscale raster.
pub trait LineDetector {
    fn detect(&self, gray: &GrayImage) -> Vec<LineSegment>;
}

/// Fixed parameters of the blur → Canny → probabilistic Hough detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    /// Gaussian kernel size (odd).
    pub blur_kernel: usize,
    pub blur_sigma: f32,
    /// Canny hysteresis thresholds on the L1 Sobel magnitude.
    pub edge_low: f32,
    pub edge_high: f32,
    /// Accumulator distance resolution in pixels.
    pub hough_rho: f64,
    /// Accumulator angle resolution in radians.
    pub hough_theta: f64,
    pub hough_threshold: u32,
    pub hough_min_len: f64,
    pub hough_max_gap: u32,
    /// Seed for the Hough pixel visiting order; fixed for reproducible output.
    pub seed: u64,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            blur_kernel: 5,
            blur_sigma: 1.5,
            edge_low: 50.0,
            edge_high: 150.0,
            hough_rho: 1.0,
            hough_theta: std::f64::consts::PI / 180.0,
            hough_threshold: 100,
            hough_min_len: 100.0,
            hough_max_gap: 10,
            seed: 0,
        }
    }
}

impl DetectorParams {
    pub fn validate(&self) -> Result<()> {
        if self.blur_kernel % 2 == 0 {
            return Err(Error::InvalidParams(format!(
                "blur_kernel must be odd, got {}",
                self.blur_kernel
            )));
        }
        if !(self.blur_sigma > 0.0) {
            return Err(Error::InvalidParams(format!(
                "blur_sigma must be positive, got {}",
                self.blur_sigma
            )));
        }
        if !(self.edge_low >= 0.0 && self.edge_low <= self.edge_high) {
            return Err(Error::InvalidParams(format!(
                "edge thresholds must satisfy 0 <= low <= high, got {}/{}",
                self.edge_low, self.edge_high
            )));
        }
        if !(self.hough_rho > 0.0 && self.hough_theta > 0.0) {
            return Err(Error::InvalidParams(format!(
                "hough resolutions must be positive, got rho={} theta={}",
                self.hough_rho, self.hough_theta
            )));
        }
        Ok(())
    }

    pub fn hough(&self) -> HoughParams {
        HoughParams {
            rho: self.hough_rho,
            theta: self.hough_theta,
            threshold: self.hough_threshold,
            min_line_length: self.hough_min_len,
            max_line_gap: self.hough_max_gap,
        }
    }
}

/// Line detector built from Gaussian blur, Canny edges and the probabilistic
/// Hough transform.
#[derive(Clone, Debug, Default)]
pub struct HoughLineDetector {
    params: DetectorParams,
}

impl HoughLineDetector {
    pub fn new(params: DetectorParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &DetectorParams {
        &self.params
    }
}

impl LineDetector for HoughLineDetector {
    fn detect(&self, gray: &GrayImage) -> Vec<LineSegment> {
        let p = &self.params;
        let t0 = Instant::now();
        let l = ImageF32::from_gray(gray);
        let edges = blurred_canny(&l, p.blur_kernel, p.blur_sigma, p.edge_low, p.edge_high);
        let edges_ms = t0.elapsed().as_secs_f64() * 1000.0;

        let t1 = Instant::now();
        let mut rng = StdRng::seed_from_u64(p.seed);
        let lines = probabilistic_hough(&edges, &p.hough(), &mut rng);
        debug!(
            "detector: {}x{} edge_px={} lines={} edges_ms={:.3} hough_ms={:.3}",
            l.w,
            l.h,
            edges.count(),
            lines.len(),
            edges_ms,
            t1.elapsed().as_secs_f64() * 1000.0
        );
        lines
    }
}
