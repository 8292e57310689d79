//! Per-image pipeline: detect → filter → intersect → reduce → overlay.
use crate::config::BatchConfig;
use crate::diagnostics::ImageReport;
use crate::error::{Error, Result};
use crate::estimator::{EstimatorKind, ProcessingContext};
use crate::filter::OrientationFilter;
use crate::image::io::{load_image, save_rgb};
use crate::lines::{HoughLineDetector, LineDetector};
use crate::overlay::{render_overlay, OverlayStyle};
use crate::types::ImageBounds;
use image::{DynamicImage, GenericImageView, RgbImage};
use log::info;
use std::path::Path;
use std::time::{Duration, Instant};

/// Estimation context together with the rendered overlay.
#[derive(Clone, Debug)]
pub struct Processed {
    pub context: ProcessingContext,
    pub overlay: RgbImage,
}

/// Stateless across images; safe to share between worker threads.
pub struct Pipeline {
    detector: Box<dyn LineDetector + Send + Sync>,
    pub filter: OrientationFilter,
    pub estimator: EstimatorKind,
    pub overlay: OverlayStyle,
    pub deadline: Option<Duration>,
}

impl Pipeline {
    pub fn new<D>(detector: D) -> Self
    where
        D: LineDetector + Send + Sync + 'static,
    {
        Self {
            detector: Box::new(detector),
            filter: OrientationFilter::default(),
            estimator: EstimatorKind::default(),
            overlay: OverlayStyle::default(),
            deadline: None,
        }
    }

    pub fn from_config(config: &BatchConfig) -> Result<Self> {
        let detector = HoughLineDetector::new(config.detector.clone())?;
        Ok(Self {
            filter: config.filter,
            estimator: config.estimator,
            overlay: config.overlay.clone(),
            deadline: config.deadline(),
            ..Self::new(detector)
        })
    }

    /// Run detection and estimation without rendering.
    pub fn estimate(&self, image: &DynamicImage) -> ProcessingContext {
        let gray = image.to_luma8();
        let segments = self.detector.detect(&gray);
        let (width, height) = image.dimensions();
        let bounds = ImageBounds::new(width, height);
        ProcessingContext::run(&segments, bounds, &self.filter, self.estimator)
    }

    pub fn process(&self, image: &DynamicImage) -> Processed {
        let context = self.estimate(image);
        let overlay = render_overlay(image, &context.filtered, context.estimate, &self.overlay);
        Processed { context, overlay }
    }

    /// Load `input`, process it and write the overlay to `output`.
    pub fn process_file(&self, input: &Path, output: &Path) -> Result<ImageReport> {
        let t0 = Instant::now();
        let image = load_image(input)?;
        let processed = self.process(&image);

        let elapsed = t0.elapsed();
        if let Some(limit) = self.deadline {
            if elapsed > limit {
                return Err(Error::DeadlineExceeded {
                    path: input.to_path_buf(),
                    limit_ms: limit.as_millis() as u64,
                    elapsed_ms: elapsed.as_secs_f64() * 1000.0,
                });
            }
        }

        save_rgb(&processed.overlay, output)?;
        let elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;
        let report = ImageReport::new(
            input.to_path_buf(),
            output.to_path_buf(),
            &processed.context,
            elapsed_ms,
        );
        match report.vanishing_point {
            Some([x, y]) => info!(
                "Processed: {} -> {} (lines={} vp=({:.1}, {:.1}))",
                input.display(),
                output.display(),
                report.filtered_segments,
                x,
                y
            ),
            None => info!(
                "Processed: {} -> {} (lines={} vp=none)",
                input.display(),
                output.display(),
                report.filtered_segments
            ),
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LineSegment;
    use image::{GrayImage, Rgb};

    struct FixedLines(Vec<LineSegment>);

    impl LineDetector for FixedLines {
        fn detect(&self, _gray: &GrayImage) -> Vec<LineSegment> {
            self.0.clone()
        }
    }

    fn canvas() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 48, Rgb([10, 20, 30])))
    }

    #[test]
    fn no_lines_leaves_image_unchanged() {
        let pipeline = Pipeline::new(FixedLines(Vec::new()));
        let img = canvas();
        let out = pipeline.process(&img);
        assert!(out.context.estimate.is_none());
        assert_eq!(&out.overlay, img.as_rgb8().unwrap());
    }

    #[test]
    fn only_horizontal_lines_draws_nothing() {
        let pipeline = Pipeline::new(FixedLines(vec![
            LineSegment::from_ints(0, 10, 60, 10),
            LineSegment::from_ints(0, 20, 60, 21),
        ]));
        let img = canvas();
        let out = pipeline.process(&img);
        assert!(out.context.filtered.is_empty());
        assert_eq!(&out.overlay, img.as_rgb8().unwrap());
    }

    #[test]
    fn crossing_lines_get_marker() {
        let pipeline = Pipeline::new(FixedLines(vec![
            LineSegment::from_ints(0, 0, 40, 40),
            LineSegment::from_ints(0, 40, 40, 0),
        ]));
        let out = pipeline.process(&canvas());
        let vp = out.context.estimate.expect("estimate defined");
        assert!((vp.x - 20.0).abs() < 1e-9 && (vp.y - 20.0).abs() < 1e-9);
        assert_eq!(out.overlay.get_pixel(20, 20), &Rgb([255, 0, 0]));
    }

    #[test]
    fn missing_file_is_load_failure() {
        let pipeline = Pipeline::new(FixedLines(Vec::new()));
        let dir = std::env::temp_dir().join("vanishing_point_pipeline_missing");
        let err = pipeline
            .process_file(&dir.join("nope.png"), &dir.join("out.png"))
            .unwrap_err();
        assert!(err.is_load_failure(), "{err}");
    }
}
