//! Serializable summaries of per-image and per-batch processing.
use crate::estimator::{PairStats, ProcessingContext};
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of one successfully written image.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub raw_segments: usize,
    pub filtered_segments: usize,
    pub pairs: PairStats,
    pub retained_intersections: usize,
    /// `None` when no intersection survived; no marker was drawn.
    pub vanishing_point: Option<[f64; 2]>,
    pub elapsed_ms: f64,
}

impl ImageReport {
    pub fn new(
        input: PathBuf,
        output: PathBuf,
        ctx: &ProcessingContext,
        elapsed_ms: f64,
    ) -> Self {
        Self {
            input,
            output,
            width: ctx.bounds.width,
            height: ctx.bounds.height,
            raw_segments: ctx.raw_segments,
            filtered_segments: ctx.filtered.len(),
            pairs: ctx.stats,
            retained_intersections: ctx.intersections.len(),
            vanishing_point: ctx.estimate.map(|p| [p.x, p.y]),
            elapsed_ms,
        }
    }
}

/// An input the decoder could not read; the batch continued without it.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedImage {
    pub input: PathBuf,
    pub reason: String,
}

/// An input whose processing or output failed after it was decoded.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedImage {
    pub input: PathBuf,
    pub error: String,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub processed: Vec<ImageReport>,
    pub skipped: Vec<SkippedImage>,
    pub failed: Vec<FailedImage>,
    pub elapsed_ms: f64,
}

impl BatchReport {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    pub fn summary(&self) -> String {
        let with_vp = self
            .processed
            .iter()
            .filter(|r| r.vanishing_point.is_some())
            .count();
        format!(
            "processed={} with_vp={} skipped={} failed={} elapsed_ms={:.1}",
            self.processed.len(),
            with_vp,
            self.skipped.len(),
            self.failed.len(),
            self.elapsed_ms
        )
    }
}
