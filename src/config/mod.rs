//! JSON configuration for the batch driver.
//!
//! Every section is optional; a missing section falls back to its defaults.
//!
//! ```json
//! {
//!   "input_dir": "Estimate_vanishing_points_data",
//!   "output_dir": "output_results",
//!   "detector": { "hough_threshold": 100, "hough_min_len": 100 },
//!   "filter": { "min_angle_deg": 20, "max_angle_deg": 160 },
//!   "estimator": "mean",
//!   "overlay": { "line_color": [0, 255, 0], "marker_radius": 10 },
//!   "parallel": false,
//!   "deadline_ms": null,
//!   "report_json": "output_results/report.json"
//! }
//! ```
use crate::error::{Error, Result};
use crate::estimator::EstimatorKind;
use crate::filter::OrientationFilter;
use crate::lines::DetectorParams;
use crate::overlay::OverlayStyle;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Directory whose regular files are processed.
    pub input_dir: PathBuf,
    /// Directory receiving one overlay per input, under the same file name.
    pub output_dir: PathBuf,
    pub detector: DetectorParams,
    pub filter: OrientationFilter,
    pub estimator: EstimatorKind,
    pub overlay: OverlayStyle,
    /// Process images concurrently on the rayon pool.
    pub parallel: bool,
    /// Per-image processing budget; exceeding it is reported as a failure.
    pub deadline_ms: Option<u64>,
    /// Optional path of a JSON summary of the batch.
    pub report_json: Option<PathBuf>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("Estimate_vanishing_points_data"),
            output_dir: PathBuf::from("output_results"),
            detector: DetectorParams::default(),
            filter: OrientationFilter::default(),
            estimator: EstimatorKind::default(),
            overlay: OverlayStyle::default(),
            parallel: false,
            deadline_ms: None,
            report_json: None,
        }
    }
}

impl BatchConfig {
    pub fn with_dirs(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }
}

pub fn load_config(path: &Path) -> Result<BatchConfig> {
    let data = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: BatchConfig = serde_json::from_str(&data).map_err(|e| Error::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    config
        .detector
        .validate()
        .map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg: BatchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.input_dir, PathBuf::from("Estimate_vanishing_points_data"));
        assert_eq!(cfg.output_dir, PathBuf::from("output_results"));
        assert_eq!(cfg.estimator, EstimatorKind::Mean);
        assert_eq!(cfg.filter, OrientationFilter::default());
        assert!(!cfg.parallel);
        assert!(cfg.deadline().is_none());
    }

    #[test]
    fn sections_override_selectively() {
        let cfg: BatchConfig = serde_json::from_str(
            r#"{
                "input_dir": "in",
                "output_dir": "out",
                "estimator": "median",
                "filter": { "min_angle_deg": 30 },
                "overlay": { "marker_radius": 4 },
                "deadline_ms": 250
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.input_dir, PathBuf::from("in"));
        assert_eq!(cfg.estimator, EstimatorKind::Median);
        assert_eq!(cfg.filter.min_angle_deg, 30.0);
        assert_eq!(cfg.filter.max_angle_deg, 160.0);
        assert_eq!(cfg.overlay.marker_radius, 4);
        assert_eq!(cfg.overlay.line_thickness, 2);
        assert_eq!(cfg.deadline(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn unknown_estimator_is_a_parse_error() {
        assert!(serde_json::from_str::<BatchConfig>(r#"{"estimator": "ransac"}"#).is_err());
    }
}
