//! Error taxonomy for the per-image pipeline and the batch driver.
//!
//! Parallel line pairs and images without an estimate are not errors; they
//! are carried as `Intersection::Parallel` and `None` respectively.
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The decoder could not produce an image from `path`.
    #[error("failed to load {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// The encoder could not persist the overlay to `path`.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
    #[error("invalid detector parameters: {0}")]
    InvalidParams(String),
    /// Processing of a single image ran past the configured deadline.
    #[error("deadline of {limit_ms} ms exceeded for {} ({elapsed_ms:.1} ms)", .path.display())]
    DeadlineExceeded {
        path: PathBuf,
        limit_ms: u64,
        elapsed_ms: f64,
    },
}

impl Error {
    /// Failures that only skip the current image instead of being reported as
    /// batch failures.
    pub fn is_load_failure(&self) -> bool {
        matches!(self, Error::Load { .. })
    }
}
