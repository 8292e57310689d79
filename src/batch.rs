//! Directory batch driver.
//!
//! Each regular file of the input directory is processed independently into
//! the output directory under the same file name. Load failures skip the file;
//! processing and write failures are recorded and reported but never stop the
//! remaining files.
use crate::config::BatchConfig;
use crate::diagnostics::{BatchReport, FailedImage, ImageReport, SkippedImage};
use crate::error::{Error, Result};
use crate::image::io::{ensure_dir, write_json_file};
use crate::pipeline::Pipeline;
use log::{error, info, warn};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Regular files directly inside `dir`, sorted by path.
pub fn list_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    let io_err = |source| Error::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn output_path(output_dir: &Path, input: &Path) -> PathBuf {
    match input.file_name() {
        Some(name) => output_dir.join(name),
        None => output_dir.join(input),
    }
}

fn check_distinct_dirs(config: &BatchConfig) -> Result<()> {
    let same = match (
        fs::canonicalize(&config.input_dir),
        fs::canonicalize(&config.output_dir),
    ) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    };
    if same {
        return Err(Error::Config {
            path: config.output_dir.clone(),
            message: "output_dir must differ from input_dir".to_string(),
        });
    }
    Ok(())
}

/// Process every file of `config.input_dir` with `pipeline`.
pub fn run_batch(config: &BatchConfig, pipeline: &Pipeline) -> Result<BatchReport> {
    let t0 = Instant::now();
    ensure_dir(&config.output_dir)?;
    check_distinct_dirs(config)?;
    let inputs = list_inputs(&config.input_dir)?;
    info!(
        "batch: {} files from {} -> {}",
        inputs.len(),
        config.input_dir.display(),
        config.output_dir.display()
    );

    let run_one = |input: &PathBuf| -> (PathBuf, Result<ImageReport>) {
        let output = output_path(&config.output_dir, input);
        (input.clone(), pipeline.process_file(input, &output))
    };
    let outcomes: Vec<(PathBuf, Result<ImageReport>)> = if config.parallel {
        inputs.par_iter().map(run_one).collect()
    } else {
        inputs.iter().map(run_one).collect()
    };

    let mut report = BatchReport {
        input_dir: config.input_dir.clone(),
        output_dir: config.output_dir.clone(),
        ..Default::default()
    };
    for (input, outcome) in outcomes {
        match outcome {
            Ok(r) => report.processed.push(r),
            Err(e) if e.is_load_failure() => {
                warn!("Failed to load: {} ({e})", input.display());
                report.skipped.push(SkippedImage {
                    input,
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                error!("{e}");
                report.failed.push(FailedImage {
                    input,
                    error: e.to_string(),
                });
            }
        }
    }
    report.elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;
    info!("batch: {}", report.summary());

    if let Some(path) = &config.report_json {
        write_json_file(path, &report)?;
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_mirrors_file_name() {
        let out = output_path(Path::new("out"), Path::new("data/sub/street.jpg"));
        assert_eq!(out, PathBuf::from("out/street.jpg"));
    }

    #[test]
    fn missing_input_dir_is_io_error() {
        let err = list_inputs(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
