use std::path::Path;
use vanishing_point::{load_config, run_batch, BatchConfig, Pipeline};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match args.as_slice() {
        [] => BatchConfig::default(),
        [config_path] => load_config(Path::new(config_path)).map_err(|e| e.to_string())?,
        [input_dir, output_dir] => BatchConfig::with_dirs(input_dir, output_dir),
        _ => return Err(usage()),
    };

    let pipeline = Pipeline::from_config(&config).map_err(|e| e.to_string())?;
    let report = run_batch(&config, &pipeline).map_err(|e| e.to_string())?;
    println!("{}", report.summary());
    if report.has_failures() {
        return Err(format!("{} image(s) failed", report.failed.len()));
    }
    Ok(())
}

fn usage() -> String {
    "Usage: vp_batch [config.json] | vp_batch <input_dir> <output_dir>".to_string()
}
