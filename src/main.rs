use std::path::PathBuf;

use sketchkit::{init_logging_with, load_config, open_drawing, Config, LogFormat};
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    let mut format = LogFormat::Pretty;
    let mut drawing: Option<PathBuf> = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json-logs" => format = LogFormat::Json,
            _ => drawing = Some(PathBuf::from(arg)),
        }
    }

    // Initialize logging
    init_logging_with(format)?;
    info!("SketchKit {} (built {})", sketchkit::VERSION, sketchkit::BUILD_DATE);

    let config = match Config::default_path() {
        Ok(path) => load_config(&path).unwrap_or_else(|e| {
            warn!("{:#}; using default settings", e);
            Config::default()
        }),
        Err(e) => {
            warn!("{}; using default settings", e);
            Config::default()
        }
    };

    let Some(path) = drawing else {
        info!("No drawing given");
        return Ok(());
    };

    let (state, outcome) = open_drawing(&path, &config)?;
    info!("{}", outcome.summary);
    for issue in &outcome.skipped {
        warn!(
            "Skipped record {} ({}): {}",
            issue.index, issue.shape_type, issue.error
        );
    }
    info!(
        "{}: {} shape(s) loaded, {} skipped",
        state.display_name(),
        outcome.loaded,
        outcome.skipped.len()
    );
    Ok(())
}
