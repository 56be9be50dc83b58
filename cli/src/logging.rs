use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "savings.log";

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set, `info` otherwise.
/// * Writes to `savings.log` in the data directory: the TUI owns the terminal
///   and CLI output stays clean.
pub fn init_tracing(data_dir: &Path) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::from("info"));

    let path = data_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("initialising tracing: {}", e))
}
