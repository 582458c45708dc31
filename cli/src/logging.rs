use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::{Mutex, Once};

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};
use volunteer_hours_core::TrackerConfig;

const LOG_FILE_NAME: &str = "volunteer-hours.log";

static TRACING_INIT: Once = Once::new();

/// Installs the global subscriber once. `RUST_LOG` wins over the configured
/// filter. The TUI owns the terminal, so in that mode logs go to a file in
/// the data directory instead of stderr. When that file cannot be opened the
/// reason is printed once, before the TUI starts, and logging stays off.
pub fn init_tracing(config: &TrackerConfig, to_file: bool) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

        if !to_file {
            fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
            return;
        }

        match open_log_file(&config.data_dir) {
            Ok(file) => fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init(),
            Err(e) => eprintln!("warning: logging disabled: {:#}", e),
        }
    });
}

fn open_log_file(data_dir: &Path) -> Result<File> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("Could not create log directory {}", data_dir.display()))?;
    let path = data_dir.join(LOG_FILE_NAME);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Could not open log file {}", path.display()))
}
