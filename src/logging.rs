use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Default log file: `<cache dir>/promptgate/promptgate.log`.
pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("promptgate")
        .join("promptgate.log")
}

/// Picks the filter directive: `RUST_LOG`, then the CLI flag, then config.
pub fn filter_directive(env: Option<String>, cli_level: Option<&str>, config_level: &str) -> String {
    env.filter(|value| !value.trim().is_empty())
        .or_else(|| cli_level.map(str::to_string))
        .unwrap_or_else(|| config_level.to_string())
}

/// Initialize tracing to a log file.
///
/// The terminal belongs to the entry screen, so nothing is written to stdout
/// or stderr. Failure to open the file is reported once and logging stays off.
/// Returns the log file path when logging is active.
pub fn init_logging(config: &LoggingConfig, cli_level: Option<&str>) -> Option<PathBuf> {
    let path = config.file.clone().unwrap_or_else(default_log_path);
    let directive = filter_directive(std::env::var("RUST_LOG").ok(), cli_level, &config.level);

    let filter = match EnvFilter::try_new(&directive) {
        Ok(filter) => filter,
        Err(err) => {
            eprintln!("Warning: invalid log filter '{}': {}", directive, err);
            EnvFilter::new("info")
        }
    };

    let file = match open_log_file(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Warning: failed to open log file {}: {}", path.display(), err);
            return None;
        }
    };

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    if tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        return None;
    }

    Some(path)
}

fn open_log_file(path: &Path) -> std::io::Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
}
