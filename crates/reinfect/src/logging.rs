use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter built from the command-line level only
fn level_filter(level: &str) -> EnvFilter {
    let default_filter = format!("reinfect={level},reinfect_core={level}");
    EnvFilter::new(&default_filter)
}

/// Initialize logging.
///
/// Without a log file, events go to stderr so stdout stays free for the
/// report. With one, events are appended to `log_file` without ANSI colors.
/// The level comes from `level` alone; no environment variable is consulted.
pub fn init_logging(level: &str, log_file: Option<&Path>) -> color_eyre::Result<()> {
    let registry = tracing_subscriber::registry().with(level_filter(level));

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            registry
                .with(
                    fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_target(true)
                        .with_thread_ids(false),
                )
                .try_init()?;
            tracing::info!(log_path = %path.display(), "logging initialized");
        }
        None => {
            registry
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_thread_ids(false),
                )
                .try_init()?;
        }
    }
    Ok(())
}
