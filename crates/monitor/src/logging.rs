use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Log file used when `LOG_FILE` is not set.
pub const DEFAULT_LOG_FILE: &str = "website_monitor.log";

const DEFAULT_LOG_FILTER: &str =
    "pagewatch=info,pagewatch_monitor=info,pagewatch_fetcher=info,pagewatch_notifier=info,pagewatch_common=info";

/// Log file path from `LOG_FILE`, falling back to [`DEFAULT_LOG_FILE`].
pub fn log_path_from_env() -> PathBuf {
    std::env::var("LOG_FILE")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
}

/// Non-blocking appender writing every record to `path`, appending across runs.
///
/// The returned guard flushes buffered records when dropped.
pub fn file_writer(path: &Path) -> anyhow::Result<(NonBlocking, WorkerGuard)> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("log path {} has no file name", path.display()))?;

    std::fs::create_dir_all(&dir)?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy().into_owned())
        .build(&dir)?;

    Ok(tracing_appender::non_blocking(appender))
}

/// Install the global subscriber: JSON records on stdout and in the log file,
/// both filtered by `RUST_LOG` (or the crate defaults).
///
/// Keep the returned guard alive for the life of the process.
pub fn init(path: &Path) -> anyhow::Result<WorkerGuard> {
    let (writer, guard) = file_writer(path)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json())
        .with(fmt::layer().json().with_ansi(false).with_writer(writer))
        .try_init()?;

    Ok(guard)
}
