use std::fs::{self, create_dir_all, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Local;
use tracing_subscriber::EnvFilter;

use crate::constants::{LOG_FILTER_DEFAULT, LOG_RETENTION};
use crate::error::TrackerResult;

lazy_static::lazy_static! {
    static ref LOG_FILE: Mutex<Option<PathBuf>> = Mutex::new(None);
}

pub fn log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("youtrack-graph")
        .join("logs")
}

/// Send `tracing` output to a timestamped file under the user cache directory.
///
/// `RUST_LOG` overrides the default filter. Returns the log file path.
pub fn init_logging() -> TrackerResult<PathBuf> {
    init_logging_in(&log_dir())
}

pub fn init_logging_in(dir: &Path) -> TrackerResult<PathBuf> {
    create_dir_all(dir)?;
    let pruned = prune_logs(dir, LOG_RETENTION.saturating_sub(1))?;

    let log_file = dir.join(format!("ytgraph-{}.log", Local::now().format("%Y%m%d-%H%M%S")));
    let file = OpenOptions::new().create(true).append(true).open(&log_file)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(LOG_FILTER_DEFAULT));

    // try_init so a second call keeps the first subscriber
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .is_ok();

    if installed {
        if let Ok(mut slot) = LOG_FILE.lock() {
            *slot = Some(log_file.clone());
        }
        tracing::info!(path = %log_file.display(), pruned, "logging initialized");
    }

    Ok(log_file)
}

fn is_log_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with("ytgraph-") && name.ends_with(".log"))
        .unwrap_or(false)
}

/// Delete all but the `keep` newest log files in `dir`. Returns how many were removed.
///
/// File names embed a sortable timestamp, so name order is age order. Files
/// that cannot be removed are left in place.
pub fn prune_logs(dir: &Path, keep: usize) -> TrackerResult<usize> {
    let mut logs: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_log_file(path))
        .collect();
    logs.sort();

    let excess = logs.len().saturating_sub(keep);
    let removed = logs
        .iter()
        .take(excess)
        .filter(|path| fs::remove_file(path).is_ok())
        .count();
    Ok(removed)
}

/// Route panics to the log before the default hook prints them.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        log_panic_info(info);
        default_hook(info);
    }));
}

pub fn log_panic_info(info: &std::panic::PanicHookInfo<'_>) {
    let location = info
        .location()
        .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
        .unwrap_or_else(|| "unknown location".to_string());

    let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic payload".to_string()
    };

    tracing::error!(location = %location, "PANIC: {}", payload);
    tracing::debug!("Backtrace:\n{}", std::backtrace::Backtrace::capture());
}

pub fn get_log_file_path() -> Option<PathBuf> {
    LOG_FILE.lock().ok().and_then(|slot| slot.clone())
}
