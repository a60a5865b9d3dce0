//! Tracing subscriber initialization.
//!
//! Logs are written to a file so diagnostic output never mixes with query
//! results on stdout. Monitor them with `tail -f`.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why the replay log could not be set up.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log directory could not be created.
    #[error("Cannot create log directory {path:?}: {source}")]
    DirectoryCreation {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The log path does not name a file inside a directory.
    #[error("Log path must name a file: {0:?}")]
    InvalidPath(PathBuf),

    /// Another subscriber is already installed for this process.
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Route `tracing` output of the cache and the replay loop to `log_path`.
///
/// The filter comes from `RUST_LOG` and falls back to `info`.
/// `RUST_LOG=flowcache=debug` shows invalidation and rebuild events; `trace`
/// adds every packed line.
///
/// # Errors
///
/// Fails if the path names no file, its directory cannot be created, or a
/// subscriber is already installed.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    let (directory, file_name) = split_log_path(log_path)?;
    std::fs::create_dir_all(directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.to_path_buf(),
        source,
    })?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(tracing_appender::rolling::never(directory, file_name))
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}

/// Split a log path into its directory and file name.
///
/// A bare file name logs into the working directory.
fn split_log_path(log_path: &Path) -> Result<(&Path, &OsStr), LoggingError> {
    let file_name = log_path
        .file_name()
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;
    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok((directory, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    #[test]
    #[serial(tracing_init)]
    fn init_creates_log_directory_if_missing() {
        let test_dir = std::env::temp_dir().join("flowcache_test_logs_create");
        let log_file = test_dir.join("test.log");
        let _ = fs::remove_dir_all(&test_dir);

        // May fail if a subscriber is already set; the directory is created first.
        let _ = init(&log_file);

        assert!(
            test_dir.exists(),
            "Log directory should be created: {:?}",
            test_dir
        );
        let _ = fs::remove_dir_all(&test_dir);
    }

    #[test]
    #[serial(tracing_init)]
    fn second_init_reports_subscriber_already_set() {
        let test_dir = std::env::temp_dir().join("flowcache_test_logs_twice");
        let log_file = test_dir.join("twice.log");

        let _ = init(&log_file);
        let second = init(&log_file);

        assert!(matches!(second, Err(LoggingError::SubscriberAlreadySet)));
        let _ = fs::remove_dir_all(&test_dir);
    }

    #[test]
    fn path_without_file_name_is_rejected() {
        let result = init(Path::new("/"));
        assert!(
            matches!(result, Err(LoggingError::InvalidPath(_))),
            "got: {:?}",
            result
        );
    }

    #[test]
    fn bare_file_name_logs_into_working_directory() {
        let (directory, file_name) = split_log_path(Path::new("replay.log")).expect("valid");
        assert_eq!(directory, Path::new("."));
        assert_eq!(file_name, OsStr::new("replay.log"));
    }

    #[test]
    fn nested_path_splits_at_last_component() {
        let (directory, file_name) =
            split_log_path(Path::new("/var/log/flowcache/replay.log")).expect("valid");
        assert_eq!(directory, Path::new("/var/log/flowcache"));
        assert_eq!(file_name, OsStr::new("replay.log"));
    }
}
