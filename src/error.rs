//! Error types for the flowcache binary.
//!
//! The cache never fails: not-found and inactive states are ordinary `None`
//! results. Errors only arise in the shell around it (config, logging,
//! script I/O) and compose into [`AppError`] via `From`.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::script::ScriptError;
use thiserror::Error;

/// Top-level error for the `flowcache` binary.
///
/// # Examples
///
/// ```
/// use flowcache::error::AppError;
/// use flowcache::script::ScriptError;
///
/// let err: AppError = ScriptError::Parse { line: 3, reason: "bad op".into() }.into();
/// assert!(err.to_string().contains("line 3"));
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or resolved.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// The operation script could not be read or replayed.
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    /// Opening the script file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
