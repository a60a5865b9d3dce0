//! Configuration module.
//!
//! The cache itself only needs a width and a cap; this layer resolves them
//! (plus the log file path) for the `flowcache` binary.

pub mod loader;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, ConfigError, ConfigFile,
    ResolvedConfig,
};
