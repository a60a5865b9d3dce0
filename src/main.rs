//! flowcache - Entry Point
//!
//! Replays a JSON Lines operation script against a flow cache and prints
//! query answers.

use clap::Parser;
use flowcache::config::{self, ResolvedConfig};
use flowcache::error::AppError;
use flowcache::flow::FlowCache;
use flowcache::script;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use tracing::info;

/// flowcache - replay flow layout cache operations
#[derive(Parser, Debug)]
#[command(name = "flowcache")]
#[command(version)]
#[command(about = "Replay JSON Lines operation scripts against a flow layout line cache")]
pub struct Args {
    /// Path to JSON Lines script (reads from stdin if not provided)
    pub script: Option<PathBuf>,

    /// Content area width (0 leaves the cache inactive)
    #[arg(short, long)]
    pub width: Option<u32>,

    /// Maximum items per line (0 = no cap)
    #[arg(short, long)]
    pub items_per_line: Option<usize>,

    /// Print the cache dump after the script finishes
    #[arg(long)]
    pub dump: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    run(args)?;
    Ok(())
}

fn run(args: Args) -> Result<(), AppError> {
    let config = resolve_config(&args)?;

    flowcache::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let operations = match &args.script {
        Some(path) => script::parse_script(BufReader::new(File::open(path)?))?,
        None => script::parse_script(io::stdin().lock())?,
    };

    let mut cache = FlowCache::with_params(config.flow_params());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    script::replay(&operations, &mut cache, &mut out)?;

    if args.dump {
        write!(out, "{}", cache.dump_cache())?;
    }

    Ok(())
}

/// Defaults → Config File → Env Vars → CLI Args
fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    let config_file = config::load_config_with_precedence(args.config.clone())?;
    let merged = config::merge_config(config_file);
    let with_env = config::apply_env_overrides(merged)?;
    Ok(config::apply_cli_overrides(
        with_env,
        args.width,
        args.items_per_line,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["flowcache", "--help"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["flowcache", "--version"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["flowcache"]);
        assert_eq!(args.script, None);
        assert_eq!(args.width, None);
        assert_eq!(args.items_per_line, None);
        assert!(!args.dump);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_short_flags() {
        let args = Args::parse_from(["flowcache", "-w", "120", "-i", "3", "ops.jsonl"]);
        assert_eq!(args.width, Some(120));
        assert_eq!(args.items_per_line, Some(3));
        assert_eq!(args.script, Some(PathBuf::from("ops.jsonl")));
    }

    #[test]
    fn test_negative_width_rejected() {
        let result = Args::try_parse_from(["flowcache", "--width", "-5"]);
        assert!(result.is_err());
    }
}
