//! lrukit - replay get/put scripts against an LRU cache

mod handler;
mod script;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lrukit::{checked_capacity, CacheConfig, LruCache};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::handler::CommandHandler;

/// Log filter used when `RUST_LOG` is unset or unparsable
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of entries)
    #[arg(short, long, default_value_t = 3, allow_negative_numbers = true)]
    capacity: i64,

    /// Reject capacities above this limit
    #[arg(long)]
    max_capacity: Option<usize>,

    /// Print the LRU-to-MRU key order after every get and put
    #[arg(short, long)]
    trace_order: bool,

    /// Script file to replay (reads stdin when omitted or `-`)
    script: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Logs go to stderr so replies on stdout stay machine-readable
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(log_filter())
        .init();

    let args = Args::parse();
    let cache = build_cache(&args)?;
    info!("Cache capacity: {}", cache.capacity());

    let mut handler = CommandHandler::new(cache, args.trace_order);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.script {
        Some(path) if path.as_os_str() != "-" => {
            info!("Replaying {}", path.display());
            let file = File::open(&path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            handler.run(BufReader::new(file), &mut out)
        }
        _ => {
            info!("Replaying stdin");
            handler.run(io::stdin().lock(), &mut out)
        }
    }
}

/// `RUST_LOG` when set, otherwise warnings and errors only
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Validate the capacity arguments and create the cache
fn build_cache(args: &Args) -> Result<LruCache<i64, i64>> {
    let mut config = CacheConfig::new(checked_capacity(args.capacity)?);
    if let Some(limit) = args.max_capacity {
        config = config.with_max_capacity(limit);
    }
    Ok(LruCache::with_config(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("lrukit").chain(argv.iter().copied())).unwrap()
    }

    fn enabled_under(filter: EnvFilter, level: Level) -> bool {
        let subscriber = tracing_subscriber::registry().with(filter);
        tracing::subscriber::with_default(subscriber, || match level {
            Level::DEBUG => tracing::enabled!(Level::DEBUG),
            Level::WARN => tracing::enabled!(Level::WARN),
            _ => unreachable!("only DEBUG and WARN are checked"),
        })
    }

    // Both cases live in one test because they share the process environment
    #[test]
    fn test_log_filter_honours_rust_log() {
        std::env::remove_var("RUST_LOG");
        assert!(!enabled_under(log_filter(), Level::DEBUG));
        assert!(enabled_under(log_filter(), Level::WARN));

        std::env::set_var("RUST_LOG", "debug");
        assert!(enabled_under(log_filter(), Level::DEBUG));
        std::env::remove_var("RUST_LOG");
    }

    #[test]
    fn test_build_cache_defaults() {
        let cache = build_cache(&args(&[])).unwrap();
        assert_eq!(cache.capacity(), 3);
        assert!(cache.is_empty());

        let cache = build_cache(&args(&["-c", "3000", "--max-capacity", "3000"])).unwrap();
        assert_eq!(cache.capacity(), 3000);
    }

    #[test]
    fn test_build_cache_zero_capacity() {
        let err = build_cache(&args(&["--capacity", "0"])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid capacity: 0 (must be at least 1)");
    }

    #[test]
    fn test_build_cache_negative_capacity() {
        let err = build_cache(&args(&["--capacity", "-3"])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid capacity: -3 (must be at least 1)");
    }

    #[test]
    fn test_build_cache_over_limit() {
        let err = build_cache(&args(&["--capacity", "3001", "--max-capacity", "3000"]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid capacity: 3001 (must be between 1 and 3000)"
        );
        assert!(err.downcast_ref::<lrukit::Error>().is_some());
    }
}
