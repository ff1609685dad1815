//! Logging configuration and initialization for Distributed.
//!
//! Rendered pages go to stdout, so log output is written to stderr and the
//! configured log file.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::Result;

/// HTTP stack crates that are capped at `warn` unless configured explicitly.
const QUIET_TARGETS: &[&str] = &["hyper", "hyper_util", "reqwest", "rustls", "h2"];

/// Turn the configured level into filter directives.
///
/// A bare level (`debug`, `warning`, ...) applies to everything except the
/// HTTP stack; a string containing `=` is used as written.
fn filter_directives(level: &str) -> String {
    let level = level.trim().to_lowercase();
    if level.contains('=') {
        return level;
    }
    let base = match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" | "off" => level.as_str(),
        "warning" => "warn",
        _ => "info",
    };
    let mut directives = vec![base.to_string()];
    directives.extend(QUIET_TARGETS.iter().map(|t| format!("{t}=warn")));
    directives.join(",")
}

/// `RUST_LOG` when set, otherwise the configured level.
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directives(level)))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Initialize logging to stderr and the configured file.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let log_file = Arc::new(open_log_file(Path::new(&config.file))?);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr.and(log_file))
                .with_ansi(false)
                .with_target(true),
        )
        .with(build_filter(&config.level))
        .init();

    Ok(())
}

/// Initialize stderr-only logging, used when the log file can't be opened.
pub fn init_console_only(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .with(build_filter(level))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_filter_directives_bare_level() {
        assert_eq!(
            filter_directives("DEBUG"),
            "debug,hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn,h2=warn"
        );
        assert!(filter_directives("warning").starts_with("warn,"));
    }

    #[test]
    fn test_filter_directives_unknown_level() {
        assert!(filter_directives("verbose").starts_with("info,"));
        assert!(filter_directives("").starts_with("info,"));
    }

    #[test]
    fn test_filter_directives_explicit() {
        assert_eq!(
            filter_directives("distributed=trace,reqwest=debug"),
            "distributed=trace,reqwest=debug"
        );
    }

    #[test]
    fn test_open_log_file_creates_parent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs").join("distributed.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}
