//! Logging utilities for menukit
//!
//! Provides the `Pretty` wrapper for structured log output and the tracing
//! subscriber setup used by the binaries.

use serde::Serialize;
use std::fmt::Debug;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

/// Wrapper for pretty-printing types in logs as YAML
///
/// ```
/// use menukit_common::Pretty;
/// use tracing::debug;
///
/// let identities = vec!["task_add", "task_list"];
/// debug!("projected tools: {}", Pretty(&identities));
/// ```
///
/// Outputs YAML with a leading newline. Debug is used as a fallback if YAML
/// serialization fails.
pub struct Pretty<T>(pub T);

impl<T: Serialize + Debug> std::fmt::Display for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_yaml_ng::to_string(&self.0) {
            Ok(yaml) => write!(f, "\n{}", yaml),
            Err(_) => write!(f, "\n{:#?}", self.0),
        }
    }
}

impl<T: Serialize + Debug> std::fmt::Debug for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error, the default for CLI and HTTP modes
    Stderr,
    /// A log file, used in stdio MCP mode where stdout carries the protocol
    File(PathBuf),
}

/// Errors raised while installing the global subscriber
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// A global subscriber was already set
    #[error("tracing subscriber already initialized: {0}")]
    AlreadyInitialized(String),
}

fn create_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("rmcp=warn,{level}")))
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over `level`. When the file target cannot be
/// created the subscriber falls back to stderr and logs a warning there.
pub fn init_tracing(level: &str, target: LogTarget) -> Result<(), LoggingError> {
    let path = match target {
        LogTarget::Stderr => return init_stderr(level),
        LogTarget::File(path) => path,
    };

    let mut dir_error = None;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            dir_error = fs::create_dir_all(parent).err();
        }
    }

    match fs::File::create(&path) {
        Ok(file) => registry()
            .with(create_filter(level))
            .with(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false),
            )
            .try_init()
            .map_err(|e| LoggingError::AlreadyInitialized(e.to_string())),
        Err(e) => {
            init_stderr(level)?;
            if let Some(dir_error) = dir_error {
                tracing::warn!("Could not create log directory: {}", dir_error);
            }
            tracing::warn!(
                "Could not create log file {}: {}. Logging to stderr instead.",
                path.display(),
                e
            );
            Ok(())
        }
    }
}

fn init_stderr(level: &str) -> Result<(), LoggingError> {
    registry()
        .with(create_filter(level))
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Serialize)]
    struct Sample {
        name: String,
        count: usize,
    }

    #[test]
    fn test_pretty_renders_yaml() {
        let sample = Sample {
            name: "add".to_string(),
            count: 2,
        };
        let rendered = format!("{}", Pretty(&sample));
        assert!(rendered.starts_with('\n'));
        assert!(rendered.contains("name: add"));
        assert!(rendered.contains("count: 2"));
    }

    #[test]
    fn test_pretty_debug_matches_display() {
        let value = serde_json::json!({"tool": "task_add"});
        assert_eq!(format!("{:?}", Pretty(&value)), format!("{}", Pretty(&value)));
    }

    #[test]
    fn test_second_init_reports_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("logs").join("test.log");
        let first = init_tracing("debug", LogTarget::File(path.clone()));
        let second = init_tracing("debug", LogTarget::Stderr);
        // another test binary thread may have won the race for the global slot
        assert!(first.is_err() || path.exists());
        assert!(second.is_err());
    }
}
