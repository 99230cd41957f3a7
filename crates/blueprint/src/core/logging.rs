//! Logging infrastructure for declaration processing
//!
//! This module provides structured logging using the `tracing` crate.
//! It supports configurable log levels and formats.
//!
//! # Usage
//!
//! ```rust
//! use blueprint::core::logging::init_logging;
//!
//! // Initialize with default settings
//! let _ = init_logging(None, None);
//! ```
//!
//! # Log Levels
//!
//! - `trace`: per-node detail (translated declarations, inferred edges)
//! - `debug`: stage counts
//! - `info`: pipeline start and end (default)
//! - `warn`: recoverable oddities in the input
//! - `error`: error messages
//!
//! # Log Formats
//!
//! - `compact`: Single-line format, good for production
//! - `pretty`: Multi-line format with colors, good for development
//! - `json`: JSON format, good for log aggregation systems
//!
//! # Environment Variables
//!
//! - `BLUEPRINT_LOG_LEVEL`: Set log level (trace|debug|info|warn|error|off)
//! - `BLUEPRINT_LOG_FORMAT`: Set log format (compact|pretty|json)
//! - `RUST_LOG`: Standard tracing-subscriber filter, takes precedence for directives
//!
//! # Filtering Logs
//!
//! ```bash
//! # Show only namespace resolution at trace level
//! RUST_LOG="blueprint::pipeline::namespace=trace" blueprint convert -i decls.json
//! ```

use std::str::FromStr;

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact single-line format
    Compact,
    /// Pretty multi-line format with colors
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl LogFormat {
    /// Get all valid format names
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Resolved logging settings
///
/// Explicit arguments win over `BLUEPRINT_LOG_LEVEL` / `BLUEPRINT_LOG_FORMAT`,
/// which win over `RUST_LOG` for the level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    pub format: String,
}

impl LogSettings {
    /// Resolve settings against the process environment
    pub fn resolve(level: Option<&str>, format: Option<&str>) -> Self {
        Self::resolve_with(level, format, |key| std::env::var(key).ok())
    }

    /// Resolve settings against an arbitrary variable lookup
    pub fn resolve_with<F>(level: Option<&str>, format: Option<&str>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let level = level
            .map(str::to_string)
            .or_else(|| lookup("BLUEPRINT_LOG_LEVEL"))
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());
        let format = format
            .map(str::to_string)
            .or_else(|| lookup("BLUEPRINT_LOG_FORMAT"))
            .unwrap_or_else(|| "compact".to_string());
        Self { level, format }
    }

    /// `off` silences everything, including `RUST_LOG` directives
    pub fn is_off(&self) -> bool {
        self.level.eq_ignore_ascii_case("off")
    }

    pub fn log_format(&self) -> Result<LogFormat, String> {
        LogFormat::from_str(&self.format).map_err(|e| format!("Invalid log format: {}", e))
    }
}

/// Initialize the tracing subscriber with the given log level and format
///
/// # Arguments
///
/// * `level` - Optional log level string (trace|debug|info|warn|error|off).
///   If None, uses `BLUEPRINT_LOG_LEVEL` or `RUST_LOG`, or defaults to `info`.
/// * `format` - Optional log format (compact|pretty|json).
///   If None, uses `BLUEPRINT_LOG_FORMAT`, or defaults to `compact`.
///
/// Events are written to stderr so rendered diagrams on stdout stay clean.
///
/// # Returns
///
/// Returns an error if the format is unknown or a global subscriber is
/// already installed.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = LogSettings::resolve(level, format);

    let filter = if settings.is_off() {
        EnvFilter::new("off")
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&settings.level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let format = settings.log_format()?;

    match format {
        LogFormat::Compact => {
            Registry::default()
                .with(filter)
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(false)
                        .with_level(true)
                        .with_file(false)
                        .with_line_number(false)
                        .with_span_events(FmtSpan::NONE),
                )
                .try_init()?;
        }
        LogFormat::Pretty => {
            Registry::default()
                .with(filter)
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_span_events(FmtSpan::ACTIVE)
                        .pretty(),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            Registry::default()
                .with(filter)
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_span_events(FmtSpan::ACTIVE)
                        .json(),
                )
                .try_init()?;
        }
    }

    Ok(())
}

/// Initialize logging with default settings (info level, compact format)
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(None, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
        assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
        assert!(LogFormat::from_str("invalid").is_err());
    }

    #[test]
    fn test_defaults_without_environment() {
        let settings = LogSettings::resolve_with(None, None, lookup(&[]));
        assert_eq!(settings.level, "info");
        assert_eq!(settings.log_format(), Ok(LogFormat::Compact));
        assert!(!settings.is_off());
    }

    #[test]
    fn test_blueprint_level_beats_rust_log() {
        let vars = lookup(&[("RUST_LOG", "trace"), ("BLUEPRINT_LOG_LEVEL", "warn")]);
        assert_eq!(LogSettings::resolve_with(None, None, vars).level, "warn");

        let vars = lookup(&[("RUST_LOG", "blueprint::pipeline=trace")]);
        assert_eq!(
            LogSettings::resolve_with(None, None, vars).level,
            "blueprint::pipeline=trace"
        );
    }

    #[test]
    fn test_arguments_beat_environment() {
        let vars = lookup(&[("BLUEPRINT_LOG_LEVEL", "trace"), ("BLUEPRINT_LOG_FORMAT", "json")]);
        let settings = LogSettings::resolve_with(Some("OFF"), Some("pretty"), vars);
        assert!(settings.is_off());
        assert_eq!(settings.log_format(), Ok(LogFormat::Pretty));
    }

    #[test]
    fn test_format_falls_back_to_environment() {
        let vars = lookup(&[("BLUEPRINT_LOG_FORMAT", "json")]);
        let settings = LogSettings::resolve_with(Some("debug"), None, vars);
        assert_eq!(settings.log_format(), Ok(LogFormat::Json));

        let vars = lookup(&[("BLUEPRINT_LOG_FORMAT", "xml")]);
        let err = LogSettings::resolve_with(None, None, vars).log_format().unwrap_err();
        assert!(err.contains("xml"));
    }
}
