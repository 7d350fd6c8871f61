// ABOUTME: Logging configuration and structured logging setup for the CLI and library callers
// ABOUTME: Builds a tracing-subscriber registry with env filtering and json, pretty or compact output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging configuration
//!
//! The formula engine only emits `tracing` events; installing a subscriber is the
//! caller's job. The CLI calls [`LoggingConfig::init`] once at startup. Output goes
//! to stderr so that formula output on stdout stays machine readable.

use anyhow::Result;
use serde_json::json;
use std::env;
use std::io;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name reported in startup logs
pub const SERVICE_NAME: &str = "ride-fuel";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` lines, one event per line
    Json,
    /// Full human readable output with targets
    Pretty,
    /// Single-line terse output (CLI default)
    Compact,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value, defaulting to compact
    #[must_use]
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("json") => Self::Json,
            Some("pretty") => Self::Pretty,
            _ => Self::Compact,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: LogFormat::Compact,
            include_location: false,
            service_name: SERVICE_NAME.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "warn".into());
        let format = LogFormat::from_env_value(env::var("LOG_FORMAT").ok().as_deref());

        Self {
            level,
            format,
            include_location: env::var("LOG_INCLUDE_LOCATION").is_ok(),
            ..Self::default()
        }
    }

    /// Raise the level to `debug` unless a more verbose level is already set
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        if verbose && !matches!(self.level.as_str(), "trace" | "debug") {
            self.level = "debug".into();
        }
        self
    }

    /// Build the env filter for this configuration
    ///
    /// `RUST_LOG` wins when set; otherwise our crates log at `level`.
    fn env_filter(&self) -> EnvFilter {
        env::var("RUST_LOG").map_or_else(
            |_| {
                EnvFilter::new("warn")
                    .add_directive(
                        format!("ride_fuel={}", self.level)
                            .parse()
                            .unwrap_or_else(|_| tracing::Level::WARN.into()),
                    )
                    .add_directive(
                        format!("ride_fuel_core={}", self.level)
                            .parse()
                            .unwrap_or_else(|_| tracing::Level::WARN.into()),
                    )
            },
            |env_directive| EnvFilter::new(env_directive),
        )
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());

        match self.format {
            LogFormat::Json => {
                let json_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_target(true)
                    .with_writer(io::stderr)
                    .json();
                registry.with(json_layer).try_init()?;
            }
            LogFormat::Pretty => {
                let pretty_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_target(true)
                    .with_writer(io::stderr);
                registry.with(pretty_layer).try_init()?;
            }
            LogFormat::Compact => {
                let compact_layer = fmt::layer()
                    .compact()
                    .with_file(false)
                    .with_line_number(false)
                    .with_target(false)
                    .with_writer(io::stderr);
                registry.with(compact_layer).try_init()?;
            }
        }

        self.log_startup_info();
        Ok(())
    }

    fn log_startup_info(&self) {
        let summary = json!({
            "service": {
                "name": self.service_name,
                "version": self.service_version,
            },
            "logging": {
                "level": self.level,
                "format": format!("{:?}", self.format),
                "location": self.include_location,
            }
        });
        debug!("Logging initialized: {}", summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_env_value(Some("json")), LogFormat::Json);
        assert_eq!(LogFormat::from_env_value(Some("pretty")), LogFormat::Pretty);
        assert_eq!(LogFormat::from_env_value(Some("fancy")), LogFormat::Compact);
        assert_eq!(LogFormat::from_env_value(None), LogFormat::Compact);
    }

    #[test]
    fn test_verbose_raises_level_only_when_quieter() {
        let config = LoggingConfig::default().with_verbose(true);
        assert_eq!(config.level, "debug");

        let trace = LoggingConfig {
            level: "trace".into(),
            ..LoggingConfig::default()
        }
        .with_verbose(true);
        assert_eq!(trace.level, "trace");

        assert_eq!(LoggingConfig::default().with_verbose(false).level, "warn");
    }
}
