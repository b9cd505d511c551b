// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tracing setup for the CLI
//!
//! Library code only emits events; the binary installs one `fmt` layer on
//! stderr so command output on stdout stays clean.

use anyhow::Result;
use std::env;
use std::io;
use std::str::FromStr;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::errors::TrackerError;

const DEFAULT_FILTER: &str = "warn";

/// Event layout on stderr
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = TrackerError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(TrackerError::validation(format!("unknown log format: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, e.g. `fitness_tracker=debug`
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: DEFAULT_FILTER.to_string(), format: LogFormat::Compact }
    }
}

impl LoggingConfig {
    /// Read `RUST_LOG` and `LOG_FORMAT`; an unknown format falls back to compact
    pub fn from_env() -> Self {
        let filter = env::var("RUST_LOG")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());
        let format = env::var("LOG_FORMAT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();

        Self { filter, format }
    }

    /// Install the global subscriber
    pub fn init(&self) -> Result<()> {
        let filter = EnvFilter::try_new(&self.filter).or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))?;
        let registry = tracing_subscriber::registry().with(filter);
        let layer = fmt::layer().with_writer(io::stderr).with_target(false);

        match self.format {
            LogFormat::Compact => registry.with(layer.compact()).try_init()?,
            LogFormat::Pretty => registry.with(layer.pretty()).try_init()?,
            LogFormat::Json => registry.with(layer.json()).try_init()?,
        }

        debug!(filter = %self.filter, format = ?self.format, "Logging initialized");
        Ok(())
    }
}

/// Initialize logging from `RUST_LOG` and `LOG_FORMAT`
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// Application-specific logging utilities
pub struct AppLogger;

impl AppLogger {
    /// Log a completed request against the remote store
    pub fn log_api_request(method: &str, path: &str, status: u16, duration_ms: u64) {
        info!(
            http.method = %method,
            http.path = %path,
            http.status = %status,
            http.duration_ms = %duration_ms,
            "HTTP request"
        );
    }

    /// Log a view mutation (create/delete) and whether it went through
    pub fn log_mutation(view: &str, action: &str, success: bool) {
        info!(
            view.name = %view,
            view.action = %action,
            view.success = %success,
            "View mutation"
        );
    }

    /// Log a failure converted into a user-facing notice
    pub fn log_view_notice(view: &str, message: &str, error: &str) {
        warn!(
            view.name = %view,
            notice.message = %message,
            error = %error,
            "View fell back to last known state"
        );
    }
}
