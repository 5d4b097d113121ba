//! flagkit Logging
//!
//! Installs a `tracing` subscriber configured from the environment.
//! The flagkit crates emit `tracing` events; nothing is printed until a
//! subscriber is installed, either by the host application or by [`init`].
//!
//! # Usage
//!
//! ```rust
//! use flagkit_log::{LogConfig, Format, Level};
//!
//! // From FLAGKIT_* environment variables
//! flagkit_log::init();
//!
//! // Or explicitly
//! let installed = LogConfig::new()
//!     .level(Level::Debug)
//!     .format(Format::Compact)
//!     .init();
//! assert!(!installed); // a subscriber is already installed
//! ```
//!
//! # Environment Variables
//!
//! - `FLAGKIT_DEBUG=1` - Enable debug logging
//! - `FLAGKIT_LOG_LEVEL=trace|debug|info|warn|error|off` - Set log level
//! - `FLAGKIT_LOG_FORMAT=json|pretty|compact` - Set output format
//! - `RUST_LOG` - Full filter directives, takes precedence over the level

use once_cell::sync::OnceCell;
use std::env;
use tracing_subscriber::EnvFilter;

pub use tracing::{debug, error, info, trace, warn};

// ============================================================================
// Log Levels
// ============================================================================

/// Minimum level of events to record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl Level {
    /// Get level from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Level::Trace),
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" | "warning" => Some(Level::Warn),
            "error" => Some(Level::Error),
            "off" | "none" => Some(Level::Off),
            _ => None,
        }
    }

    /// Filter directive understood by `EnvFilter`.
    pub fn as_directive(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Off => "off",
        }
    }
}

// ============================================================================
// Log Format
// ============================================================================

/// Output format for log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Multi-line, human oriented
    Pretty,
    /// Single-line text
    Compact,
    /// One JSON object per line
    Json,
}

impl Format {
    /// Get format from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(Format::Pretty),
            "compact" => Some(Format::Compact),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Minimum level
    pub level: Level,
    /// Output format
    pub format: Format,
    /// Whether to include event targets
    pub targets: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            format: Format::Json,
            targets: true,
        }
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let debug = lookup("FLAGKIT_DEBUG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let level = lookup("FLAGKIT_LOG_LEVEL")
            .and_then(|s| Level::from_str(&s))
            .unwrap_or(if debug { Level::Debug } else { Level::Info });

        let format = lookup("FLAGKIT_LOG_FORMAT")
            .and_then(|s| Format::from_str(&s))
            .unwrap_or(Format::Json);

        Self {
            level,
            format,
            ..Self::default()
        }
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn with_targets(mut self, targets: bool) -> Self {
        self.targets = targets;
        self
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.as_directive()))
    }

    /// Install this configuration as the global subscriber.
    ///
    /// Returns `false` when a global subscriber was already installed,
    /// in which case nothing changes.
    pub fn init(&self) -> bool {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(self.filter())
            .with_target(self.targets)
            .with_writer(std::io::stderr);

        let result = match self.format {
            Format::Json => builder.json().try_init(),
            Format::Pretty => builder.pretty().try_init(),
            Format::Compact => builder.compact().try_init(),
        };

        result.is_ok()
    }
}

// ============================================================================
// Public API
// ============================================================================

static INIT: OnceCell<bool> = OnceCell::new();

/// Initialize logging from the environment.
///
/// Only the first call has an effect. Returns whether that first call
/// installed the subscriber.
pub fn init() -> bool {
    *INIT.get_or_init(|| LogConfig::from_env().init())
}

// ============================================================================
// Tests
// ============================================================================
