//! Logging setup and log-volume helpers.
//!
//! [`LogConfig`] is built once at startup and handed to [`init_logging`], which
//! installs a `tracing` subscriber with a console layer and an optional
//! rolling-file layer. Everything else in the crate logs through `tracing`
//! macros or a [`LogSink`].

mod batch;
mod sampled;
mod sink;

pub use batch::BatchLogger;
pub use sampled::SampledLogger;
pub use sink::{emit, LogSink, Severity, TracingSink};

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt as tfmt, EnvFilter, Layer, Registry};

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to build rolling file appender: {0}")]
    Appender(#[from] rolling::InitError),
    #[error("failed to install subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
    #[error("invalid filter directive: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error("sample rate must be in (0, 1], got {0}")]
    InvalidSampleRate(f64),
}

/// When rolling log files are cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Minutely,
    Hourly,
    Daily,
    Never,
}

impl FromStr for Rotation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minutely" => Ok(Rotation::Minutely),
            "hourly" => Ok(Rotation::Hourly),
            "daily" => Ok(Rotation::Daily),
            "never" => Ok(Rotation::Never),
            other => Err(format!("unknown rotation '{}'", other)),
        }
    }
}

impl From<Rotation> for rolling::Rotation {
    fn from(r: Rotation) -> Self {
        match r {
            Rotation::Minutely => rolling::Rotation::MINUTELY,
            Rotation::Hourly => rolling::Rotation::HOURLY,
            Rotation::Daily => rolling::Rotation::DAILY,
            Rotation::Never => rolling::Rotation::NEVER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLogConfig {
    pub directory: PathBuf,
    pub file_prefix: String,
    pub rotation: Rotation,
    /// Oldest files beyond this count are removed on rotation.
    pub max_files: usize,
}

impl Default for FileLogConfig {
    fn default() -> Self {
        FileLogConfig {
            directory: PathBuf::from("logs"),
            file_prefix: "app".into(),
            rotation: Rotation::Daily,
            max_files: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: LevelFilter,
    pub console: bool,
    /// JSON lines instead of the human-readable format.
    pub json: bool,
    pub file: Option<FileLogConfig>,
}

impl LogConfig {
    /// Production logs INFO and above as JSON; development logs DEBUG in text.
    pub fn for_environment(production: bool) -> Self {
        LogConfig {
            level: if production { LevelFilter::INFO } else { LevelFilter::DEBUG },
            console: true,
            json: production,
            file: Some(FileLogConfig::default()),
        }
    }

    /// Environment defaults overridden by `LOG_*` variables. Unparseable values keep the default.
    pub fn from_env(production: bool) -> Self {
        Self::from_lookup(production, |key| std::env::var(key).ok())
    }

    pub fn from_lookup(production: bool, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::for_environment(production);
        if let Some(level) = lookup("LOG_LEVEL").as_deref().and_then(parse_level) {
            config.level = level;
        }
        if let Some(b) = lookup("LOG_CONSOLE").as_deref().and_then(parse_flag) {
            config.console = b;
        }
        if let Some(b) = lookup("LOG_JSON").as_deref().and_then(parse_flag) {
            config.json = b;
        }
        if lookup("LOG_FILE").as_deref().and_then(parse_flag) == Some(false) {
            config.file = None;
        }
        if let Some(file) = config.file.as_mut() {
            if let Some(dir) = lookup("LOG_DIR").filter(|d| !d.is_empty()) {
                file.directory = PathBuf::from(dir);
            }
            if let Some(prefix) = lookup("LOG_FILE_PREFIX").filter(|p| !p.is_empty()) {
                file.file_prefix = prefix;
            }
            if let Some(rotation) = lookup("LOG_ROTATION").and_then(|r| r.parse().ok()) {
                file.rotation = rotation;
            }
            if let Some(n) = lookup("LOG_MAX_FILES").and_then(|n| n.parse().ok()) {
                file.max_files = n;
            }
        }
        config
    }

    /// Default filter when `RUST_LOG` is unset.
    pub fn default_directives(&self) -> String {
        format!("{},sqlx=warn", self.level)
    }
}

/// Accepts the standard level names plus `WARNING` and `CRITICAL`, case-insensitively.
pub fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.trim().to_ascii_uppercase().as_str() {
        "WARNING" => Some(LevelFilter::WARN),
        "CRITICAL" => Some(LevelFilter::ERROR),
        other => other.parse().ok(),
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Keeps the non-blocking file writer alive; buffered lines are flushed when dropped.
#[must_use]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

impl fmt::Debug for LogGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogGuard")
            .field("file", &self._file.is_some())
            .finish()
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber described by `config`. `RUST_LOG` takes precedence over `config.level`.
pub fn init_logging(config: &LogConfig) -> Result<LogGuard, TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(config.default_directives())?,
    };

    let mut layers: Vec<BoxedLayer> = Vec::new();
    if config.console {
        let layer = if config.json {
            tfmt::layer().json().with_current_span(true).boxed()
        } else {
            tfmt::layer().with_target(true).with_thread_ids(true).boxed()
        };
        layers.push(layer);
    }

    let mut guard = None;
    if let Some(file) = &config.file {
        let appender = rolling::Builder::new()
            .rotation(file.rotation.into())
            .filename_prefix(&file.file_prefix)
            .filename_suffix("log")
            .max_log_files(file.max_files.max(1))
            .build(&file.directory)?;
        let (writer, file_guard) = tracing_appender::non_blocking(appender);
        guard = Some(file_guard);
        let layer = if config.json {
            tfmt::layer().json().with_writer(writer).boxed()
        } else {
            tfmt::layer()
                .with_ansi(false)
                .with_thread_ids(true)
                .with_writer(writer)
                .boxed()
        };
        layers.push(layer);
    }

    tracing_subscriber::registry().with(layers).with(filter).try_init()?;
    tracing::info!(
        level = %config.level,
        console = config.console,
        json = config.json,
        file = ?config.file.as_ref().map(|f| &f.directory),
        "logging system initialized"
    );
    Ok(LogGuard { _file: guard })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn environment_conditions_the_level() {
        assert_eq!(LogConfig::for_environment(true).level, LevelFilter::INFO);
        assert_eq!(LogConfig::for_environment(false).level, LevelFilter::DEBUG);
    }

    #[test]
    fn overrides_apply() {
        let config = LogConfig::from_lookup(
            false,
            lookup(&[
                ("LOG_LEVEL", "warning"),
                ("LOG_DIR", "/var/log/shelter"),
                ("LOG_ROTATION", "hourly"),
                ("LOG_MAX_FILES", "3"),
                ("LOG_JSON", "true"),
            ]),
        );
        assert_eq!(config.level, LevelFilter::WARN);
        assert!(config.json);
        let file = config.file.unwrap();
        assert_eq!(file.directory, PathBuf::from("/var/log/shelter"));
        assert_eq!(file.rotation, Rotation::Hourly);
        assert_eq!(file.max_files, 3);
    }

    #[test]
    fn invalid_level_is_ignored() {
        let config = LogConfig::from_lookup(true, lookup(&[("LOG_LEVEL", "LOUD")]));
        assert_eq!(config.level, LevelFilter::INFO);
    }

    #[test]
    fn file_output_can_be_disabled() {
        let config = LogConfig::from_lookup(false, lookup(&[("LOG_FILE", "off")]));
        assert!(config.file.is_none());
    }

    #[test]
    fn critical_maps_to_error() {
        assert_eq!(parse_level("CRITICAL"), Some(LevelFilter::ERROR));
        assert_eq!(parse_level("debug"), Some(LevelFilter::DEBUG));
    }
}
