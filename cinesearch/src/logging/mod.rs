//! Structured logging for Cinesearch.
//!
//! Builds a global `tracing` subscriber from [`LoggingConfig`]: human-readable,
//! compact or JSON output, to stdout, a file, or both. `RUST_LOG` takes
//! precedence over the configured level when set.


use crate::config::{LogFormat, LogLevel, LoggingConfig};
use std::path::Path;
use std::sync::OnceLock;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};

/// Keeps the file writer flushing for the life of the process.
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Error type for logging operations
#[derive(Debug)]
pub enum LogError {
    /// IO error occurred
    IoError(std::io::Error),

    /// Error parsing log level
    InvalidLogLevel(String),

    /// Error in subscriber setup
    SubscriberError(Box<dyn std::error::Error + Send + Sync>),

    /// General error
    Other(String),
}

impl From<std::io::Error> for LogError {
    fn from(err: std::io::Error) -> Self {
        LogError::IoError(err)
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for LogError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        LogError::SubscriberError(err)
    }
}

/// Result type for logging operations
pub type Result<T> = std::result::Result<T, LogError>;

/// Initialize the logging system with the given configuration.
///
/// Calling this after a global subscriber is already installed is not an error.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let Some(writer) = make_writer(config)? else {
        return Ok(());
    };
    let filter = env_filter(&config.level);
    let ansi = config.file.is_none();

    let result: std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> =
        match config.format {
            LogFormat::Json => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_line_number(true)
                .with_writer(writer)
                .try_init(),
            LogFormat::Compact => tracing_subscriber::fmt()
                .compact()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(ansi)
                .with_writer(writer)
                .try_init(),
            LogFormat::Pretty => tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(filter)
                .with_line_number(true)
                .with_ansi(ansi)
                .with_writer(writer)
                .try_init(),
            LogFormat::Default => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(ansi)
                .with_writer(writer)
                .try_init(),
        };

    match result {
        Err(e) if is_already_initialized(e.as_ref()) => Ok(()),
        other => other.map_err(LogError::from),
    }
}

fn is_already_initialized(err: &(dyn std::error::Error + Send + Sync)) -> bool {
    let message = err.to_string();
    message.contains("already been set") || message.contains("already initialized")
}

/// `RUST_LOG` when set, else the configured level.
fn env_filter(level: &LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()))
}

/// Writer for the configured outputs, or `None` when every output is disabled.
fn make_writer(config: &LoggingConfig) -> Result<Option<BoxMakeWriter>> {
    let writer = match (&config.file, config.stdout) {
        (Some(path), stdout) => {
            let file = create_non_blocking_file(path)?;
            if stdout {
                BoxMakeWriter::new(std::io::stdout.and(file))
            } else {
                BoxMakeWriter::new(file)
            }
        }
        (None, true) => BoxMakeWriter::new(std::io::stdout),
        (None, false) => return Ok(None),
    };
    Ok(Some(writer))
}

/// Create a non-blocking file writer whose guard lives until process exit.
fn create_non_blocking_file(
    path: impl AsRef<Path>,
) -> Result<tracing_appender::non_blocking::NonBlocking> {
    let path = path.as_ref();

    let file_name = path
        .file_name()
        .ok_or_else(|| LogError::Other(format!("Log file path has no file name: {}", path.display())))?;
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    if !directory.exists() {
        std::fs::create_dir_all(directory)?;
    }

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    if FILE_GUARD.set(guard).is_err() {
        return Err(LogError::Other(
            "File logging has already been initialized".to_string(),
        ));
    }

    Ok(non_blocking)
}

/// Parse a log level string into a LogLevel enum.
pub fn parse_log_level(level: &str) -> Result<LogLevel> {
    level
        .parse::<LogLevel>()
        .map_err(|_| LogError::InvalidLogLevel(level.to_string()))
}

/// Convert a tracing::Level to a LogLevel enum.
pub fn level_to_log_level(level: Level) -> LogLevel {
    match level {
        Level::TRACE => LogLevel::Trace,
        Level::DEBUG => LogLevel::Debug,
        Level::INFO => LogLevel::Info,
        Level::WARN => LogLevel::Warn,
        Level::ERROR => LogLevel::Error,
    }
}

impl std::fmt::Display for LogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogError::IoError(e) => write!(f, "IO error: {}", e),
            LogError::SubscriberError(e) => write!(f, "Subscriber error: {}", e),
            LogError::InvalidLogLevel(s) => write!(f, "Invalid log level: {}", s),
            LogError::Other(s) => write!(f, "{}", s),
        }
    }
}

impl std::error::Error for LogError {}
