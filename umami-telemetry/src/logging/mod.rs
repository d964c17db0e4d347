//! Structured logging system.
//!
//! Provides configurable logging with support for:
//! - JSON and pretty-print formats
//! - Multiple output targets (stdout, file)
//! - Log rotation

mod config;

pub use config::{LogConfig, LogFormat, LogOutput, RotationConfig};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

/// Initialize the logging system with the given configuration.
///
/// Returns guards that must be kept alive for the duration of the program
/// to ensure file-backed logs are flushed.
///
/// # Example
///
/// ```no_run
/// use umami_telemetry::logging::{init_logging, LogConfig};
///
/// let config = LogConfig::default();
/// let _guards = init_logging(&config).expect("Failed to initialize logging");
/// ```
pub fn init_logging(config: &LogConfig) -> Result<Vec<WorkerGuard>, LoggingError> {
    let mut guards = Vec::new();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let mut layers: Vec<Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync>> = Vec::new();

    for output in &config.outputs {
        match output {
            LogOutput::Stdout => {
                let base = fmt::layer()
                    .with_target(true)
                    .with_thread_ids(config.include_thread_id)
                    .with_file(config.include_file_info)
                    .with_line_number(config.include_file_info);
                match config.format {
                    LogFormat::Json => layers.push(Box::new(base.json().flatten_event(true))),
                    LogFormat::Pretty => layers.push(Box::new(base)),
                }
            }
            LogOutput::File { path, rotation } => {
                let file_appender = match rotation {
                    Some(RotationConfig::Hourly) => {
                        tracing_appender::rolling::hourly(path, "umami.log")
                    }
                    Some(RotationConfig::Never) => {
                        tracing_appender::rolling::never(path, "umami.log")
                    }
                    Some(RotationConfig::Daily) | None => {
                        tracing_appender::rolling::daily(path, "umami.log")
                    }
                };

                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                guards.push(guard);

                layers.push(Box::new(
                    fmt::layer()
                        .with_writer(non_blocking)
                        .with_target(true)
                        .with_thread_ids(config.include_thread_id)
                        .with_file(config.include_file_info)
                        .with_line_number(config.include_file_info)
                        .json()
                        .flatten_event(true),
                ));
            }
        }
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .init();

    Ok(guards)
}

/// Errors that can occur during logging initialization.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Failed to create log directory
    #[error("Failed to create log directory: {0}")]
    DirectoryCreation(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Invalid logging configuration: {0}")]
    InvalidConfig(String),
}
