//! # Umami Telemetry
//!
//! Logging and diagnostics for the Umami realtime client.
//!
//! This crate provides:
//! - Structured logging with JSON and pretty formats via `tracing`
//! - Log rotation and file management
//! - Sensitive data masking (session tokens travel in WebSocket URLs and
//!   must never reach log output unmasked)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

/// Logging configuration and initialization
pub mod logging;

/// Sensitive data masking
pub mod masking;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::logging::{init_logging, LogConfig, LogFormat, LogOutput};
    pub use crate::masking::SensitiveDataMasker;
}
