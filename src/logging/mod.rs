//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels, overridable through `RUST_LOG`
//! - Local JSON file logging with rotation
//! - Helper macros for the export lifecycle
//!
//! # Example
//!
//! ```no_run
//! use morphex::logging::init_logging;
//! use morphex::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of an export run
///
/// # Example
///
/// ```no_run
/// use morphex::log_export_start;
/// use morphex::core::render::MorphShapeExportMode;
///
/// log_export_start!(MorphShapeExportMode::Svg, 12);
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($mode:expr, $count:expr) => {
        tracing::info!(
            mode = %$mode,
            count = $count,
            "Starting export"
        );
    };
}

/// Log the completion of an export run
///
/// # Example
///
/// ```no_run
/// use morphex::log_export_complete;
/// use std::time::Duration;
///
/// log_export_complete!(13, Duration::from_millis(250));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($count:expr, $duration:expr) => {
        tracing::info!(
            count = $count,
            duration_ms = $duration.as_millis() as u64,
            "Export completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use morphex::log_error_with_context;
/// use morphex::domain::MorphexError;
///
/// let error = MorphexError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log export progress
///
/// # Example
///
/// ```no_run
/// use morphex::log_batch_processing;
///
/// log_batch_processing!(3, 12);
/// ```
#[macro_export]
macro_rules! log_batch_processing {
    ($current:expr, $total:expr) => {
        tracing::debug!(
            current = $current,
            total = $total,
            progress_pct = ($current as f64 / $total as f64 * 100.0),
            "Processing morph shape"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use morphex::log_retry_attempt;
///
/// log_retry_attempt!(2, 4, "Permission denied");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = %$reason,
            "Retrying operation"
        );
    };
}
