//! Configuration schema types
//!
//! This module defines the configuration structure for Morphex. Every section
//! has defaults, so an empty file is a valid configuration.

use crate::core::render::{ExportSettings, MorphShapeExportMode};
use crate::domain::{MorphexError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Main Morphex configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MorphexConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MorphexConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.application.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// What to do when an artifact can't be written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoErrorPolicy {
    /// Ask the operator on the terminal
    Prompt,
    /// Stop the batch
    Abort,
    /// Skip the artifact
    Ignore,
    /// Retry up to `max_retries` times, then abort
    Retry,
}

impl FromStr for IoErrorPolicy {
    type Err = MorphexError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "prompt" => Ok(Self::Prompt),
            "abort" => Ok(Self::Abort),
            "ignore" | "skip" => Ok(Self::Ignore),
            "retry" => Ok(Self::Retry),
            _ => Err(MorphexError::Configuration(format!(
                "Invalid I/O error policy: {s}. Expected 'prompt', 'abort', 'ignore' or 'retry'"
            ))),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output format (svg or canvas)
    #[serde(default = "default_export_mode")]
    pub mode: String,

    /// Scale factor for SVG output
    #[serde(default = "default_zoom")]
    pub zoom: f64,

    /// Directory artifacts are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Reaction to artifact write failures (prompt, abort, ignore, retry)
    #[serde(default = "default_on_io_error")]
    pub on_io_error: String,

    /// Retries per artifact when `on_io_error = "retry"`
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl ExportConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        let valid_modes = ["svg", "canvas"];
        if !valid_modes.contains(&self.mode.as_str()) {
            return Err(format!(
                "Invalid export.mode '{}'. Must be one of: {}",
                self.mode,
                valid_modes.join(", ")
            ));
        }

        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(format!("export.zoom must be > 0, got {}", self.zoom));
        }

        if self.output_dir.trim().is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }

        IoErrorPolicy::from_str(&self.on_io_error).map_err(|e| e.to_string())?;

        if self.max_retries > 10 {
            return Err(format!(
                "export.max_retries must be <= 10, got {}",
                self.max_retries
            ));
        }

        Ok(())
    }

    /// Read-only settings for one export run
    pub fn settings(&self) -> Result<ExportSettings> {
        let mode = MorphShapeExportMode::from_str(&self.mode)?;
        Ok(ExportSettings::new(mode, self.zoom))
    }

    pub fn io_error_policy(&self) -> Result<IoErrorPolicy> {
        IoErrorPolicy::from_str(&self.on_io_error)
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            mode: default_export_mode(),
            zoom: default_zoom(),
            output_dir: default_output_dir(),
            on_io_error: default_on_io_error(),
            max_retries: default_max_retries(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_export_mode() -> String {
    "svg".to_string()
}

fn default_zoom() -> f64 {
    1.0
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_on_io_error() -> String {
    "prompt".to_string()
}

fn default_max_retries() -> u32 {
    3
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
