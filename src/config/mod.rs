//! Configuration management for Morphex.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Morphex uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `MORPHEX_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use morphex::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("morphex.toml")?;
//!
//! let settings = config.export.settings()?;
//! println!("Export mode: {}", settings.mode);
//! println!("Output: {}", config.export.output_dir);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`ExportConfig`] - Export settings (mode, zoom, output, error policy)
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [export]
//! mode = "canvas"
//! zoom = 1.0
//! output_dir = "${MORPHEX_OUT}/shapes"
//! on_io_error = "retry"
//! max_retries = 3
//!
//! [logging]
//! local_enabled = true
//! local_path = "./logs"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_str};
pub use schema::{ApplicationConfig, ExportConfig, IoErrorPolicy, LoggingConfig, MorphexConfig};
