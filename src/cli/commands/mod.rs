//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod export;
pub mod init;
pub mod list;
pub mod validate;

use crate::config::{load_config, load_config_str, MorphexConfig};
use crate::domain::Result;
use std::path::Path;

/// Exit code for a clean run
pub const EXIT_OK: i32 = 0;
/// Exit code when some records were skipped or failed verification
pub const EXIT_PARTIAL: i32 = 1;
/// Exit code for configuration errors
pub const EXIT_CONFIG: i32 = 2;
/// Exit code for unreadable or malformed input documents
pub const EXIT_INPUT: i32 = 3;
/// Exit code for fatal errors
pub const EXIT_FATAL: i32 = 5;

/// Loads `path`, or the built-in defaults (plus environment overrides) when
/// `path` doesn't exist
pub fn resolve_config(path: &str) -> Result<MorphexConfig> {
    if Path::new(path).exists() {
        load_config(path)
    } else {
        tracing::debug!(config_path = %path, "No configuration file, using defaults");
        load_config_str("")
    }
}
