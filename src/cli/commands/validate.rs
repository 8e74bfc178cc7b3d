//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Morphex configuration file.

use super::{EXIT_CONFIG, EXIT_OK};
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                println!();
                return Ok(EXIT_CONFIG);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Export Mode: {}", config.export.mode);
        println!("  Zoom: {}", config.export.zoom);
        println!("  Output Directory: {}", config.export.output_dir);
        println!("  On I/O Error: {}", config.export.on_io_error);
        println!("  Max Retries: {}", config.export.max_retries);
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        } else {
            println!("  File Logging: disabled");
        }
        println!();

        Ok(EXIT_OK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[export]\nmode = \"canvas\"\n").unwrap();
        file.flush().unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .unwrap();
        assert_eq!(code, EXIT_OK);
    }

    #[test]
    fn test_validate_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[export]\nmode = \"png\"\n").unwrap();
        file.flush().unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .unwrap();
        assert_eq!(code, EXIT_CONFIG);
    }

    #[test]
    fn test_validate_missing_file() {
        let code = ValidateArgs {}.execute("/nonexistent/morphex.toml").unwrap();
        assert_eq!(code, EXIT_CONFIG);
    }
}
