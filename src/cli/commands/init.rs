//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "morphex.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Morphex configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set export.mode to 'svg' or 'canvas'");
                println!("  3. Validate configuration: morphex validate-config");
                println!("  4. Run export: morphex export --input shapes.json");
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Morphex Configuration File

[application]
log_level = "info"

[export]
mode = "svg"
zoom = 1.0
output_dir = "output"
on_io_error = "prompt"

[logging]
local_enabled = false
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Morphex Configuration File
#
# Values can reference environment variables with ${VAR_NAME}, and any key
# can be overridden with MORPHEX_<SECTION>_<KEY>, e.g. MORPHEX_EXPORT_MODE.

[application]
# trace, debug, info, warn or error; RUST_LOG takes precedence
log_level = "info"

[export]
# "svg" writes {id}.svg documents with SMIL animation.
# "canvas" writes {id}.html pages plus the shared canvas.js runtime.
mode = "svg"

# Scale factor applied to SVG coordinates (must be > 0)
zoom = 1.0

# Directory the artifacts are written to
# output_dir = "${MORPHEX_OUT}/shapes"
output_dir = "output"

# What to do when an artifact can't be written:
#   prompt - ask on the terminal (abort / retry / ignore)
#   abort  - stop the export
#   ignore - skip the artifact and continue
#   retry  - retry up to max_retries times, then abort
on_io_error = "prompt"
max_retries = 3

[logging]
# JSON log file next to the console output
local_enabled = false
local_path = "./logs"
# daily, hourly or never
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_str;
    use tempfile::TempDir;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "morphex.toml".to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.output, "morphex.toml");
        assert!(!args.force);
    }

    #[test]
    fn test_generate_minimal_config() {
        let config = load_config_str(&InitArgs::generate_minimal_config()).unwrap();
        assert_eq!(config.export.mode, "svg");
        assert_eq!(config.export.output_dir, "output");
    }

    #[test]
    fn test_generate_config_with_examples() {
        let content = InitArgs::generate_config_with_examples();
        assert!(content.contains("canvas.js"));
        let config = load_config_str(&content).unwrap();
        assert_eq!(config.export.max_retries, 3);
        assert_eq!(config.logging.local_rotation, "daily");
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("morphex.toml");
        fs::write(&path, "# existing").unwrap();

        let args = InitArgs {
            output: path.display().to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().unwrap(), EXIT_CONFIG);
        assert_eq!(fs::read_to_string(&path).unwrap(), "# existing");

        let forced = InitArgs { force: true, ..args };
        assert_eq!(forced.execute().unwrap(), EXIT_OK);
        assert!(fs::read_to_string(&path).unwrap().contains("[export]"));
    }
}
