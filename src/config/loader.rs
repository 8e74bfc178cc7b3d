//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::MorphexConfig;
use crate::domain::errors::MorphexError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into MorphexConfig
/// 4. Applies environment variable overrides (MORPHEX_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use morphex::config::loader::load_config;
///
/// let config = load_config("morphex.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<MorphexConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MorphexError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        MorphexError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_str(&contents)
}

/// Loads configuration from TOML text; same steps as [`load_config`]
pub fn load_config_str(contents: &str) -> Result<MorphexConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: MorphexConfig = toml::from_str(&contents)
        .map_err(|e| MorphexError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        MorphexError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| MorphexError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(MorphexError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using MORPHEX_* prefix
///
/// Environment variables follow the pattern: MORPHEX_<SECTION>_<KEY>
/// For example: MORPHEX_EXPORT_MODE, MORPHEX_LOGGING_LOCAL_PATH
fn apply_env_overrides(config: &mut MorphexConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("MORPHEX_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Export overrides
    if let Ok(val) = std::env::var("MORPHEX_EXPORT_MODE") {
        config.export.mode = val;
    }
    if let Ok(val) = std::env::var("MORPHEX_EXPORT_ZOOM") {
        config.export.zoom = val.parse().map_err(|e| {
            MorphexError::Configuration(format!("Invalid MORPHEX_EXPORT_ZOOM: {e}"))
        })?;
    }
    if let Ok(val) = std::env::var("MORPHEX_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }
    if let Ok(val) = std::env::var("MORPHEX_EXPORT_ON_IO_ERROR") {
        config.export.on_io_error = val;
    }
    if let Ok(val) = std::env::var("MORPHEX_EXPORT_MAX_RETRIES") {
        config.export.max_retries = val.parse().map_err(|e| {
            MorphexError::Configuration(format!("Invalid MORPHEX_EXPORT_MAX_RETRIES: {e}"))
        })?;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("MORPHEX_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("MORPHEX_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("MORPHEX_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("MORPHEX_TEST_OUT", "/tmp/shapes");
        let input = "output_dir = \"${MORPHEX_TEST_OUT}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result.trim_end(), "output_dir = \"/tmp/shapes\"");
        std::env::remove_var("MORPHEX_TEST_OUT");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("MORPHEX_TEST_MISSING");
        let input = "output_dir = \"${MORPHEX_TEST_MISSING}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# output_dir = \"${MORPHEX_TEST_NEVER_SET}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(MorphexError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[export]
mode = "canvas"
zoom = 2.0
output_dir = "shapes"
on_io_error = "ignore"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.export.mode, "canvas");
        assert_eq!(config.export.zoom, 2.0);
        assert_eq!(config.export.output_dir, "shapes");
    }

    #[test]
    fn test_load_config_invalid_values() {
        let result = load_config_str("[export]\nzoom = -1.0\n");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("export.zoom"));
    }
}
