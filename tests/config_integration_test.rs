//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables hold ENV_MUTEX to avoid
//! interference between tests.

use morphex::config::{load_config, load_config_str, IoErrorPolicy};
use morphex::core::render::MorphShapeExportMode;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("MORPHEX_APPLICATION_LOG_LEVEL");
    std::env::remove_var("MORPHEX_EXPORT_MODE");
    std::env::remove_var("MORPHEX_EXPORT_ZOOM");
    std::env::remove_var("MORPHEX_EXPORT_OUTPUT_DIR");
    std::env::remove_var("MORPHEX_EXPORT_ON_IO_ERROR");
    std::env::remove_var("MORPHEX_EXPORT_MAX_RETRIES");
    std::env::remove_var("MORPHEX_LOGGING_LOCAL_ENABLED");
    std::env::remove_var("TEST_MORPHEX_OUT");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"

[export]
mode = "canvas"
zoom = 1.5
output_dir = "/tmp/morphex"
on_io_error = "retry"
max_retries = 5

[logging]
local_enabled = true
local_path = "/tmp/morphex/logs"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.export.output_dir, "/tmp/morphex");
    assert_eq!(config.export.max_retries, 5);
    assert_eq!(config.export.io_error_policy().unwrap(), IoErrorPolicy::Retry);
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");

    let settings = config.export.settings().unwrap();
    assert_eq!(settings.mode, MorphShapeExportMode::Canvas);
    assert_eq!(settings.zoom, 1.5);
}

#[test]
fn test_empty_config_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let config = load_config_str("").unwrap();
    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.export.mode, "svg");
    assert_eq!(config.export.zoom, 1.0);
    assert_eq!(config.export.io_error_policy().unwrap(), IoErrorPolicy::Prompt);
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_MORPHEX_OUT", "/data/out");

    let result = load_config_str("[export]\noutput_dir = \"${TEST_MORPHEX_OUT}/shapes\"\n");

    cleanup_env_vars();
    assert_eq!(result.unwrap().export.output_dir, "/data/out/shapes");
}

#[test]
fn test_env_overrides_take_precedence() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("MORPHEX_EXPORT_MODE", "canvas");
    std::env::set_var("MORPHEX_EXPORT_ZOOM", "3");
    std::env::set_var("MORPHEX_EXPORT_ON_IO_ERROR", "ignore");
    std::env::set_var("MORPHEX_APPLICATION_LOG_LEVEL", "warn");

    let result = load_config_str("[export]\nmode = \"svg\"\nzoom = 1.0\n");

    cleanup_env_vars();
    let config = result.unwrap();
    assert_eq!(config.export.mode, "canvas");
    assert_eq!(config.export.zoom, 3.0);
    assert_eq!(config.export.io_error_policy().unwrap(), IoErrorPolicy::Ignore);
    assert_eq!(config.application.log_level, "warn");
}

#[test]
fn test_invalid_env_override_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("MORPHEX_EXPORT_MAX_RETRIES", "many");

    let result = load_config_str("");

    cleanup_env_vars();
    assert!(result.is_err());
}

#[test]
fn test_invalid_values_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    for contents in [
        "[export]\nmode = \"png\"\n",
        "[export]\nzoom = 0.0\n",
        "[export]\non_io_error = \"panic\"\n",
        "[export]\nmax_retries = 50\n",
        "[export]\noutput_dir = \"  \"\n",
        "[application]\nlog_level = \"loud\"\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
    ] {
        assert!(
            load_config_str(contents).is_err(),
            "accepted invalid config: {contents}"
        );
    }
}

#[test]
fn test_malformed_toml_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("[export\nmode = ");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TOML"));
}
