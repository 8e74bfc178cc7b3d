//! Domain error types
//!
//! This module defines the error hierarchy for Morphex.
//! All errors are domain-specific and don't expose third-party types.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main Morphex error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum MorphexError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The output directory could not be created
    #[error("Failed to create output directory {path}: {message}")]
    DirectoryCreation { path: PathBuf, message: String },

    /// An artifact could not be written and the operator did not skip it
    #[error("Failed to write artifact {path}: {message}")]
    ArtifactWrite { path: PathBuf, message: String },

    /// Malformed record geometry
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// Input document errors (missing file, duplicate ids, ...)
    #[error("Input error: {0}")]
    Input(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl MorphexError {
    /// Creates an artifact write error for `path`
    pub fn artifact_write(path: impl AsRef<Path>, err: &std::io::Error) -> Self {
        MorphexError::ArtifactWrite {
            path: path.as_ref().to_path_buf(),
            message: err.to_string(),
        }
    }
}

/// Errors raised while encoding a record into SVG or Canvas output
///
/// These indicate a precondition violation by whatever produced the
/// records; they are never retried.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// Start and end shapes have a different number of paths
    #[error("Morph shape {character_id}: start has {start} paths, end has {end}")]
    PathCountMismatch {
        character_id: u16,
        start: usize,
        end: usize,
    },

    /// A start/end path pair has diverging edge lists
    #[error("Morph shape {character_id}: path {path} edges do not pair up ({reason})")]
    EdgeMismatch {
        character_id: u16,
        path: usize,
        reason: String,
    },

    /// A path references a fill style that doesn't exist
    #[error("Character {character_id}: fill style {index} out of range ({available} defined)")]
    MissingFillStyle {
        character_id: u16,
        index: usize,
        available: usize,
    },

    /// A path references a line style that doesn't exist
    #[error("Character {character_id}: line style {index} out of range ({available} defined)")]
    MissingLineStyle {
        character_id: u16,
        index: usize,
        available: usize,
    },

    /// The serialized asset library was not valid UTF-8
    #[error("Asset library is not valid UTF-8: {0}")]
    InvalidUtf8(String),

    /// The asset library references a character missing from the document
    #[error("Character {0} is referenced but not defined in the document")]
    UnknownCharacter(u16),
}

// Conversion from std::io::Error
impl From<std::io::Error> for MorphexError {
    fn from(err: std::io::Error) -> Self {
        MorphexError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for MorphexError {
    fn from(err: serde_json::Error) -> Self {
        MorphexError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for MorphexError {
    fn from(err: toml::de::Error) -> Self {
        MorphexError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<std::string::FromUtf8Error> for EncodingError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        EncodingError::InvalidUtf8(err.to_string())
    }
}
