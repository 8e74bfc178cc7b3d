//! Result type alias for Morphex
//!
//! This module provides a convenient Result type alias that uses MorphexError
//! as the error type.

use super::errors::MorphexError;

/// Result type alias for Morphex operations
///
/// # Examples
///
/// ```
/// use morphex::domain::result::Result;
/// use morphex::domain::errors::MorphexError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(MorphexError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, MorphexError>;
