//! Result type alias for Hearth

use super::errors::HearthError;

/// Result type alias for Hearth operations
///
/// # Examples
///
/// ```
/// use hearth::domain::result::Result;
/// use hearth::domain::errors::HearthError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(HearthError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, HearthError>;
