//! Result type alias for restws

use super::errors::RestError;

/// Result type alias for restws operations
///
/// # Examples
///
/// ```
/// use restws::domain::result::Result;
/// use restws::domain::errors::RestError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(RestError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, RestError>;
