//! Result type alias

use super::errors::InspectorError;

/// Result type alias for study-inspector operations
///
/// # Examples
///
/// ```
/// use study_inspector::domain::result::Result;
/// use study_inspector::domain::errors::InspectorError;
///
/// fn failing_function() -> Result<()> {
///     Err(InspectorError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, InspectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
