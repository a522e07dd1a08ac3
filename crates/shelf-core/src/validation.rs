//! Field limits shared by the store schema, the engine, and the CLI.

use crate::errors::CoreError;

pub const MAX_TITLE_LEN: usize = 150;
pub const MAX_AUTHOR_LEN: usize = 100;
pub const MAX_BORROWER_LEN: usize = 100;
pub const MAX_CATEGORY_LEN: usize = 50;

/// Trim `value` and check it is non-empty and at most `max` characters.
///
/// # Errors
///
/// Returns `CoreError::Validation` naming `field` when the check fails.
pub fn required_text<'a>(value: &'a str, field: &str, max: usize) -> Result<&'a str, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(trimmed)
}

/// Validate a borrower name.
///
/// # Errors
///
/// Returns `CoreError::Validation` for blank or over-long names.
pub fn borrower_name(value: &str) -> Result<&str, CoreError> {
    required_text(value, "borrower name", MAX_BORROWER_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(borrower_name("  Alice ").unwrap(), "Alice");
    }

    #[test]
    fn rejects_blank() {
        let err = borrower_name("   ").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: borrower name must not be empty");
    }

    #[test]
    fn rejects_over_long() {
        let long = "x".repeat(MAX_TITLE_LEN + 1);
        assert!(required_text(&long, "title", MAX_TITLE_LEN).is_err());
        assert!(required_text(&long[..MAX_TITLE_LEN], "title", MAX_TITLE_LEN).is_ok());
    }
}
