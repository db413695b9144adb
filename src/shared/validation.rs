use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

pub const CATEGORY_NAME_MIN: usize = 2;
pub const CATEGORY_NAME_MAX: usize = 50;

lazy_static! {
    /// Regex for category colors
    /// - Valid: "#fff", "#1A2B3C"
    /// - Invalid: "fff", "#ffff", "#12345G", "red"
    pub static ref HEX_COLOR_REGEX: Regex =
        Regex::new(r"^#([0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").unwrap();
}

/// Length check on the trimmed category name, shared by the API and the SDK
pub fn category_name_error(name: &str) -> Option<&'static str> {
    let length = name.trim().chars().count();
    if length < CATEGORY_NAME_MIN {
        Some("Category name must be at least 2 characters")
    } else if length > CATEGORY_NAME_MAX {
        Some("Category name must not exceed 50 characters")
    } else {
        None
    }
}

/// `validator` adapter for [`category_name_error`]
pub fn validate_category_name(name: &str) -> Result<(), ValidationError> {
    match category_name_error(name) {
        Some(message) => Err(ValidationError::new("category_name").with_message(message.into())),
        None => Ok(()),
    }
}

/// Non-empty after trimming
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank").with_message("Field must not be blank".into()))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_regex_valid() {
        assert!(HEX_COLOR_REGEX.is_match("#fff"));
        assert!(HEX_COLOR_REGEX.is_match("#1A2B3C"));
        assert!(HEX_COLOR_REGEX.is_match("#3b82f6"));
    }

    #[test]
    fn test_hex_color_regex_invalid() {
        assert!(!HEX_COLOR_REGEX.is_match("fff")); // no hash
        assert!(!HEX_COLOR_REGEX.is_match("#ffff")); // four digits
        assert!(!HEX_COLOR_REGEX.is_match("#12345G"));
        assert!(!HEX_COLOR_REGEX.is_match("red"));
        assert!(!HEX_COLOR_REGEX.is_match(""));
    }

    #[test]
    fn test_category_name_bounds() {
        assert_eq!(
            category_name_error("A"),
            Some("Category name must be at least 2 characters")
        );
        assert_eq!(
            category_name_error("   B  "),
            Some("Category name must be at least 2 characters")
        );
        assert_eq!(category_name_error("Ab"), None);
        assert_eq!(category_name_error(&"x".repeat(50)), None);
        assert_eq!(
            category_name_error(&"x".repeat(51)),
            Some("Category name must not exceed 50 characters")
        );
        // padding does not count toward the limit
        assert_eq!(category_name_error(&format!("  {}  ", "x".repeat(50))), None);
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("  x ").is_ok());
        assert!(validate_not_blank("   ").is_err());
    }
}
