//! Person name normalization
//!
//! Names are free text; the only rules are "trimmed" and "not blank" for
//! the required name, and "blank means absent" for the optional first name.

use crate::error::{IdentityError, IdentityResult};

const NAME_MAX_LENGTH: usize = 100;

/// Validate the required family/display name
pub fn required_name(raw: &str) -> IdentityResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(IdentityError::InvalidInput("Name cannot be empty".into()));
    }
    if name.chars().count() > NAME_MAX_LENGTH {
        return Err(IdentityError::InvalidInput(format!(
            "Name must be at most {NAME_MAX_LENGTH} characters"
        )));
    }
    Ok(name.to_string())
}

/// Normalize an optional field: `None` for missing or blank input
pub fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_name() {
        assert_eq!(required_name("  Marin ").unwrap(), "Marin");
        assert!(required_name("   ").is_err());
        assert!(required_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some(" Léa ")), Some("Léa".to_string()));
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(None), None);
    }
}
