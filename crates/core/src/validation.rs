//! Field-level validation shared by master data, projects and estimations.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::types::Hours;

/// Maximum length of any display name (projects, screens, levels, estimations).
pub const MAX_NAME_LEN: usize = 200;

/// Accepts `1`, `1.2`, `1.2.3`, optionally prefixed with `v`/`V`.
const VERSION_PATTERN: &str = r"^[vV]?\d+(\.\d+){0,2}$";

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(VERSION_PATTERN).expect("valid regex"));

/// Validate a required name field and return it trimmed.
pub fn validate_name(value: &str, field: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate an optional name field (used by partial updates).
pub fn validate_optional_name(
    value: Option<&str>,
    field: &str,
) -> Result<Option<String>, CoreError> {
    value.map(|v| validate_name(v, field)).transpose()
}

/// Master-data weights must be strictly positive.
pub fn validate_positive_hours(hours: Hours, field: &str) -> Result<(), CoreError> {
    if hours <= 0 {
        return Err(CoreError::Validation(format!(
            "{field} must be a positive number of hours, got {hours}"
        )));
    }
    Ok(())
}

/// Mapping cells and line items may be zero but never negative.
pub fn validate_non_negative_hours(hours: Hours, field: &str) -> Result<(), CoreError> {
    if hours < 0 {
        return Err(CoreError::Validation(format!(
            "{field} must not be negative, got {hours}"
        )));
    }
    Ok(())
}

/// Validate an estimation version number and return it trimmed.
pub fn validate_version_number(value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "version_number must not be empty".to_string(),
        ));
    }
    if !VERSION_RE.is_match(trimmed) {
        return Err(CoreError::Validation(format!(
            "version_number '{trimmed}' is malformed; expected e.g. 1, 1.2 or v1.2.3"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn name_is_trimmed() {
        assert_eq!(validate_name("  Login  ", "name").unwrap(), "Login");
    }

    #[test]
    fn blank_name_rejected() {
        assert_matches!(validate_name("   ", "name"), Err(CoreError::Validation(_)));
        assert_matches!(validate_name("", "name"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn overlong_name_rejected() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_name(&long, "name").is_err());
        assert!(validate_name(&"x".repeat(MAX_NAME_LEN), "name").is_ok());
    }

    #[test]
    fn optional_name_passes_none_through() {
        assert_eq!(validate_optional_name(None, "name").unwrap(), None);
        assert!(validate_optional_name(Some(" "), "name").is_err());
    }

    #[test]
    fn positive_hours() {
        assert!(validate_positive_hours(1, "hours").is_ok());
        assert!(validate_positive_hours(0, "hours").is_err());
        assert!(validate_positive_hours(-3, "hours").is_err());
    }

    #[test]
    fn non_negative_hours() {
        assert!(validate_non_negative_hours(0, "hours").is_ok());
        assert!(validate_non_negative_hours(-1, "hours").is_err());
    }

    #[test]
    fn well_formed_versions_accepted() {
        for v in ["1", "1.0", "2.1.3", "v1", "V3.2", " 1.1 "] {
            assert!(validate_version_number(v).is_ok(), "{v} should be accepted");
        }
        assert_eq!(validate_version_number(" v1.2 ").unwrap(), "v1.2");
    }

    #[test]
    fn malformed_versions_rejected() {
        for v in ["", "  ", "one", "1.", ".1", "1.2.3.4", "1..2", "v", "1-2"] {
            assert_matches!(
                validate_version_number(v),
                Err(CoreError::Validation(_)),
                "{v:?} should be rejected"
            );
        }
    }
}
