//! Key Policy Module
//!
//! Namespaces raw cache keys and validates the composed name.

use crate::error::{CacheError, Result};

// == Namespace ==
/// Composes the storage name for a raw key by prepending the configured
/// prefix.
///
/// No escaping is performed; callers must not rely on the prefix/key
/// boundary staying distinguishable afterwards.
pub fn namespace(prefix: &str, key: &str) -> String {
    format!("{prefix}{key}")
}

// == Validate ==
/// Rejects a composed name containing any character from `forbidden`.
///
/// A single pass over the name; the first offending character is reported.
/// This runs before any storage access, so a bad key never reaches a
/// backend.
///
/// # Errors
/// `CacheError::InvalidArgument` naming the offending character and the
/// reserved set.
pub fn validate_name(name: &str, forbidden: &str) -> Result<()> {
    if let Some(found) = name.chars().find(|c| forbidden.contains(*c)) {
        return Err(CacheError::InvalidArgument(format!(
            "cache name {name:?} contains reserved character {found:?} (reserved set: {forbidden})"
        )));
    }
    Ok(())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{FORBIDDEN_NAME_CHARS, SQL_FORBIDDEN_NAME_CHARS};

    #[test]
    fn test_namespace_concatenates() {
        assert_eq!(namespace("cache_", "user42"), "cache_user42");
        assert_eq!(namespace("", "user42"), "user42");
    }

    #[test]
    fn test_validate_accepts_plain_names() {
        assert!(validate_name("cache_user-42.profile", FORBIDDEN_NAME_CHARS).is_ok());
    }

    #[test]
    fn test_validate_rejects_each_forbidden_character() {
        for c in FORBIDDEN_NAME_CHARS.chars() {
            let name = format!("cache_{c}key");
            let result = validate_name(&name, FORBIDDEN_NAME_CHARS);
            assert!(result.is_err(), "character {c:?} should be rejected");
        }
    }

    #[test]
    fn test_validate_rejects_path_traversal_separators() {
        assert!(validate_name("cache_../etc/passwd", FORBIDDEN_NAME_CHARS).is_err());
        assert!(validate_name("cache_..\\windows", FORBIDDEN_NAME_CHARS).is_err());
    }

    #[test]
    fn test_sql_set_additionally_rejects_quotes() {
        assert!(validate_name("cache_o'brien", FORBIDDEN_NAME_CHARS).is_ok());
        assert!(validate_name("cache_o'brien", SQL_FORBIDDEN_NAME_CHARS).is_err());
        assert!(validate_name("cache_\"quoted\"", SQL_FORBIDDEN_NAME_CHARS).is_err());
    }
}
