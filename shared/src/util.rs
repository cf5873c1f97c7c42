//! Shared utility functions

/// Current Unix timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Validate a vitrine slug: 3-64 chars, lowercase `[a-z0-9-]`,
/// no leading/trailing or doubled hyphen.
pub fn is_valid_slug(slug: &str) -> bool {
    if slug.len() < 3 || slug.len() > 64 {
        return false;
    }
    if slug.starts_with('-') || slug.ends_with('-') || slug.contains("--") {
        return false;
    }
    slug.bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_slugs() {
        assert!(is_valid_slug("agence-soleil"));
        assert!(is_valid_slug("voyages2000"));
        assert!(is_valid_slug("abc"));
    }

    #[test]
    fn test_invalid_slugs() {
        assert!(!is_valid_slug("ab"));
        assert!(!is_valid_slug("Agence"));
        assert!(!is_valid_slug("agence soleil"));
        assert!(!is_valid_slug("-agence"));
        assert!(!is_valid_slug("agence-"));
        assert!(!is_valid_slug("agence--soleil"));
        assert!(!is_valid_slug("café-voyage"));
        assert!(!is_valid_slug(&"a".repeat(65)));
    }
}
