/// Lower-case and trim a free-text field for substring matching.
///
/// Missing values match as the empty string, so they never satisfy a rule.
pub fn normalize_text(raw: Option<&str>) -> String {
    raw.map(|s| s.trim().to_lowercase()).unwrap_or_default()
}

/// Grouping label for a free-text field: trimmed text, or `fallback` when absent.
pub fn group_label(raw: Option<&str>, fallback: &str) -> String {
    match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => fallback.to_string(),
    }
}

/// Join key for the denormalized `animalTag` text match. Only surrounding
/// whitespace is dropped; the comparison stays case-sensitive.
pub fn tag_key(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text(Some("  Dry COW ")), "dry cow");
        assert_eq!(normalize_text(None), "");
    }

    #[test]
    fn test_group_label_fallback() {
        assert_eq!(group_label(Some(" Ravi "), "Unknown"), "Ravi");
        assert_eq!(group_label(Some("   "), "Unknown"), "Unknown");
        assert_eq!(group_label(None, "Unknown"), "Unknown");
    }

    #[test]
    fn test_tag_key() {
        assert_eq!(tag_key(Some(" H-7 ")), Some("H-7"));
        assert_eq!(tag_key(Some("")), None);
        assert_eq!(tag_key(Some("   ")), None);
        assert_ne!(tag_key(Some("h-7")), tag_key(Some("H-7")));
    }
}
