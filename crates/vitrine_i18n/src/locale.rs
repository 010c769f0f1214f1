/// Normalize locale identifiers to a canonical-ish form for lookup.
///
/// - Converts `_` to `-` (`en_US` -> `en-US`).
/// - Trims whitespace.
pub fn normalize_locale(s: &str) -> String {
    s.trim().replace('_', "-")
}

/// Lowercased primary language subtag: `en-GB` -> `en`, ` PL ` -> `pl`.
pub fn primary_subtag(s: &str) -> String {
    normalize_locale(s)
        .split('-')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_separators_and_whitespace() {
        assert_eq!(normalize_locale(" en_US "), "en-US");
        assert_eq!(normalize_locale("pl"), "pl");
    }

    #[test]
    fn extracts_primary_subtag() {
        assert_eq!(primary_subtag("en-GB"), "en");
        assert_eq!(primary_subtag("EN_us"), "en");
        assert_eq!(primary_subtag("pl"), "pl");
        assert_eq!(primary_subtag(""), "");
    }
}
