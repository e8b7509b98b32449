//! Canonical UUID validation.

use once_cell::sync::Lazy;
use regex::Regex;

/// Canonical 8-4-4-4-12 hexadecimal form, case-insensitive.
static CANONICAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
    )
    .expect("uuid pattern is valid")
});

/// Returns `true` only for the canonical hyphenated form.
///
/// Braced, simple (hyphenless), and urn forms are rejected: the dimension
/// keys must be byte-identical across the fact and dimension tables, so only
/// one spelling is admitted.
pub fn is_canonical_uuid(raw: &str) -> bool {
    CANONICAL.is_match(raw)
}

#[cfg(test)]
mod tests {
    use super::is_canonical_uuid;

    #[test]
    fn accepts_canonical_forms() {
        assert!(is_canonical_uuid("93caf182-e4e9-4c58-a977-9e12914b0899"));
        assert!(is_canonical_uuid("8FE96C3A-D62D-4EB5-B313-CF12D9126A49"));
        assert!(is_canonical_uuid("00000000-0000-0000-0000-000000000000"));
    }

    #[test]
    fn rejects_non_canonical_forms() {
        // wrong hyphen position
        assert!(!is_canonical_uuid("93caf182e-4e9-4c58-a977-9e12914b0891"));
        // too short / too long
        assert!(!is_canonical_uuid("93caf182-e4e9-4c58-a977"));
        assert!(!is_canonical_uuid("93caf182-e4e9-4c58-a977-9e12914b08999"));
        // simple and braced forms
        assert!(!is_canonical_uuid("93caf182e4e94c58a9779e12914b0899"));
        assert!(!is_canonical_uuid("{93caf182-e4e9-4c58-a977-9e12914b0899}"));
        // non-hex garbage
        assert!(!is_canonical_uuid("I4PQLEHNDN"));
        assert!(!is_canonical_uuid(""));
    }
}
