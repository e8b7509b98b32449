//! Numeric extraction from free text.

/// Strip every non-digit character, keeping the digits that remain.
///
/// Used for phone numbers, card numbers, EANs, and staff counts, where
/// punctuation and stray markers (`(0)`, `-`, `?`) pollute the feed.
/// Returns `None` when nothing numeric is left.
pub fn digits_only(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() { None } else { Some(digits) }
}

/// Parse a currency-prefixed amount (`"£9.99"`, `"1,034.33"`) into a float.
///
/// Strips everything except digits and the decimal point before parsing.
/// Returns `None` when the stripped string is empty or does not parse.
pub fn currency_amount(raw: &str) -> Option<f64> {
    let stripped: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if stripped.is_empty() {
        return None;
    }
    stripped.parse::<f64>().ok()
}
