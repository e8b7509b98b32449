//! Mixed-unit weight strings converted to kilograms.

/// Convert a composite `"<number><unit>"` weight string to kilograms.
///
/// Rules:
///
/// - `kg` values pass through unchanged; a bare number is treated as already
///   canonical (kilograms).
/// - `g` and `ml` divide by 1000.
/// - `oz` multiplies by 0.0283495.
/// - Multiplicative forms (`"12 x 100g"`) multiply out before converting.
/// - Trailing debris after the unit (the feed carries `"77g ."`) is ignored.
/// - Anything else returns `None`.
///
/// The unit token is discarded after conversion.
pub fn to_kilograms(raw: &str) -> Option<f64> {
    let trimmed = raw
        .trim()
        .trim_end_matches(|c: char| !c.is_ascii_alphanumeric())
        .trim();
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_ascii_lowercase();

    // "12 x 100g" multiplies the count into the per-item weight.
    if let Some((count, rest)) = lower.split_once('x') {
        let count: f64 = count.trim().parse().ok()?;
        return Some(count * to_kilograms(rest.trim())?);
    }

    let split = lower
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(lower.len());
    let (value, unit) = lower.split_at(split);
    let value: f64 = value.trim().parse().ok()?;

    match unit.trim() {
        "" | "kg" => Some(value),
        "g" | "ml" => Some(value / 1000.0),
        "oz" => Some(value * 0.028_349_5),
        _ => None,
    }
}
