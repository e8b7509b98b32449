//! Multi-format date parsing.
//!
//! Source feeds mix four date spellings: ISO (`2013-10-14`), verbose
//! (`2013 October 14`), slash-separated (`2013/10/14`), and month-first
//! verbose (`October 2013 14`). Formats are tried in a fixed priority order;
//! the canonical output form `DD-MM-YYYY` is itself first in that order so
//! that re-cleaning already-cleaned data is a no-op.

use chrono::NaiveDate;

/// Formats tried in priority order. The canonical output shape leads.
const FORMATS: &[&str] = &[
    "%d-%m-%Y", // canonical output, accepted back for idempotence
    "%Y-%m-%d", // ISO
    "%Y %B %d", // verbose, year first
    "%Y/%m/%d", // slash-separated
    "%B %Y %d", // verbose, month first
];

/// Parse a raw date string against the supported formats.
///
/// Returns `None` when no format matches or the date is not a valid
/// calendar date (e.g. `2013-02-30`).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Parse a raw date string and render it in the canonical `DD-MM-YYYY` form.
pub fn normalize_date(raw: &str) -> Option<String> {
    parse_date(raw).map(|d| d.format("%d-%m-%Y").to_string())
}

/// Returns `true` for a card expiry in `MM/YY` form with a real month.
pub fn is_expiry_mm_yy(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    if bytes.len() != 5 || bytes[2] != b'/' {
        return false;
    }
    let (mm, yy) = (&raw[..2], &raw[3..]);
    match (mm.parse::<u8>(), yy.parse::<u8>()) {
        (Ok(m), Ok(_)) => (1..=12).contains(&m),
        _ => false,
    }
}
