//! Closed-set label-to-code mapping.

/// What happens to an input that is not in the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmappedPolicy {
    /// Return the input unchanged.
    PassThrough,
    /// Treat the input as missing.
    Null,
}

/// A closed mapping from descriptive labels to short codes.
///
/// Lookup is case-insensitive on the label. Already-coded inputs fall under
/// the unmapped policy, so a `PassThrough` map is stable when re-applied to
/// its own output.
#[derive(Debug, Clone)]
pub struct CategoryMap {
    pairs: &'static [(&'static str, &'static str)],
    unmapped: UnmappedPolicy,
}

impl CategoryMap {
    /// Create a map from label/code pairs and an unmapped policy.
    pub fn new(
        pairs: &'static [(&'static str, &'static str)],
        unmapped: UnmappedPolicy,
    ) -> Self {
        Self { pairs, unmapped }
    }

    /// Map one label. `None` means the value becomes missing.
    pub fn map(&self, raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        for (label, code) in self.pairs {
            if trimmed.eq_ignore_ascii_case(label) {
                return Some((*code).to_string());
            }
        }
        match self.unmapped {
            UnmappedPolicy::PassThrough => Some(trimmed.to_string()),
            UnmappedPolicy::Null => None,
        }
    }
}

/// The sales time-period map: descriptive labels to AM/PM codes.
pub fn time_period() -> CategoryMap {
    CategoryMap::new(
        &[
            ("Morning", "AM"),
            ("Midday", "PM"),
            ("Afternoon", "PM"),
            ("Evening", "PM"),
            ("Late_Hours", "PM"),
        ],
        UnmappedPolicy::PassThrough,
    )
}
