//! Declarative column rules.
//!
//! Each entity cleaner is a rule table, not imperative code: a [`ColumnRule`]
//! pairs a column with the [`Normalizer`] that coerces it and the
//! [`InvalidPolicy`] deciding what an unparseable cell does to its row.
//! [`apply_rules`] runs one table over a dataset in a single pass.
//!
//! Contract details:
//!
//! - A rule naming a column absent from the dataset is skipped (raw feeds
//!   vary in shape between source variants).
//! - A null input cell counts as invalid and goes through the rule's policy.
//! - Already-typed cells (non-null, non-string) are considered canonical and
//!   pass through unchanged, which makes rule application idempotent.

use crate::normalize;
use crate::types::{DataSet, DataType, Value};

/// Cell-level coercion applied by a [`ColumnRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalizer {
    /// Multi-format date parse, canonicalized to `DD-MM-YYYY`.
    Date,
    /// Strip all non-digit characters.
    DigitsOnly,
    /// Currency-prefixed amount to float.
    CurrencyAmount,
    /// Mixed-unit weight to kilograms.
    WeightKg,
    /// Canonical 8-4-4-4-12 UUID; value kept verbatim when valid.
    Uuid,
    /// `MM/YY` card expiry; value kept verbatim when valid.
    ExpiryDate,
    /// Plain float parse.
    Float,
    /// Trim surrounding whitespace and uppercase.
    TrimUpper,
    /// Sales time-period labels to AM/PM codes.
    TimePeriod,
}

/// What an invalid cell does to its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidPolicy {
    /// Discard the whole row.
    DropRow,
    /// Replace the cell with [`Value::Null`].
    SetNull,
    /// Leave the cell as it was.
    Keep,
}

/// One column's cleaning rule: normalizer plus drop policy.
#[derive(Debug, Clone, Copy)]
pub struct ColumnRule {
    /// Target column name.
    pub column: &'static str,
    /// Coercion to apply.
    pub normalizer: Normalizer,
    /// Row policy for invalid cells.
    pub on_invalid: InvalidPolicy,
}

impl ColumnRule {
    /// Create a rule.
    pub const fn new(
        column: &'static str,
        normalizer: Normalizer,
        on_invalid: InvalidPolicy,
    ) -> Self {
        Self {
            column,
            normalizer,
            on_invalid,
        }
    }
}

/// Apply a rule table to every row of `ds`.
///
/// Rules are applied in order within each row; a `DropRow` hit discards the
/// row immediately without evaluating its remaining rules. Columns whose
/// normalizer produces a typed value (floats) are retyped in the output
/// schema so table creation matches the stored cells.
pub fn apply_rules(ds: &DataSet, rules: &[ColumnRule]) -> DataSet {
    // Resolve rule -> column index once; unknown columns are skipped.
    let resolved: Vec<(usize, &ColumnRule)> = rules
        .iter()
        .filter_map(|r| ds.schema.index_of(r.column).map(|i| (i, r)))
        .collect();

    let mut rows = Vec::with_capacity(ds.rows.len());
    'rows: for row in &ds.rows {
        let mut out = row.clone();
        for (idx, rule) in &resolved {
            match run_normalizer(rule.normalizer, &out[*idx]) {
                Some(v) => out[*idx] = v,
                None => match rule.on_invalid {
                    InvalidPolicy::DropRow => continue 'rows,
                    InvalidPolicy::SetNull => out[*idx] = Value::Null,
                    InvalidPolicy::Keep => {}
                },
            }
        }
        rows.push(out);
    }

    let mut schema = ds.schema.clone();
    for (idx, rule) in &resolved {
        if let Some(dt) = output_type(rule.normalizer) {
            schema.fields[*idx].data_type = dt;
        }
    }

    DataSet::new(schema, rows)
}

/// The output data type a normalizer imposes on its column, if any.
fn output_type(normalizer: Normalizer) -> Option<DataType> {
    match normalizer {
        Normalizer::CurrencyAmount | Normalizer::WeightKg | Normalizer::Float => {
            Some(DataType::Float64)
        }
        _ => None,
    }
}

fn run_normalizer(normalizer: Normalizer, value: &Value) -> Option<Value> {
    let raw = match value {
        Value::Null => return None,
        Value::Utf8(s) => s.as_str(),
        // Already typed; canonical by construction.
        other => return Some(other.clone()),
    };

    match normalizer {
        Normalizer::Date => normalize::normalize_date(raw).map(Value::Utf8),
        Normalizer::DigitsOnly => normalize::digits_only(raw).map(Value::Utf8),
        Normalizer::CurrencyAmount => normalize::currency_amount(raw).map(Value::Float64),
        Normalizer::WeightKg => normalize::to_kilograms(raw).map(Value::Float64),
        Normalizer::Uuid => {
            normalize::is_canonical_uuid(raw).then(|| Value::Utf8(raw.to_string()))
        }
        Normalizer::ExpiryDate => {
            normalize::is_expiry_mm_yy(raw.trim()).then(|| Value::Utf8(raw.trim().to_string()))
        }
        Normalizer::Float => raw.trim().parse::<f64>().ok().map(Value::Float64),
        Normalizer::TrimUpper => Some(Value::Utf8(raw.trim().to_uppercase())),
        Normalizer::TimePeriod => normalize::time_period().map(raw).map(Value::Utf8),
    }
}
