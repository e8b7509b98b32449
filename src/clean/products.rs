//! `dim_products` cleaner.

use crate::types::DataSet;

use super::rules::{ColumnRule, InvalidPolicy, Normalizer, apply_rules};

const RULES: &[ColumnRule] = &[
    // A price that is empty after symbol-stripping loses the row; a product
    // without a price cannot join the fact table meaningfully.
    ColumnRule::new("product_price", Normalizer::CurrencyAmount, InvalidPolicy::DropRow),
    ColumnRule::new("weight", Normalizer::WeightKg, InvalidPolicy::DropRow),
    ColumnRule::new("date_added", Normalizer::Date, InvalidPolicy::SetNull),
    // Invalid product uuids are nulled, not row-dropped: the row is still
    // keyed by product_code.
    ColumnRule::new("uuid", Normalizer::Uuid, InvalidPolicy::SetNull),
    ColumnRule::new("EAN", Normalizer::DigitsOnly, InvalidPolicy::SetNull),
];

/// Clean the object-storage products extract.
///
/// The CSV carries an unnamed leading index column; the legacy `removed`
/// marker column is kept verbatim here and converted to a boolean
/// `still_available` during migration.
pub fn clean(raw: &DataSet) -> DataSet {
    let ds = raw.drop_fully_null_rows().drop_columns(&["", "index", "Unnamed: 0"]);
    apply_rules(&ds, RULES)
}
