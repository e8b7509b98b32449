//! `dim_users` cleaner.

use crate::types::DataSet;

use super::rules::{ColumnRule, InvalidPolicy, Normalizer, apply_rules};

const RULES: &[ColumnRule] = &[
    // Unparseable date_of_birth loses the row; join_date is merely nulled.
    ColumnRule::new("date_of_birth", Normalizer::Date, InvalidPolicy::DropRow),
    ColumnRule::new("join_date", Normalizer::Date, InvalidPolicy::SetNull),
    ColumnRule::new("phone_number", Normalizer::DigitsOnly, InvalidPolicy::SetNull),
    ColumnRule::new("user_uuid", Normalizer::Uuid, InvalidPolicy::SetNull),
    ColumnRule::new("country", Normalizer::TrimUpper, InvalidPolicy::Keep),
    ColumnRule::new("country_code", Normalizer::TrimUpper, InvalidPolicy::Keep),
];

/// Clean the legacy users extract.
pub fn clean(raw: &DataSet) -> DataSet {
    let ds = raw.drop_fully_null_rows().drop_columns(&["index"]);
    apply_rules(&ds, RULES)
}
