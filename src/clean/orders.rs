//! `orders_table` (fact) cleaner.

use crate::types::DataSet;

/// Columns the source system carries that have no place in the fact table.
const LEGACY_COLUMNS: &[&str] = &["first_name", "last_name", "1", "level_0", "index"];

/// Clean the orders extract.
///
/// The fact table keeps its foreign-key columns verbatim; key integrity is
/// enforced against the dimensions during migration, not here. Cleaning is
/// limited to pruning identifying/legacy columns and discarding fully-null
/// rows.
pub fn clean(raw: &DataSet) -> DataSet {
    raw.drop_columns(LEGACY_COLUMNS).drop_fully_null_rows()
}
