//! `dim_card_details` cleaner.

use crate::types::DataSet;

use super::rules::{ColumnRule, InvalidPolicy, Normalizer, apply_rules};

const RULES: &[ColumnRule] = &[
    // The document extract prefixes some card numbers with '?' artifacts;
    // digit extraction removes them.
    ColumnRule::new("card_number", Normalizer::DigitsOnly, InvalidPolicy::DropRow),
    ColumnRule::new("expiry_date", Normalizer::ExpiryDate, InvalidPolicy::DropRow),
    ColumnRule::new(
        "date_payment_confirmed",
        Normalizer::Date,
        InvalidPolicy::DropRow,
    ),
];

/// Clean the card details extract.
///
/// Card rows are keyed by `card_number`; the policy here is the strictest of
/// the dimensions: any null remaining after parsing loses the row.
pub fn clean(raw: &DataSet) -> DataSet {
    let ds = raw.drop_fully_null_rows();
    let ds = apply_rules(&ds, RULES);
    ds.filter_rows(|row| row.iter().all(|v| !v.is_null()))
}

#[cfg(test)]
mod tests {
    use super::clean;
    use crate::types::{DataSet, Schema, Value};

    fn raw_cards(rows: Vec<[&str; 4]>) -> DataSet {
        let schema = Schema::all_utf8(&[
            "card_number",
            "expiry_date",
            "card_provider",
            "date_payment_confirmed",
        ]);
        DataSet::new(
            schema,
            rows.iter()
                .map(|r| {
                    r.iter()
                        .map(|s| {
                            if s.is_empty() {
                                Value::Null
                            } else {
                                Value::Utf8((*s).to_string())
                            }
                        })
                        .collect()
                })
                .collect(),
        )
    }

    #[test]
    fn strips_question_mark_artifacts_from_card_numbers() {
        let ds = raw_cards(vec![["??4654492346226715", "09/26", "VISA 16 digit", "2015-11-25"]]);
        let out = clean(&ds);
        assert_eq!(out.rows[0][0], Value::Utf8("4654492346226715".to_string()));
    }

    #[test]
    fn drops_rows_with_bad_expiry_or_date() {
        let ds = raw_cards(vec![
            ["4654492346226715", "09/26", "VISA 16 digit", "2015-11-25"],
            ["4654492346226716", "NB71VBAHJE", "VISA 16 digit", "2015-11-25"],
            ["4654492346226717", "09/26", "VISA 16 digit", "GTC9KBWJO9"],
        ]);
        assert_eq!(clean(&ds).row_count(), 1);
    }

    #[test]
    fn drops_rows_with_any_null_after_parse() {
        let ds = raw_cards(vec![["4654492346226715", "09/26", "", "2015-11-25"]]);
        assert_eq!(clean(&ds).row_count(), 0);
    }

    #[test]
    fn cleaning_is_idempotent() {
        let ds = raw_cards(vec![["??4654492346226715", "09/26", "VISA 16 digit", "2015 November 25"]]);
        let once = clean(&ds);
        let twice = clean(&once);
        assert_eq!(once, twice);
    }
}
