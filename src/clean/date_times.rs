//! `dim_date_times` cleaner.

use crate::types::DataSet;

use super::rules::{ColumnRule, InvalidPolicy, Normalizer, apply_rules};

const RULES: &[ColumnRule] = &[
    // A sale event without a year or day is unusable for the date dimension.
    ColumnRule::new("year", Normalizer::DigitsOnly, InvalidPolicy::DropRow),
    ColumnRule::new("day", Normalizer::DigitsOnly, InvalidPolicy::DropRow),
    ColumnRule::new("month", Normalizer::DigitsOnly, InvalidPolicy::SetNull),
    ColumnRule::new("time_period", Normalizer::TimePeriod, InvalidPolicy::Keep),
    // date_uuid is this dimension's primary key: invalid means the row goes.
    ColumnRule::new("date_uuid", Normalizer::Uuid, InvalidPolicy::DropRow),
];

/// Clean the sales date-time extract.
pub fn clean(raw: &DataSet) -> DataSet {
    let ds = raw.drop_fully_null_rows();
    apply_rules(&ds, RULES)
}

#[cfg(test)]
mod tests {
    use super::clean;
    use crate::types::{DataSet, Schema, Value};

    fn raw_dates(rows: Vec<[&str; 6]>) -> DataSet {
        let schema = Schema::all_utf8(&[
            "timestamp",
            "month",
            "year",
            "day",
            "time_period",
            "date_uuid",
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

    fn sale() -> [&'static str; 6] {
        [
            "22:00:06",
            "9",
            "2012",
            "19",
            "Evening",
            "9476f17e-5d6a-4117-874d-9cdb38ca1fa6",
        ]
    }

    #[test]
    fn maps_time_period_labels_to_codes() {
        let out = clean(&raw_dates(vec![sale()]));
        assert_eq!(out.rows[0][4], Value::Utf8("PM".to_string()));
    }

    #[test]
    fn drops_rows_missing_year_or_day() {
        let mut no_year = sale();
        no_year[2] = "";
        let mut bad_day = sale();
        bad_day[3] = "NULL";
        let ds = raw_dates(vec![sale(), no_year, bad_day]);
        assert_eq!(clean(&ds).row_count(), 1);
    }

    #[test]
    fn drops_rows_with_invalid_date_uuid() {
        let mut bad = sale();
        bad[5] = "not-a-uuid";
        assert_eq!(clean(&raw_dates(vec![bad])).row_count(), 0);
    }

    #[test]
    fn cleaning_is_idempotent() {
        let once = clean(&raw_dates(vec![sale()]));
        assert_eq!(clean(&once), once);
    }
}
