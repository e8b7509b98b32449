//! `dim_store_details` cleaner.

use crate::types::{DataSet, Value};

use super::rules::{ColumnRule, InvalidPolicy, Normalizer, apply_rules};

/// Store rows are only accepted for these country codes.
pub const COUNTRY_ALLOW_LIST: &[&str] = &["GB", "DE", "US"];

const RULES: &[ColumnRule] = &[
    ColumnRule::new("opening_date", Normalizer::Date, InvalidPolicy::DropRow),
    ColumnRule::new("longitude", Normalizer::Float, InvalidPolicy::SetNull),
    ColumnRule::new("latitude", Normalizer::Float, InvalidPolicy::SetNull),
    ColumnRule::new("staff_numbers", Normalizer::DigitsOnly, InvalidPolicy::DropRow),
    ColumnRule::new("country_code", Normalizer::TrimUpper, InvalidPolicy::Keep),
];

/// Clean the store API extract.
///
/// The raw feed carries a dead `lat` column alongside `latitude`, addresses
/// with embedded newlines, and continents with leading stray characters
/// (`eeEurope`). Rows failing the country allow-list or lacking an address
/// are dropped, not defaulted.
pub fn clean(raw: &DataSet) -> DataSet {
    let ds = raw
        .drop_fully_null_rows()
        .drop_columns(&["lat", "index"])
        .map_column("address", |v| match v.as_str() {
            Some(s) => Value::Utf8(s.replace('\n', ", ")),
            None => v.clone(),
        })
        .map_column("continent", |v| match v.as_str() {
            Some(s) => Value::Utf8(fix_continent(s)),
            None => v.clone(),
        });

    let ds = apply_rules(&ds, RULES);

    let country_idx = ds.column_index("country_code");
    let address_idx = ds.column_index("address");
    ds.filter_rows(|row| {
        let country_ok = country_idx.is_none_or(|i| {
            matches!(row[i].as_str(), Some(code) if COUNTRY_ALLOW_LIST.contains(&code))
        });
        let address_ok = address_idx.is_none_or(|i| !row[i].is_null());
        country_ok && address_ok
    })
}

/// Drop stray leading characters before the continent's first capital letter.
fn fix_continent(raw: &str) -> String {
    match raw.find(|c: char| c.is_ascii_uppercase()) {
        Some(pos) => raw[pos..].to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{clean, fix_continent};
    use crate::types::{DataSet, Schema, Value};

    fn raw_stores(rows: Vec<Vec<&str>>) -> DataSet {
        let schema = Schema::all_utf8(&[
            "address",
            "longitude",
            "lat",
            "locality",
            "store_code",
            "staff_numbers",
            "opening_date",
            "store_type",
            "latitude",
            "country_code",
            "continent",
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

    fn us_store() -> Vec<&'static str> {
        vec![
            "Flat 72W\nSally isle\nEast Deantown\nE7B 8EB",
            "-51.995",
            "",
            "East Deantown",
            "WE-542A4180",
            "34",
            "2006-09-03",
            "Super Store",
            "38.422",
            "US",
            "America",
        ]
    }

    #[test]
    fn non_allow_listed_country_is_dropped() {
        let mut fr = us_store();
        fr[9] = "FR";
        let ds = raw_stores(vec![us_store(), fr]);
        let out = clean(&ds);
        assert_eq!(out.row_count(), 1);
    }

    #[test]
    fn null_address_is_dropped() {
        let mut no_addr = us_store();
        no_addr[0] = "";
        let ds = raw_stores(vec![no_addr]);
        assert_eq!(clean(&ds).row_count(), 0);
    }

    #[test]
    fn address_newlines_collapse_and_lat_column_goes() {
        let ds = raw_stores(vec![us_store()]);
        let out = clean(&ds);
        assert!(out.column_index("lat").is_none());
        assert_eq!(
            out.rows[0][out.column_index("address").unwrap()],
            Value::Utf8("Flat 72W, Sally isle, East Deantown, E7B 8EB".to_string())
        );
    }

    #[test]
    fn continent_stray_characters_are_stripped() {
        assert_eq!(fix_continent("eeEurope"), "Europe");
        assert_eq!(fix_continent("eeAmerica"), "America");
        assert_eq!(fix_continent("Europe"), "Europe");

        let mut store = us_store();
        store[10] = "eeAmerica";
        let out = clean(&raw_stores(vec![store]));
        assert_eq!(
            out.rows[0][out.column_index("continent").unwrap()],
            Value::Utf8("America".to_string())
        );
    }

    #[test]
    fn malformed_coordinates_become_null_but_keep_the_row() {
        let mut store = us_store();
        store[1] = "N/A";
        let out = clean(&raw_stores(vec![store]));
        assert_eq!(out.row_count(), 1);
        assert_eq!(out.rows[0][out.column_index("longitude").unwrap()], Value::Null);
        assert_eq!(
            out.rows[0][out.column_index("latitude").unwrap()],
            Value::Float64(38.422)
        );
    }

    #[test]
    fn all_garbage_rows_are_dropped() {
        let garbage = vec![
            "NRLBG2", "XQ953VS1", "", "HQJ", "9D4LK1C2", "O8G2BTG8", "GFJQ2AAEQ8", "13KJZ890JH",
            "VKA5I", "X0FI58", "B3EH2",
        ];
        let ds = raw_stores(vec![garbage]);
        assert_eq!(clean(&ds).row_count(), 0);
    }

    #[test]
    fn cleaning_is_idempotent() {
        let ds = raw_stores(vec![us_store()]);
        let once = clean(&ds);
        let twice = clean(&once);
        assert_eq!(once, twice);
    }
}
