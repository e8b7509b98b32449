//! Raw JSON extraction.
//!
//! Accepts an array of JSON objects (the shape all three HTTP collaborators
//! return). The schema is the union of keys across records, in first-seen
//! order; records missing a key yield nulls. Scalars keep their JSON types,
//! everything else is stringified.

use crate::error::{EtlError, EtlResult};
use crate::types::{DataSet, Schema, Value};

/// Parse JSON text (an array of objects, or one object) into a raw [`DataSet`].
pub fn dataset_from_json_str(input: &str) -> EtlResult<DataSet> {
    let v: serde_json::Value = serde_json::from_str(input)?;
    match v {
        serde_json::Value::Array(items) => dataset_from_json_values(&items),
        serde_json::Value::Object(_) => dataset_from_json_values(std::slice::from_ref(&v)),
        _ => Err(EtlError::SchemaMismatch {
            message: "json must be an object or an array of objects".to_string(),
        }),
    }
}

/// Build a raw [`DataSet`] from already-parsed JSON records.
pub fn dataset_from_json_values(values: &[serde_json::Value]) -> EtlResult<DataSet> {
    // Union of keys, first-seen order.
    let mut names: Vec<String> = Vec::new();
    for (idx0, v) in values.iter().enumerate() {
        let obj = v.as_object().ok_or_else(|| EtlError::SchemaMismatch {
            message: format!("record {} is not a json object", idx0 + 1),
        })?;
        for key in obj.keys() {
            if !names.iter().any(|n| n == key) {
                names.push(key.clone());
            }
        }
    }

    let schema = Schema::all_utf8(&names);
    let rows = values
        .iter()
        .map(|v| {
            let obj = v.as_object().expect("checked above");
            names
                .iter()
                .map(|name| obj.get(name).map_or(Value::Null, convert_json_value))
                .collect()
        })
        .collect();

    Ok(DataSet::new(schema, rows))
}

fn convert_json_value(v: &serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int64(i)
            } else {
                Value::Float64(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        serde_json::Value::String(s) => {
            if s.trim().is_empty() {
                Value::Null
            } else {
                Value::Utf8(s.clone())
            }
        }
        other => Value::Utf8(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::dataset_from_json_str;
    use crate::types::Value;

    #[test]
    fn array_of_objects_unions_keys_in_first_seen_order() {
        let ds = dataset_from_json_str(r#"[{"a": 1, "b": "x"}, {"b": "y", "c": 2.5}]"#).unwrap();
        assert_eq!(
            ds.schema.field_names().collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );
        assert_eq!(ds.rows[0][2], Value::Null);
        assert_eq!(ds.rows[1][0], Value::Null);
        assert_eq!(ds.rows[1][2], Value::Float64(2.5));
    }

    #[test]
    fn scalars_keep_their_json_types() {
        let ds = dataset_from_json_str(r#"[{"n": 3, "f": 1.5, "b": true, "s": "ok"}]"#).unwrap();
        assert_eq!(ds.rows[0][0], Value::Int64(3));
        assert_eq!(ds.rows[0][1], Value::Float64(1.5));
        assert_eq!(ds.rows[0][2], Value::Bool(true));
        assert_eq!(ds.rows[0][3], Value::Utf8("ok".to_string()));
    }

    #[test]
    fn single_object_becomes_one_row() {
        let ds = dataset_from_json_str(r#"{"store_code": "WEB-1388012W"}"#).unwrap();
        assert_eq!(ds.row_count(), 1);
    }

    #[test]
    fn non_object_records_are_rejected() {
        assert!(dataset_from_json_str(r#"[1, 2]"#).is_err());
        assert!(dataset_from_json_str(r#""scalar""#).is_err());
    }

    #[test]
    fn empty_strings_become_null() {
        let ds = dataset_from_json_str(r#"[{"a": ""}]"#).unwrap();
        assert_eq!(ds.rows[0][0], Value::Null);
    }
}
