//! Row to JSON conversion for the externally defined item schema.

use serde_json::{Map, Value};
use sqlx::{postgres::PgRow, Column, Row};

/// Convert a database row into a JSON object, skipping the named columns.
///
/// The item table's columns are not known at compile time, so conversion
/// probes a small set of scalar types per column instead of relying on a
/// typed schema. Columns that match none of the probes come back as null.
pub fn row_to_json(row: &PgRow, skip: &[&str]) -> Map<String, Value> {
    let mut map = Map::new();

    for i in 0..row.len() {
        let column_name = row.column(i).name();
        if skip.contains(&column_name) {
            continue;
        }

        let json_value = match row.try_get::<Option<Value>, _>(i) {
            Ok(Some(v)) => v,
            Ok(None) => Value::Null,
            Err(_) => {
                // Not a JSON column; walk the scalar types the item table uses
                if let Ok(s) = row.try_get::<Option<String>, _>(i) {
                    s.map(Value::String).unwrap_or(Value::Null)
                } else if let Ok(v) = row.try_get::<Option<i32>, _>(i) {
                    v.map(|n| Value::Number(n.into())).unwrap_or(Value::Null)
                } else if let Ok(v) = row.try_get::<Option<i64>, _>(i) {
                    v.map(|n| Value::Number(n.into())).unwrap_or(Value::Null)
                } else if let Ok(v) = row.try_get::<Option<f64>, _>(i) {
                    v.and_then(|f| serde_json::Number::from_f64(f).map(Value::Number))
                        .unwrap_or(Value::Null)
                } else if let Ok(v) = row.try_get::<Option<f32>, _>(i) {
                    v.and_then(|f| serde_json::Number::from_f64(f as f64).map(Value::Number))
                        .unwrap_or(Value::Null)
                } else if let Ok(v) = row.try_get::<Option<bool>, _>(i) {
                    v.map(Value::Bool).unwrap_or(Value::Null)
                } else if let Ok(ts) = row.try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(i) {
                    ts.map(|t| Value::String(t.to_rfc3339())).unwrap_or(Value::Null)
                } else if let Ok(ts) = row.try_get::<Option<chrono::NaiveDateTime>, _>(i) {
                    ts.map(|t| Value::String(t.to_string())).unwrap_or(Value::Null)
                } else {
                    Value::Null
                }
            }
        };

        map.insert(column_name.to_string(), json_value);
    }

    map
}
