use serde_json::Value;
use sqlx::postgres::PgArguments;

/// Scalar value bound into a dynamically built statement.
///
/// Batch payloads carry untyped JSON; each value's runtime shape is
/// inspected once at the boundary and pinned to one of three store-level
/// types, instead of re-dispatching on the JSON type at bind time.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl SqlValue {
    /// Infer the store type from a JSON value's shape.
    ///
    /// Whole numbers become integers, other numbers floats, and everything
    /// else is carried as unbounded text. Nulls yield `None` and are dropped
    /// by the caller.
    pub fn infer(value: &Value) -> Option<SqlValue> {
        match value {
            Value::Null => None,
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(SqlValue::Integer(i))
                } else if let Some(u) = n.as_u64() {
                    Some(SqlValue::Integer(u as i64))
                } else {
                    Some(SqlValue::Float(n.as_f64().unwrap_or(0.0)))
                }
            }
            Value::String(s) => Some(SqlValue::Text(s.clone())),
            Value::Bool(b) => Some(SqlValue::Text(b.to_string())),
            other => Some(SqlValue::Text(other.to_string())),
        }
    }

    /// Bind this value as the next placeholder of `query`.
    pub fn bind<'q>(
        &'q self,
        query: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    ) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
        match self {
            SqlValue::Integer(i) => query.bind(*i),
            SqlValue::Float(f) => query.bind(*f),
            SqlValue::Text(s) => query.bind(s.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn whole_numbers_become_integers() {
        assert_eq!(SqlValue::infer(&json!(5)), Some(SqlValue::Integer(5)));
        assert_eq!(SqlValue::infer(&json!(0)), Some(SqlValue::Integer(0)));
        assert_eq!(SqlValue::infer(&json!(-12)), Some(SqlValue::Integer(-12)));
    }

    #[test]
    fn fractional_numbers_become_floats() {
        assert_eq!(SqlValue::infer(&json!(5.5)), Some(SqlValue::Float(5.5)));
        assert_eq!(SqlValue::infer(&json!(-0.25)), Some(SqlValue::Float(-0.25)));
    }

    #[test]
    fn strings_and_everything_else_become_text() {
        assert_eq!(
            SqlValue::infer(&json!("abc")),
            Some(SqlValue::Text("abc".to_string()))
        );
        assert_eq!(
            SqlValue::infer(&json!(true)),
            Some(SqlValue::Text("true".to_string()))
        );
        assert_eq!(
            SqlValue::infer(&json!([1, 2])),
            Some(SqlValue::Text("[1,2]".to_string()))
        );
    }

    #[test]
    fn nulls_are_dropped() {
        assert_eq!(SqlValue::infer(&Value::Null), None);
    }
}
