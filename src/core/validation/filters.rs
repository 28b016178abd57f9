//! Reusable field filters
//!
//! These filters normalize raw form values before validation

use serde_json::{Number, Value};

/// Filter: trim whitespace from string
pub fn trim() -> impl Fn(&str, Value) -> Value + Send + Sync + Clone {
    |_: &str, value: Value| match value {
        Value::String(s) => Value::String(s.trim().to_string()),
        other => other,
    }
}

/// Filter: turn a numeric string into a JSON number
///
/// An empty string becomes null (the field was left blank). Strings that do
/// not parse to a finite number are kept so the validators can reject them.
pub fn coerce_number() -> impl Fn(&str, Value) -> Value + Send + Sync + Clone {
    |_: &str, value: Value| match value {
        Value::String(s) if s.is_empty() => Value::Null,
        Value::String(s) => match s.parse::<f64>().ok().and_then(Number::from_f64) {
            Some(n) => Value::Number(n),
            None => Value::String(s),
        },
        other => other,
    }
}
