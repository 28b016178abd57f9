//! Reusable field validators
//!
//! Each validator checks one rule and carries the message shown to the user.
//! Validators that target a specific JSON type let other types through so
//! that a single failure is not reported several times over.

use regex::Regex;
use serde_json::Value;

/// Validator: field is present (not null)
pub fn required(
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| {
        if value.is_null() {
            Err(message.to_string())
        } else {
            Ok(())
        }
    }
}

/// Validator: string must not be empty
pub fn non_empty(
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match value.as_str() {
        Some("") => Err(message.to_string()),
        _ => Ok(()),
    }
}

/// Validator: string must fully match `pattern`
pub fn matches(
    pattern: Regex,
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match value.as_str() {
        Some(s) if !pattern.is_match(s) => Err(message.to_string()),
        _ => Ok(()),
    }
}

/// Validator: value must be a finite JSON number
pub fn number(
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match value.as_f64() {
        Some(n) if n.is_finite() => Ok(()),
        _ => Err(message.to_string()),
    }
}

/// Validator: number must be strictly positive
pub fn positive(
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match value.as_f64() {
        Some(n) if n <= 0.0 => Err(message.to_string()),
        _ => Ok(()),
    }
}

/// Validator: number must not exceed `max`
pub fn max_value(
    max: f64,
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match value.as_f64() {
        Some(n) if n > max => Err(message.to_string()),
        _ => Ok(()),
    }
}

/// Validator: value must be one of `allowed`
///
/// Unlike the type-specific validators this one also rejects missing and
/// non-string values.
pub fn one_of(
    allowed: &'static [&'static str],
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match value.as_str() {
        Some(s) if allowed.contains(&s) => Ok(()),
        _ => Err(message.to_string()),
    }
}
