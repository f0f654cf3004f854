//! Field deserializers for model output, which drifts from the prompted shape:
//! `null` where text was asked for, numbers quoted as strings, stray types.
//! Each one reads a `serde_json::Value` and never rejects valid JSON.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `null` becomes the type's default.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads a finite number from a JSON number or a numeric string.
pub fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn as_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Text; `null` is empty, other scalars keep their JSON form.
pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(as_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// A list of text items. `null` is empty, a lone string is a one-item list,
/// `null` items are dropped.
pub fn text_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(as_text).collect(),
        Value::String(s) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    })
}

/// Anything that does not read as a number is 0.
pub fn number_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(as_number(&Value::deserialize(deserializer)?).unwrap_or(0.0))
}

/// A list of numbers, or `None` unless every item reads as one.
pub fn number_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<f64>>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.iter().map(as_number).collect(),
        _ => None,
    })
}

/// `[x, y]`; anything unreadable is the origin.
pub fn point<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[f64; 2], D::Error> {
    Ok(match number_list(deserializer)?.as_deref() {
        Some([x, y, ..]) => [*x, *y],
        _ => [0.0, 0.0],
    })
}
