//! Loading source data and loose descriptions from JSON
//!
//! Objects keep their key order, so a JSON description renders attributes
//! and children in the order they were written.

use crate::error::{ErrorKind, Result};
use crate::value::Value;
use serde_json::Value as JsonValue;

/// Parse JSON text into a [`Value`]
pub fn from_json_str(s: &str) -> Result<Value> {
    serde_json::from_str::<JsonValue>(s)
        .map(Value::from)
        .map_err(|e| ErrorKind::Json(e.to_string()).into())
}

/// Parse JSON bytes into a [`Value`]
pub fn from_json_slice(bytes: &[u8]) -> Result<Value> {
    serde_json::from_slice::<JsonValue>(bytes)
        .map(Value::from)
        .map_err(|e| ErrorKind::Json(e.to_string()).into())
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::Bool(b),
            JsonValue::Number(n) => number(&n),
            JsonValue::String(s) => Self::String(s),
            JsonValue::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            JsonValue::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Integers stay exact; only real floats go through `f64`
fn number(n: &serde_json::Number) -> Value {
    n.as_i64()
        .map(Value::from)
        .or_else(|| n.as_u64().map(Value::from))
        .unwrap_or_else(|| Value::Number(n.as_f64().unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Source;

    #[test]
    fn test_object_order_preserved() {
        let value = from_json_str(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn test_scalars() {
        let value = from_json_slice(br#"{"n": 5, "s": "x", "b": false, "z": null}"#).unwrap();
        assert_eq!(value.field("n"), Some(Value::Integer(5)));
        assert_eq!(value.field("s"), Some(Value::from("x")));
        assert_eq!(value.field("b"), Some(Value::Bool(false)));
        assert_eq!(value.field("z"), Some(Value::Null));
    }

    #[test]
    fn test_numbers() {
        let value = from_json_str(r#"{"id": 9007199254740993, "neg": -3, "ratio": 0.5}"#).unwrap();
        assert_eq!(value.field("id"), Some(Value::Integer(9_007_199_254_740_993)));
        assert_eq!(value.field("neg"), Some(Value::Integer(-3)));
        assert_eq!(value.field("ratio"), Some(Value::Number(0.5)));
    }

    #[test]
    fn test_invalid_json() {
        let err = from_json_str("{").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Json(_)));
    }
}
