//! Automatic description of plain data
//!
//! Used when a value has to be rendered but neither it nor the caller
//! provides a description. Every object key becomes an element whose text is
//! a dotted reference back into the same data, so rendering the result
//! against the analysed value reproduces its content.

use crate::meta::{Entries, Entry, Meta, MetaValue};
use crate::value::Value;
use tracing::debug;

/// Root element name used when the caller doesn't pick one
pub const DEFAULT_ROOT: &str = "result";

/// Describe `data` as a document rooted at `root_name`
pub fn analyse(data: &Value, root_name: &str) -> Meta {
    debug!(root = root_name, kind = data.kind(), "analysing structure");
    Meta::Entries(Entries::new().with(root_name, container(data, "")))
}

fn container(data: &Value, prefix: &str) -> Entries {
    match data {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| entry(key, value, prefix))
            .collect(),
        // Array items name self-closing elements; anything but a string is
        // skipped since it can't be a name.
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(|key| entry(key, &Value::Null, prefix))
            .collect(),
        _ => Entries::new(),
    }
}

fn entry(key: &str, value: &Value, prefix: &str) -> Entry {
    match value {
        Value::Null => Entry::new(key, MetaValue::Flag),
        Value::Bool(b) => Entry::new(key, *b),
        Value::Array(_) | Value::Object(_) => {
            let nested = container(value, &format!("{prefix}{key}."));
            Entry::new(key, MetaValue::Nested(nested))
        }
        Value::Integer(_) | Value::Number(_) | Value::String(_) | Value::Source(_) => {
            Entry::new(key, format!("{prefix}{key}"))
        }
    }
}
