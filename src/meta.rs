//! Meta descriptions: the DSL that says which elements and attributes to emit
//!
//! Markers are interpreted once, when an [`Entry`] is constructed. A key
//! starting with `@` names an attribute, a key starting with `=` paired with a
//! flag value is raw markup, anything else names an element. Loose input
//! (a [`Value`] tree, e.g. loaded from JSON) goes through the same step via
//! [`Entries::from_value`], which is also where kinds the DSL cannot express
//! are rejected.

use crate::element::Element;
use crate::error::{Error, ErrorKind, Result};
use crate::source::Source;
use crate::value::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Leading marker of attribute keys
pub const ATTRIBUTE_MARKER: char = '@';
/// Leading marker of literal values and raw markup keys
pub const LITERAL_MARKER: char = '=';

/// What an entry's key asks the builder to do
#[derive(Clone)]
pub enum Key {
    /// Set an attribute on the current node
    Attribute(String),
    /// Open a child element
    Element(String),
    /// Append markup verbatim to the current node's text
    Raw(String),
    /// Continue building the current node from another description
    Merge(Entries),
    /// Append another source's rendered XML to the current node's text
    Embed(Arc<dyn Source>),
}

impl Key {
    fn parse(key: &str, value: &MetaValue) -> Self {
        if let Some(name) = key.strip_prefix(ATTRIBUTE_MARKER) {
            return Self::Attribute(name.to_owned());
        }
        match (key.strip_prefix(LITERAL_MARKER), value) {
            (Some(markup), MetaValue::Flag) => Self::Raw(markup.to_owned()),
            _ => Self::Element(key.to_owned()),
        }
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attribute(name) => f.debug_tuple("Attribute").field(name).finish(),
            Self::Element(name) => f.debug_tuple("Element").field(name).finish(),
            Self::Raw(markup) => f.debug_tuple("Raw").field(markup).finish(),
            Self::Merge(entries) => f.debug_tuple("Merge").field(entries).finish(),
            Self::Embed(source) => f.debug_tuple("Embed").field(&source.type_name()).finish(),
        }
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Attribute(a), Self::Attribute(b))
            | (Self::Element(a), Self::Element(b))
            | (Self::Raw(a), Self::Raw(b)) => a == b,
            (Self::Merge(a), Self::Merge(b)) => a == b,
            (Self::Embed(a), Self::Embed(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Value half of an entry
#[derive(Clone, Debug, PartialEq)]
pub enum MetaValue {
    /// A reference resolved against the source, or a literal after `=`
    Text(String),
    /// Valueless attribute or self-closing element (null or `true`)
    Flag,
    /// Leave the entry out (`false`)
    Omit,
    /// Build a child element from this description
    Nested(Entries),
}

impl MetaValue {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "string",
            Self::Flag => "null",
            Self::Omit => "boolean",
            Self::Nested(_) => "array",
        }
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        if value {
            Self::Flag
        } else {
            Self::Omit
        }
    }
}

impl<T: Into<String>> From<Option<T>> for MetaValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Flag, |text| Self::Text(text.into()))
    }
}

impl From<Entries> for MetaValue {
    fn from(entries: Entries) -> Self {
        Self::Nested(entries)
    }
}

/// One `(key, value)` pair of a description
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub key: Key,
    pub value: MetaValue,
}

impl Entry {
    /// Build an entry from a marked-up key
    pub fn new(key: &str, value: impl Into<MetaValue>) -> Self {
        let value = value.into();
        Self {
            key: Key::parse(key, &value),
            value,
        }
    }

    /// Sequential position: the item is the key, the value is a flag
    fn from_item(item: &Value) -> Result<Self> {
        let key = match item {
            Value::String(key) => return Ok(Self::new(key, MetaValue::Flag)),
            Value::Array(_) | Value::Object(_) => Key::Merge(Entries::from_value(item)?),
            Value::Source(source) => Key::Embed(Arc::clone(source)),
            other => {
                return Err(ErrorKind::InvalidKey {
                    found: other.kind(),
                }
                .into())
            }
        };
        Ok(Self {
            key,
            value: MetaValue::Flag,
        })
    }

    fn from_pair(key: &str, value: &Value) -> Result<Self> {
        let is_attribute = key.starts_with(ATTRIBUTE_MARKER);
        let invalid = |found: &'static str| -> Error {
            let kind = if is_attribute {
                ErrorKind::InvalidAttributeValue { found }
            } else {
                ErrorKind::InvalidElementValue { found }
            };
            Error::new(kind).within(key)
        };

        let value = match value {
            Value::String(text) => MetaValue::Text(text.clone()),
            Value::Null | Value::Bool(true) => MetaValue::Flag,
            Value::Bool(false) => MetaValue::Omit,
            Value::Array(_) | Value::Object(_) if is_attribute => {
                return Err(invalid(value.kind()))
            }
            Value::Array(_) | Value::Object(_) => {
                MetaValue::Nested(Entries::from_value(value).map_err(|e| e.within(key))?)
            }
            Value::Integer(_) | Value::Number(_) | Value::Source(_) => {
                return Err(invalid(value.kind()))
            }
        };
        Ok(Self::new(key, value))
    }
}

/// An ordered description; order decides attribute overwrites and child order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Entries(Vec<Entry>);

impl Entries {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.0.iter()
    }

    pub fn push(&mut self, entry: Entry) {
        self.0.push(entry);
    }

    /// Keyed entry: `key => value`
    pub fn with(mut self, key: &str, value: impl Into<MetaValue>) -> Self {
        self.push(Entry::new(key, value));
        self
    }

    /// Sequential entry: a valueless attribute, self-closing element or raw markup
    pub fn flag(self, key: &str) -> Self {
        self.with(key, MetaValue::Flag)
    }

    /// Splice another description into the current node
    pub fn merge(mut self, entries: Self) -> Self {
        self.push(Entry {
            key: Key::Merge(entries),
            value: MetaValue::Flag,
        });
        self
    }

    /// Append the rendered XML of a describable source
    pub fn embed(mut self, source: Arc<dyn Source>) -> Self {
        self.push(Entry {
            key: Key::Embed(source),
            value: MetaValue::Flag,
        });
        self
    }

    /// Normalize a loose container: arrays hold sequential entries, objects
    /// hold keyed ones.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Array(items) => items.iter().map(Entry::from_item).collect(),
            Value::Object(map) => map
                .iter()
                .map(|(key, value)| Entry::from_pair(key, value))
                .collect(),
            other => Err(ErrorKind::InvalidElementValue {
                found: other.kind(),
            }
            .into()),
        }
    }
}

impl FromIterator<Entry> for Entries {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Entries {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A source's complete description of its XML
#[derive(Clone, Debug, PartialEq)]
pub enum Meta {
    /// Finished markup, used as-is
    Xml(String),
    /// A hand-built tree, rendered as-is
    Tree(Element),
    /// A container whose single entry names the root element
    Entries(Entries),
    /// Loose input, normalized when rendered
    Value(Value),
}

/// What a [`Meta`] boils down to once its shape has been checked
#[derive(Debug)]
pub enum Description<'m> {
    Markup(String),
    Entries(Cow<'m, Entries>),
}

impl Meta {
    /// Check the top-level shape. `source_type` names the object the
    /// description came from, for the error message.
    pub fn normalize(&self, source_type: &str) -> Result<Description<'_>> {
        let invalid = |found: String| -> Error {
            ErrorKind::InvalidFormat {
                source_type: source_type.to_owned(),
                found,
            }
            .into()
        };
        let single = |len: usize| -> Result<()> {
            if len == 1 {
                Ok(())
            } else {
                Err(invalid(format!("a container with {len} entries")))
            }
        };

        match self {
            Self::Xml(markup) => Ok(Description::Markup(markup.clone())),
            Self::Tree(element) => Ok(Description::Markup(element.outer_xml())),
            Self::Entries(entries) => {
                single(entries.len())?;
                Ok(Description::Entries(Cow::Borrowed(entries)))
            }
            Self::Value(Value::String(markup)) => Ok(Description::Markup(markup.clone())),
            Self::Value(value @ Value::Array(items)) => {
                single(items.len())?;
                Ok(Description::Entries(Cow::Owned(Entries::from_value(value)?)))
            }
            Self::Value(value @ Value::Object(map)) => {
                single(map.len())?;
                Ok(Description::Entries(Cow::Owned(Entries::from_value(value)?)))
            }
            Self::Value(other) => Err(invalid(other.kind().to_owned())),
        }
    }
}

impl From<Entries> for Meta {
    fn from(entries: Entries) -> Self {
        Self::Entries(entries)
    }
}

impl From<Element> for Meta {
    fn from(element: Element) -> Self {
        Self::Tree(element)
    }
}

impl From<Value> for Meta {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for Meta {
    fn from(markup: &str) -> Self {
        Self::Xml(markup.to_owned())
    }
}

impl From<String> for Meta {
    fn from(markup: String) -> Self {
        Self::Xml(markup)
    }
}
