//! xmeta: render XML from declarative meta descriptions
//!
//! A description is a small tree of entries saying which elements and
//! attributes to emit and where their values come from:
//! - `@name` keys are attributes, other keys are elements
//! - string values are references into the source (`dot.notation` works),
//!   or literals when prefixed with `=`
//! - `true`/null give valueless attributes and self-closing elements, `false`
//!   leaves the entry out
//! - nested descriptions open child elements; in key position they merge
//!   into the current element
//!
//! # Examples
//! ```
//! use xmeta::{Converter, Entries, Value};
//!
//! # fn main() -> xmeta::Result<()> {
//! let dog: Value = [("name", "Gapa")].into_iter().collect();
//! let meta = Entries::new().with(
//!     "dog",
//!     Entries::new().with("@type", "=animal").with("name", "name"),
//! );
//! let xml = Converter::new(&dog, Some(meta.into()))?;
//! assert_eq!(xml.as_str(), r#"<dog type="animal"><name>Gapa</name></dog>"#);
//! # Ok(())
//! # }
//! ```

use tracing::instrument;

pub mod analyse;
pub mod builder;
pub mod config;
pub mod converter;
pub mod element;
pub mod error;
#[cfg(feature = "json")]
pub mod json;
pub mod meta;
pub mod resolve;
pub mod source;
pub mod value;

// Re-exports
pub use analyse::{analyse, DEFAULT_ROOT};
pub use builder::TreeBuilder;
pub use config::{Config, DEFAULT_MAX_DEPTH};
pub use converter::Converter;
pub use element::{Element, XML_DECLARATION};
pub use error::{Error, ErrorKind, Result};
#[cfg(feature = "json")]
pub use json::{from_json_slice, from_json_str};
pub use meta::{Entries, Entry, Key, Meta, MetaValue};
pub use source::{SharedSource, Source};
pub use value::Value;

/// Render `value` as a complete document.
///
/// Without `meta`, a value that describes itself is asked for its
/// description; any other value is described automatically under a
/// `result` root.
#[instrument(skip_all)]
pub fn to_xml(value: &Value, meta: Option<Meta>) -> Result<String> {
    let meta = meta
        .or_else(|| value.describe())
        .unwrap_or_else(|| analyse(value, DEFAULT_ROOT));
    document(value, Some(meta))
}

/// Render plain data as a complete document rooted at `root_name`.
///
/// Values that describe themselves are rejected; use [`to_xml`] for them.
#[instrument(skip(value))]
pub fn to_xml_as(value: &Value, root_name: &str) -> Result<String> {
    if value.describe().is_some() {
        return Err(ErrorKind::DescribableSource {
            source_type: value.type_name().into_owned(),
        }
        .into());
    }
    document(value, Some(analyse(value, root_name)))
}

fn document(source: &dyn Source, meta: Option<Meta>) -> Result<String> {
    let converter = Converter::new(source, meta)?;
    Ok(format!("{XML_DECLARATION}{converter}"))
}

/// Adds document rendering to every [`Source`]
pub trait ToXml: Source {
    /// Render with the source's own description
    fn to_xml(&self) -> Result<String>;

    /// Render with an explicit description
    fn to_xml_with(&self, meta: Meta) -> Result<String>;
}

impl<S: Source> ToXml for S {
    fn to_xml(&self) -> Result<String> {
        document(self, None)
    }

    fn to_xml_with(&self, meta: Meta) -> Result<String> {
        document(self, Some(meta))
    }
}
