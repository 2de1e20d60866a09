//! XML element tree and its serialization

use crate::error::{ErrorKind, Result};
use indexmap::IndexMap;
use std::fmt;

/// Declaration the convenience layer puts in front of rendered documents
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// XML element
///
/// An element with no text and no children renders self-closing. Empty text
/// (`Some("")`) is still text and forces the full open/close form.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    name: String,
    text: Option<String>,
    /// `None` marks a valueless attribute
    attributes: IndexMap<String, Option<String>>,
    children: Vec<Self>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: None,
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Like [`Element::new`], rejecting an empty name
    pub fn try_new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(ErrorKind::EmptyName.into());
        }
        Ok(Self::new(name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<&mut Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(ErrorKind::EmptyName.into());
        }
        self.name = name;
        Ok(self)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: Option<String>) -> &mut Self {
        self.text = text;
        self
    }

    /// Append to the text, starting it if there is none yet
    pub fn append_text(&mut self, text: &str) -> &mut Self {
        self.text.get_or_insert_with(String::new).push_str(text);
        self
    }

    pub fn attributes(&self) -> &IndexMap<String, Option<String>> {
        &self.attributes
    }

    /// Value of a named attribute; `Some(None)` for a valueless one
    pub fn attribute(&self, name: &str) -> Option<Option<&str>> {
        self.attributes.get(name).map(Option::as_deref)
    }

    /// Set an attribute, replacing any earlier value under the same name
    pub fn set_attribute(
        &mut self,
        name: impl Into<String>,
        value: Option<String>,
    ) -> Result<&mut Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(ErrorKind::EmptyName.into());
        }
        self.attributes.insert(name, value);
        Ok(self)
    }

    pub fn set_attributes<I, K>(&mut self, attributes: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, Option<String>)>,
        K: Into<String>,
    {
        for (name, value) in attributes {
            self.set_attribute(name, value)?;
        }
        Ok(self)
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<Option<String>> {
        self.attributes.shift_remove(name)
    }

    pub fn children(&self) -> &[Self] {
        &self.children
    }

    pub fn add_child(&mut self, child: Self) -> &mut Self {
        self.children.push(child);
        self
    }

    pub fn remove_child(&mut self, index: usize) -> Option<Self> {
        (index < self.children.len()).then(|| self.children.remove(index))
    }

    /// Text followed by every child's outer XML
    pub fn inner_xml(&self) -> String {
        let mut out = String::new();
        self.write_inner(&mut out);
        out
    }

    /// The element itself, self-closing when it has neither text nor children
    pub fn outer_xml(&self) -> String {
        let mut out = String::new();
        self.write_outer(&mut out);
        out
    }

    fn write_inner(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.write_outer(out);
        }
    }

    fn write_outer(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            if let Some(value) = value {
                out.push_str("=\"");
                escape_attribute(value, out);
                out.push('"');
            }
        }

        if self.text.is_none() && self.children.is_empty() {
            out.push_str("/>");
            return;
        }

        out.push('>');
        self.write_inner(out);
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.outer_xml())
    }
}

/// Only the delimiting quote is escaped; everything else passes through.
fn escape_attribute(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_closing() {
        assert_eq!(Element::new("dog").outer_xml(), "<dog/>");
    }

    #[test]
    fn test_empty_text_is_not_self_closing() {
        let mut dog = Element::new("dog");
        dog.set_text(Some(String::new()));
        assert_eq!(dog.outer_xml(), "<dog></dog>");
    }

    #[test]
    fn test_attributes_in_insertion_order() {
        let mut dog = Element::new("dog");
        dog.set_attribute("id", Some("5".to_string())).unwrap();
        dog.set_attribute("hau", None).unwrap();
        dog.set_attribute("type", Some("animal".to_string())).unwrap();
        assert_eq!(dog.outer_xml(), r#"<dog id="5" hau type="animal"/>"#);
    }

    #[test]
    fn test_attribute_last_write_wins() {
        let mut dog = Element::new("dog");
        dog.set_attribute("id", Some("1".to_string())).unwrap();
        dog.set_attribute("name", None).unwrap();
        dog.set_attribute("id", None).unwrap();
        assert_eq!(dog.attribute("id"), Some(None));
        assert_eq!(dog.outer_xml(), "<dog id name/>");
    }

    #[test]
    fn test_attribute_quote_escaping() {
        let mut dog = Element::new("dog");
        dog.set_attribute("says", Some(r#"a "hau" \ b"#.to_string()))
            .unwrap();
        assert_eq!(dog.outer_xml(), r#"<dog says="a &quot;hau&quot; \ b"/>"#);
    }

    #[test]
    fn test_empty_names_rejected() {
        let mut dog = Element::new("dog");
        assert_eq!(
            dog.set_attribute("", None).unwrap_err().kind(),
            &ErrorKind::EmptyName
        );
        assert!(dog.set_name("").is_err());
        assert!(Element::try_new("").is_err());
    }

    #[test]
    fn test_inner_and_outer() {
        let mut person = Element::new("person");
        let mut name = Element::new("name");
        name.set_text(Some("John".to_string()));
        person.add_child(name).add_child(Element::new("alive"));
        person.append_text("<!-- x -->");

        assert_eq!(person.inner_xml(), "<!-- x --><name>John</name><alive/>");
        assert_eq!(
            person.to_string(),
            "<person><!-- x --><name>John</name><alive/></person>"
        );
    }

    #[test]
    fn test_remove_child_out_of_range() {
        let mut person = Element::new("person");
        person.add_child(Element::new("name"));
        assert!(person.remove_child(3).is_none());
        let removed = person.remove_child(0).unwrap();
        assert_eq!(removed.name(), "name");
        assert_eq!(person.outer_xml(), "<person/>");
    }
}
