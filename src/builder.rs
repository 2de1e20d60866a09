//! The transformer: applies a description to an element, entry by entry

use crate::config::{Config, Depth};
use crate::converter;
use crate::element::Element;
use crate::error::{ErrorKind, Result};
use crate::meta::{Entries, Entry, Key, MetaValue};
use crate::resolve::{self, Resolved};
use crate::source::Source;
use tracing::trace;

/// Builds element trees from descriptions resolved against one source.
///
/// Entries apply in order, which is observable: a later attribute replaces an
/// earlier one with the same name and children appear in entry order.
pub struct TreeBuilder<'a> {
    source: &'a dyn Source,
    config: Config,
    depth: &'a mut Depth,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(source: &'a dyn Source, config: Config, depth: &'a mut Depth) -> Self {
        Self {
            source,
            config,
            depth,
        }
    }

    /// Apply every entry of `entries` to `node` and hand it back
    pub fn build(&mut self, mut node: Element, entries: &Entries) -> Result<Element> {
        self.apply(&mut node, entries)?;
        Ok(node)
    }

    fn apply(&mut self, node: &mut Element, entries: &Entries) -> Result<()> {
        for entry in entries {
            self.apply_entry(node, entry)?;
        }
        Ok(())
    }

    fn apply_entry(&mut self, node: &mut Element, entry: &Entry) -> Result<()> {
        trace!(parent = node.name(), key = ?entry.key, "applying entry");
        match &entry.key {
            Key::Merge(entries) => self.descend(|builder| builder.apply(node, entries)),
            Key::Embed(source) => self.embed(node, source.as_ref()),
            Key::Attribute(name) => self.attribute(node, name, &entry.value),
            Key::Raw(markup) => {
                self.raw_append(node, markup);
                Ok(())
            }
            Key::Element(name) => self
                .element(node, name, &entry.value)
                .map_err(|e| e.within(name)),
        }
    }

    fn attribute(&mut self, node: &mut Element, name: &str, value: &MetaValue) -> Result<()> {
        match value {
            MetaValue::Text(reference) => {
                let text = self.text(reference)?;
                node.set_attribute(name, Some(text))?;
            }
            MetaValue::Flag => {
                node.set_attribute(name, None)?;
            }
            MetaValue::Omit => {}
            MetaValue::Nested(_) => {
                return Err(ErrorKind::InvalidAttributeValue {
                    found: value.kind(),
                }
                .into())
            }
        }
        Ok(())
    }

    fn element(&mut self, node: &mut Element, name: &str, value: &MetaValue) -> Result<()> {
        match value {
            MetaValue::Text(reference) => {
                let mut child = Element::try_new(name)?;
                child.set_text(Some(self.text(reference)?));
                node.add_child(child);
            }
            MetaValue::Flag => {
                node.add_child(Element::try_new(name)?);
            }
            MetaValue::Omit => {}
            MetaValue::Nested(entries) => {
                let mut child = Element::try_new(name)?;
                self.descend(|builder| builder.apply(&mut child, entries))?;
                node.add_child(child);
            }
        }
        Ok(())
    }

    /// Splice markup into `node`'s body without opening an element
    pub fn raw_append(&mut self, node: &mut Element, markup: &str) {
        node.append_text(markup);
    }

    /// Append `source`'s own rendering to `node`'s text. Repeated embeds
    /// accumulate in entry order.
    pub fn embed(&mut self, node: &mut Element, source: &dyn Source) -> Result<()> {
        let xml = self.render_embedded(source)?;
        node.append_text(&xml);
        Ok(())
    }

    fn text(&mut self, reference: &str) -> Result<String> {
        match resolve::resolve(self.source, reference)? {
            Resolved::Text(text) => Ok(text),
            Resolved::Embed(source) => self.render_embedded(source.as_ref()),
        }
    }

    fn render_embedded(&mut self, source: &dyn Source) -> Result<String> {
        let meta = source
            .describe()
            .ok_or_else(|| ErrorKind::MissingDescription {
                source_type: source.type_name().into_owned(),
            })?;
        let config = self.config;
        self.descend(|builder| converter::render(source, &meta, config, builder.depth))
    }

    fn descend<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.depth.enter()?;
        let result = f(self);
        self.depth.exit();
        result
    }
}
