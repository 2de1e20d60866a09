//! Orchestration: from a source and its description to finished markup

use crate::builder::TreeBuilder;
use crate::config::{Config, Depth};
use crate::element::Element;
use crate::error::{ErrorKind, Result};
use crate::meta::{Description, Meta};
use crate::source::Source;
use std::fmt;
use tracing::{debug, instrument};

/// Name of the throwaway node the root entry is built into
const WRAPPER: &str = "xmeta";

/// Renders one source to XML.
///
/// The description is either supplied up front or requested from the source
/// through [`Source::describe`]. The markup is rendered on construction and
/// again on every [`Converter::refresh`], so a source whose state changed can
/// be re-rendered without building a new converter.
pub struct Converter<'s> {
    source: &'s dyn Source,
    meta: Option<Meta>,
    config: Config,
    xml: String,
}

impl<'s> Converter<'s> {
    pub fn new(source: &'s dyn Source, meta: Option<Meta>) -> Result<Self> {
        Self::with_config(source, meta, Config::default())
    }

    pub fn with_config(source: &'s dyn Source, meta: Option<Meta>, config: Config) -> Result<Self> {
        let mut converter = Self {
            source,
            meta,
            config,
            xml: String::new(),
        };
        converter.refresh()?;
        Ok(converter)
    }

    /// Render again from the source's current state
    #[instrument(skip(self), fields(source = %self.source.type_name()))]
    pub fn refresh(&mut self) -> Result<&str> {
        let described;
        let meta = match &self.meta {
            Some(meta) => meta,
            None => {
                described = self.source.describe().ok_or_else(|| {
                    ErrorKind::MissingDescription {
                        source_type: self.source.type_name().into_owned(),
                    }
                })?;
                &described
            }
        };

        let mut depth = Depth::new(self.config);
        self.xml = render(self.source, meta, self.config, &mut depth)?;
        debug!(len = self.xml.len(), "rendered");
        Ok(&self.xml)
    }

    pub fn as_str(&self) -> &str {
        &self.xml
    }

    pub fn into_string(self) -> String {
        self.xml
    }
}

impl fmt::Display for Converter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.xml)
    }
}

impl fmt::Debug for Converter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("source", &self.source.type_name())
            .field("config", &self.config)
            .field("xml", &self.xml)
            .finish()
    }
}

/// Render `meta` against `source`. Finished markup and hand-built trees are
/// taken as they are; a single-entry description is built into a wrapper
/// node whose inner XML is then exactly the declared root.
pub(crate) fn render(
    source: &dyn Source,
    meta: &Meta,
    config: Config,
    depth: &mut Depth,
) -> Result<String> {
    match meta.normalize(&source.type_name())? {
        Description::Markup(xml) => Ok(xml),
        Description::Entries(entries) => {
            debug!(source = %source.type_name(), depth = depth.current(), "building tree");
            let wrapper = TreeBuilder::new(source, config, depth)
                .build(Element::new(WRAPPER), &entries)?;
            Ok(wrapper.inner_xml())
        }
    }
}
