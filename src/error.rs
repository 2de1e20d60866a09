//! Error types for xmeta
//!
//! Every failure is structural: a malformed description, a reference that
//! does not resolve, or a depth limit hit while embedding. Rendering stops at
//! the first one and no partial XML is returned.

use std::fmt;
use thiserror::Error;

/// Error kind for detailed categorization
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    #[error(
        "description of {source_type} must be xml, an element or a container with exactly one entry, found {found}"
    )]
    InvalidFormat {
        source_type: String,
        found: String,
    },

    #[error("expected array, string or describable key, found {found}")]
    InvalidKey { found: &'static str },

    #[error("expected string, null or boolean attribute value, found {found}")]
    InvalidAttributeValue { found: &'static str },

    #[error("expected string, null, boolean or array element value, found {found}")]
    InvalidElementValue { found: &'static str },

    #[error("attribute and element names must not be empty")]
    EmptyName,

    #[error("no description supplied and {source_type} does not describe itself")]
    MissingDescription { source_type: String },

    #[error("cannot resolve `{step}` of reference `{reference}`")]
    UnresolvedReference { reference: String, step: String },

    #[error("reference `{reference}` resolved to {found}, which has no text form")]
    NotTextual {
        reference: String,
        found: &'static str,
    },

    #[error("max depth exceeded: {max}")]
    MaxDepthExceeded { max: usize },

    #[error("{source_type} describes itself, convert it with to_xml")]
    DescribableSource { source_type: String },

    #[error("cannot set a field on {found}, only on an object")]
    NotAnObject { found: &'static str },

    #[error("invalid json: {0}")]
    Json(String),
}

/// Main error type for xmeta
#[derive(Error, Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    path: Vec<String>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            path: Vec::new(),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Element names leading from the root to the failing entry
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Record that the error happened inside element `name`
    pub fn within(mut self, name: &str) -> Self {
        self.path.insert(0, name.to_owned());
        self
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.path.is_empty() {
            write!(f, " (at {})", self.path.join("/"))?;
        }
        Ok(())
    }
}

/// Result type alias for xmeta
pub type Result<T> = std::result::Result<T, Error>;
