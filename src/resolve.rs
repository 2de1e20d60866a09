//! Resolution of string references against a source

use crate::error::{ErrorKind, Result};
use crate::meta::LITERAL_MARKER;
use crate::source::Source;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// A string found in value position of a description
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reference<'r> {
    /// `=text`: used verbatim, the source is never consulted
    Literal(&'r str),
    /// `a.b.c`: looked up step by step
    Path(&'r str),
}

impl<'r> Reference<'r> {
    pub fn parse(reference: &'r str) -> Self {
        match reference.strip_prefix(LITERAL_MARKER) {
            Some(literal) => Self::Literal(literal),
            None => Self::Path(reference),
        }
    }
}

/// Outcome of resolving a reference
#[derive(Clone)]
pub enum Resolved {
    Text(String),
    /// A source that renders itself; the caller turns it into XML
    Embed(Arc<dyn Source>),
}

impl fmt::Debug for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Embed(source) => f.debug_tuple("Embed").field(&source.type_name()).finish(),
        }
    }
}

/// Resolve `reference` against `source`
pub fn resolve(source: &dyn Source, reference: &str) -> Result<Resolved> {
    match Reference::parse(reference) {
        Reference::Literal(text) => Ok(Resolved::Text(text.to_owned())),
        Reference::Path(path) => {
            let value = lookup(source, path)?;
            textual(value, path)
        }
    }
}

/// Walk a dotted path. Each step reads a field of the previous value, so
/// `dot.notation.example` works over objects, keyed containers and sources
/// alike. Field names may contain dots themselves: every split point is
/// tried, the shortest step first.
pub fn lookup(source: &dyn Source, path: &str) -> Result<Value> {
    walk(source, path).map_err(|step| {
        ErrorKind::UnresolvedReference {
            reference: path.to_owned(),
            step: step.to_owned(),
        }
        .into()
    })
}

/// On failure, returns the first step that could not be read
fn walk<'p>(source: &dyn Source, path: &'p str) -> std::result::Result<Value, &'p str> {
    let mut failed = None;
    for (step, rest) in splits(path) {
        let Some(value) = step_into(source, step) else {
            failed = failed.or(Some(step));
            continue;
        };
        match rest {
            None => return Ok(value),
            Some(rest) => match walk(&value, rest) {
                Ok(found) => return Ok(found),
                Err(step) => failed = failed.or(Some(step)),
            },
        }
    }
    Err(failed.unwrap_or(path))
}

/// `a.b.c` as `(a, b.c)`, `(a.b, c)`, `(a.b.c, -)`
fn splits(path: &str) -> impl Iterator<Item = (&str, Option<&str>)> {
    path.match_indices('.')
        .map(move |(at, _)| {
            let (step, rest) = path.split_at(at);
            (step, rest.strip_prefix('.'))
        })
        .chain(std::iter::once((path, None)))
}

fn step_into(source: &dyn Source, step: &str) -> Option<Value> {
    if step.is_empty() {
        return None;
    }
    source.field(step)
}

fn textual(value: Value, reference: &str) -> Result<Resolved> {
    if let Value::Source(source) = value {
        return Ok(Resolved::Embed(source));
    }
    value.to_text().map(Resolved::Text).ok_or_else(|| {
        ErrorKind::NotTextual {
            reference: reference.to_owned(),
            found: value.kind(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(resolved: Resolved) -> String {
        match resolved {
            Resolved::Text(text) => text,
            Resolved::Embed(source) => panic!("unexpected embed of {}", source.type_name()),
        }
    }

    fn source() -> Value {
        let notation: Value = [("example", "foo")].into_iter().collect();
        let dot: Value = [("notation", notation)].into_iter().collect();
        [
            ("dot", dot),
            ("no", Value::from(5)),
            ("ratio", Value::from(0.5)),
            ("name", Value::from("Gapa")),
            ("gone", Value::Null),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_reference_parse() {
        assert_eq!(Reference::parse("=animal"), Reference::Literal("animal"));
        assert_eq!(Reference::parse("name"), Reference::Path("name"));
        assert_eq!(Reference::parse("="), Reference::Literal(""));
    }

    #[test]
    fn test_literal_skips_source() {
        assert_eq!(text(resolve(&Value::Null, "=animal").unwrap()), "animal");
    }

    #[test]
    fn test_flat_and_dotted() {
        let source = source();
        assert_eq!(text(resolve(&source, "name").unwrap()), "Gapa");
        assert_eq!(text(resolve(&source, "dot.notation.example").unwrap()), "foo");
    }

    #[test]
    fn test_scalar_text_forms() {
        let source = source();
        assert_eq!(text(resolve(&source, "no").unwrap()), "5");
        assert_eq!(text(resolve(&source, "ratio").unwrap()), "0.5");
        assert_eq!(text(resolve(&source, "gone").unwrap()), "");
    }

    #[test]
    fn test_missing_step() {
        let err = resolve(&source(), "dot.missing.example").unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::UnresolvedReference {
                reference: "dot.missing.example".to_string(),
                step: "missing".to_string(),
            }
        );
    }

    #[test]
    fn test_step_through_leaf() {
        let err = resolve(&source(), "name.length").unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::UnresolvedReference { step, .. } if step == "length"
        ));
    }

    #[test]
    fn test_empty_steps() {
        assert!(resolve(&source(), "").is_err());
        assert!(resolve(&source(), "dot..example").is_err());
    }

    #[test]
    fn test_keys_with_dots() {
        let inner: Value = [("c", "deep")].into_iter().collect();
        let source: Value = [
            ("a.b", Value::from("x")),
            ("a", Value::from("plain")),
            ("x.y", inner),
        ]
        .into_iter()
        .collect();
        assert_eq!(text(resolve(&source, "a.b").unwrap()), "x");
        assert_eq!(text(resolve(&source, "x.y.c").unwrap()), "deep");
        let err = resolve(&source, "x.y.d").unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::UnresolvedReference { step, .. } if step == "x"
        ));
    }

    #[test]
    fn test_large_integers_are_exact() {
        let source: Value = [("id", Value::from(9_007_199_254_740_993_u64))]
            .into_iter()
            .collect();
        assert_eq!(text(resolve(&source, "id").unwrap()), "9007199254740993");
    }

    #[test]
    fn test_resolved_debug() {
        let resolved = resolve(&Value::Null, "=animal").unwrap();
        assert_eq!(format!("{resolved:?}"), r#"Text("animal")"#);
    }

    #[test]
    fn test_container_has_no_text() {
        let err = resolve(&source(), "dot.notation").unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::NotTextual {
                reference: "dot.notation".to_string(),
                found: "object",
            }
        );
    }
}
