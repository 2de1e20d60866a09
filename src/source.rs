//! The capability a source object offers to the renderer

use crate::error::{ErrorKind, Result};
use crate::meta::Meta;
use crate::value::Value;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::borrow::Cow;
use std::sync::Arc;

/// An object descriptions are resolved against.
///
/// `field` answers one step of a dotted reference such as `dot.notation`.
/// Types that know their own XML shape also implement `describe`; a type
/// that doesn't can only be rendered with an explicitly supplied [`Meta`].
///
/// Sources are `Send + Sync` so descriptions holding them, and the values
/// behind a [`SharedSource`], can cross threads.
pub trait Source: Send + Sync {
    /// Fetch the named field, entry or property
    fn field(&self, name: &str) -> Option<Value>;

    /// The object's own description, if it has one
    fn describe(&self) -> Option<Meta> {
        None
    }

    /// Identity used in error messages
    fn type_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }
}

/// A value whose state can change between renders.
///
/// Clones share the same underlying value, so a converter holding one clone
/// picks up writes made through another on its next `refresh`.
#[derive(Debug, Clone, Default)]
pub struct SharedSource {
    inner: Arc<RwLock<Value>>,
}

impl SharedSource {
    pub fn new(value: Value) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Value> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Value> {
        self.inner.write()
    }

    /// Replace one top-level field, returning the previous value. Fails
    /// when the shared value is not an object.
    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) -> Result<Option<Value>> {
        let mut guard = self.inner.write();
        let found = guard.kind();
        let map = guard
            .as_object_mut()
            .ok_or(ErrorKind::NotAnObject { found })?;
        Ok(map.insert(name.into(), value.into()))
    }
}

impl Source for SharedSource {
    fn field(&self, name: &str) -> Option<Value> {
        self.inner.read().field(name)
    }

    fn describe(&self) -> Option<Meta> {
        self.inner.read().describe()
    }

    fn type_name(&self) -> Cow<'_, str> {
        Cow::Owned(self.inner.read().type_name().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dog;

    impl Source for Dog {
        fn field(&self, name: &str) -> Option<Value> {
            (name == "name").then(|| Value::from("Gapa"))
        }
    }

    #[test]
    fn test_default_type_name() {
        assert!(Dog.type_name().ends_with("Dog"));
        assert!(Dog.describe().is_none());
    }

    #[test]
    fn test_shared_source_sees_writes() {
        let shared = SharedSource::new([("name", "Gapa")].into_iter().collect());
        let other = shared.clone();
        assert_eq!(
            other.set("name", "Burek").unwrap(),
            Some(Value::from("Gapa"))
        );
        assert_eq!(shared.field("name"), Some(Value::from("Burek")));
    }

    #[test]
    fn test_set_on_scalar_fails() {
        let shared = SharedSource::new(Value::from(5));
        let err = shared.set("name", "Gapa").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::NotAnObject { found: "number" });
    }

    #[test]
    fn test_type_name_follows_inner_value() {
        assert_eq!(SharedSource::new(Value::Null).type_name(), "null");
        let shared = SharedSource::new(Value::source(Dog));
        assert!(shared.type_name().ends_with("Dog"));
    }

    #[test]
    fn test_shared_across_threads() {
        let shared = SharedSource::new([("count", 0)].into_iter().collect());
        let writer = shared.clone();
        std::thread::spawn(move || writer.set("count", 1).map(|_| ()))
            .join()
            .unwrap()
            .unwrap();
        assert_eq!(shared.field("count"), Some(Value::from(1)));
    }
}
