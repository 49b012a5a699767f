//! PathStore trait: the abstract contract of a path-addressed store.
//!
//! [`Store`] is the implementation; the trait lets collaborators accept any
//! path-addressed store without naming the concrete type.

use std::borrow::Cow;

use keytree_perms::Permission;

use crate::error::Result;
use crate::store::Store;
use crate::value::{Object, Primitive, Value};

/// A store addressed by colon paths with per-key permissions.
pub trait PathStore {
    /// Policy of keys without a declaration.
    fn default_policy(&self) -> Permission;

    fn allowed_to_read(&self, key: &str) -> bool;

    fn allowed_to_write(&self, key: &str) -> bool;

    /// Read the value at `path`; `Ok(None)` when the path does not resolve.
    fn read(&self, path: &str) -> Result<Option<Cow<'_, Value>>>;

    /// Write `value` at `path`, returning the replaced value.
    fn write(&mut self, path: &str, value: Value) -> Result<Option<Value>>;

    /// Write every entry at the top level, stopping at the first failure.
    fn write_entries(&mut self, entries: Object) -> Result<()>;

    /// Readable own entries with nested stores expanded.
    fn entries(&self) -> Object;
}

impl PathStore for Store {
    fn default_policy(&self) -> Permission {
        Store::default_policy(self)
    }

    fn allowed_to_read(&self, key: &str) -> bool {
        Store::allowed_to_read(self, key)
    }

    fn allowed_to_write(&self, key: &str) -> bool {
        Store::allowed_to_write(self, key)
    }

    fn read(&self, path: &str) -> Result<Option<Cow<'_, Value>>> {
        Store::read(self, path)
    }

    fn write(&mut self, path: &str, value: Value) -> Result<Option<Value>> {
        Store::write(self, path, value)
    }

    fn write_entries(&mut self, entries: Object) -> Result<()> {
        Store::write_entries(self, entries)
    }

    fn entries(&self) -> Object {
        Store::entries(self)
    }
}

/// Extension trait for common read patterns.
pub trait PathStoreExt: PathStore {
    /// The primitive at `path`; `None` if the path is absent or resolves to
    /// a non-primitive.
    fn read_primitive(&self, path: &str) -> Result<Option<Primitive>> {
        Ok(match self.read(path)?.as_deref() {
            Some(Value::Primitive(p)) => Some(p.clone()),
            _ => None,
        })
    }

    /// Whether `path` resolves. Invokes a producer at the terminal key.
    fn contains_path(&self, path: &str) -> Result<bool> {
        Ok(self.read(path)?.is_some())
    }
}

impl<S: PathStore + ?Sized> PathStoreExt for S {}
