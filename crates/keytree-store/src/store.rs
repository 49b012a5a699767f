//! The recursive store node.
//!
//! A [`Store`] maps keys to [`Value`]s and routes colon paths through its
//! nested stores one segment at a time, checking the effective permission
//! of each key it touches.
//!
//! Children are owned exclusively by their parent. A store only acquires a
//! child through auto-vivification, normalization of a plain object, or by
//! being handed an owned `Store` value, so a store can never contain itself.

use std::borrow::Cow;

use indexmap::IndexMap;
use keytree_perms::{Access, Permission, SharedRegistry, StoreId};
use tracing::{debug, trace};

use crate::error::{Result, StoreError};
use crate::path::{self, DEFAULT_MAX_DEPTH};
use crate::value::{Object, Value};

/// A node of the key-value tree.
///
/// Cloning copies the slots deeply. Every store in the copy gets a fresh
/// [`StoreId`] and its own copy of the source's declarations, so declaring
/// on the copy never changes the source. Dropping a store forgets its
/// declarations.
#[derive(Debug)]
pub struct Store {
    id: StoreId,
    default_policy: Permission,
    max_depth: usize,
    slots: IndexMap<String, Value>,
    registry: SharedRegistry,
}

impl Store {
    /// Create an empty store with its own registry and a `rw` default policy.
    pub fn new() -> Self {
        Self::with_registry(SharedRegistry::new())
    }

    /// Create an empty store that consults `registry`.
    pub fn with_registry(registry: SharedRegistry) -> Self {
        Self {
            id: StoreId::next(),
            default_policy: Permission::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            slots: IndexMap::new(),
            registry,
        }
    }

    /// A fresh empty child sharing this store's registry and depth limit.
    fn child(&self) -> Store {
        let mut child = Store::with_registry(self.registry.clone());
        child.max_depth = self.max_depth;
        child
    }

    pub fn id(&self) -> StoreId {
        self.id
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    pub fn default_policy(&self) -> Permission {
        self.default_policy
    }

    /// Change the policy of undeclared keys. Declared keys are unaffected.
    pub fn set_default_policy(&mut self, policy: Permission) {
        self.default_policy = policy;
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Limit the number of segments accepted in a path. Applies to children
    /// created after the change.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Permissions
    // ─────────────────────────────────────────────────────────────────────────

    /// Declare the permission of one of this store's keys.
    ///
    /// Returns the previous declaration for the key, if any.
    pub fn declare(
        &mut self,
        key: impl Into<String>,
        permission: Permission,
    ) -> Option<Permission> {
        self.registry.declare(self.id, key, permission)
    }

    /// The declared permission of `key`, if any.
    pub fn declaration(&self, key: &str) -> Option<Permission> {
        self.registry.lookup(self.id, key)
    }

    /// The declared permission of `key`, or the default policy.
    pub fn effective_permission(&self, key: &str) -> Permission {
        self.declaration(key).unwrap_or(self.default_policy)
    }

    pub fn allowed_to_read(&self, key: &str) -> bool {
        self.effective_permission(key).can_read()
    }

    pub fn allowed_to_write(&self, key: &str) -> bool {
        self.effective_permission(key).can_write()
    }

    fn check(&self, key: &str, access: Access) -> Result<()> {
        if self.effective_permission(key).allows(access) {
            return Ok(());
        }
        debug!(store = %self.id, key, %access, "access denied");
        Err(StoreError::denied(key, access))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────────

    /// Read the value at `path`.
    ///
    /// Returns `Ok(None)` when the path does not resolve: the key is missing,
    /// the path is empty, or a hop lands on something that is not a store.
    /// A producer at the terminal key is invoked and its result returned.
    pub fn read(&self, path: &str) -> Result<Option<Cow<'_, Value>>> {
        path::check_depth(path, self.max_depth)?;
        self.read_at(path)
    }

    fn read_at(&self, path: &str) -> Result<Option<Cow<'_, Value>>> {
        if path.is_empty() {
            return Ok(None);
        }

        let (key, rest) = path::split_first(path);
        self.check(key, Access::Read)?;

        let Some(value) = self.slots.get(key) else {
            return Ok(None);
        };

        let Some(rest) = rest else {
            return Ok(Some(resolve(value)));
        };

        match value {
            Value::Store(child) => child.read_at(rest),
            Value::Producer(producer) => {
                trace!(store = %self.id, key, "invoking producer mid-path");
                match producer.produce() {
                    Value::Store(produced) => {
                        let found = produced.read_at(rest)?.map(Cow::into_owned);
                        Ok(found.map(Cow::Owned))
                    }
                    _ => Ok(None),
                }
            }
            _ => Ok(None),
        }
    }

    /// Mutable access to the store at `path`, checking read permission on
    /// every hop. The empty path addresses `self`.
    pub fn nested_mut(&mut self, path: &str) -> Result<Option<&mut Store>> {
        path::check_depth(path, self.max_depth)?;
        self.nested_at(path)
    }

    fn nested_at(&mut self, path: &str) -> Result<Option<&mut Store>> {
        if path.is_empty() {
            return Ok(Some(self));
        }

        let (key, rest) = path::split_first(path);
        self.check(key, Access::Read)?;

        match (self.slots.get_mut(key), rest) {
            (Some(Value::Store(child)), None) => Ok(Some(child.as_mut())),
            (Some(Value::Store(child)), Some(rest)) => child.nested_at(rest),
            _ => Ok(None),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Writes
    // ─────────────────────────────────────────────────────────────────────────

    /// Write `value` at `path`, returning the value it replaced.
    ///
    /// Missing intermediate keys are filled with empty stores. If an
    /// intermediate key holds something other than a store the write is
    /// dropped and `Ok(None)` is returned. The empty path is a no-op.
    pub fn write(&mut self, path: &str, value: impl Into<Value>) -> Result<Option<Value>> {
        self.write_value(path, value.into())
    }

    fn write_value(&mut self, path: &str, value: Value) -> Result<Option<Value>> {
        path::check_depth(path, self.max_depth)?;
        self.write_at(path, value)
    }

    fn write_at(&mut self, path: &str, value: Value) -> Result<Option<Value>> {
        if path.is_empty() {
            return Ok(None);
        }

        let (key, rest) = path::split_first(path);
        let Some(rest) = rest else {
            let normalized = self.convert_to_store(value)?;
            return self.set_key_value(key, normalized);
        };

        if !self.slots.contains_key(key) {
            trace!(store = %self.id, key, "auto-vivifying nested store");
            let child = self.child();
            self.slots.insert(key.to_string(), Value::from(child));
        }

        match self.slots.get_mut(key) {
            Some(Value::Store(child)) => child.write_at(rest, value),
            _ => {
                trace!(store = %self.id, key, "write through non-store value ignored");
                Ok(None)
            }
        }
    }

    /// Assign `value` to an own key, replacing whatever was there.
    pub fn set_key_value(&mut self, key: &str, value: Value) -> Result<Option<Value>> {
        self.check(key, Access::Write)?;
        Ok(self.slots.insert(key.to_string(), value))
    }

    /// Normalize a plain object into a nested store. Other values pass
    /// through unchanged.
    pub fn convert_to_store(&self, value: Value) -> Result<Value> {
        let Value::Object(map) = value else {
            return Ok(value);
        };

        trace!(store = %self.id, keys = map.len(), "normalizing object into store");
        let mut store = self.child();
        for (key, data) in map {
            store.write_value(&key, data)?;
        }
        Ok(Value::from(store))
    }

    /// Write every entry at the top level. Not atomic: a failure leaves
    /// earlier entries written.
    pub fn write_entries(&mut self, entries: Object) -> Result<()> {
        for (key, value) in entries {
            self.write_value(&key, value)?;
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Enumeration
    // ─────────────────────────────────────────────────────────────────────────

    /// Readable own entries, in key order.
    ///
    /// Nested stores are replaced by their own `entries()`. Producers are
    /// copied, not invoked.
    pub fn entries(&self) -> Object {
        self.slots
            .iter()
            .filter(|(key, _)| self.allowed_to_read(key))
            .map(|(key, value)| {
                let value = match value {
                    Value::Store(child) => Value::Object(child.entries()),
                    other => other.clone(),
                };
                (key.clone(), value)
            })
            .collect()
    }

    /// Whether an own key is present, regardless of permission.
    pub fn contains_key(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    /// Own keys in order, regardless of permission.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Invoke a producer, or borrow anything else.
fn resolve(value: &Value) -> Cow<'_, Value> {
    match value {
        Value::Producer(producer) => Cow::Owned(producer.produce()),
        other => Cow::Borrowed(other),
    }
}

impl Clone for Store {
    fn clone(&self) -> Self {
        let copy = Store {
            id: StoreId::next(),
            default_policy: self.default_policy,
            max_depth: self.max_depth,
            // Child stores go through this impl as well.
            slots: self.slots.clone(),
            registry: self.registry.clone(),
        };
        for (key, permission) in self.registry.declarations(self.id) {
            copy.registry.declare(copy.id, key, permission);
        }
        copy
    }
}

impl Drop for Store {
    fn drop(&mut self) {
        self.registry.forget_owner(self.id);
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Store {
    /// Structural equality of slots and default policy. Identity and
    /// declarations are not compared.
    fn eq(&self, other: &Self) -> bool {
        self.default_policy == other.default_policy && self.slots == other.slots
    }
}
