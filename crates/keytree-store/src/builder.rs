//! Builder for stores with declared permissions.

use keytree_perms::{Permission, SharedRegistry};

use crate::error::Result;
use crate::path::DEFAULT_MAX_DEPTH;
use crate::store::Store;
use crate::value::{Object, Value};

/// Builds a [`Store`] seeded with entries, then locked down by its
/// declarations and default policy.
///
/// ```rust
/// use keytree_store::{Permission, StoreBuilder};
///
/// let mut store = StoreBuilder::new()
///     .declare("version", Permission::Read)
///     .entry("version", "1.0")
///     .build()
///     .unwrap();
///
/// assert_eq!(store.read("version").unwrap().unwrap().as_str(), Some("1.0"));
/// assert!(store.write("version", "2.0").is_err());
/// ```
#[derive(Debug, Default)]
pub struct StoreBuilder {
    default_policy: Permission,
    max_depth: Option<usize>,
    registry: Option<SharedRegistry>,
    declarations: Vec<(String, Permission)>,
    entries: Object,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Policy of undeclared keys.
    pub fn default_policy(mut self, policy: Permission) -> Self {
        self.default_policy = policy;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Consult an existing registry instead of a fresh one.
    pub fn registry(mut self, registry: SharedRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Declare the permission of a top-level key.
    pub fn declare(mut self, key: impl Into<String>, permission: Permission) -> Self {
        self.declarations.push((key.into(), permission));
        self
    }

    /// Queue an entry to be written at `path` on build.
    pub fn entry(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(path.into(), value.into());
        self
    }

    /// Create the store, write the entries, then apply the default policy
    /// and the declarations.
    ///
    /// Entries are written under a `rw` policy, so a key can be seeded and
    /// declared read-only in the same build.
    pub fn build(self) -> Result<Store> {
        let mut store = Store::with_registry(self.registry.unwrap_or_default());
        store.set_max_depth(self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH));
        store.write_entries(self.entries)?;

        store.set_default_policy(self.default_policy);
        for (key, permission) in self.declarations {
            store.declare(key, permission);
        }
        Ok(store)
    }
}
