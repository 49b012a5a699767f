//! Permission declarations.
//!
//! A declaration binds a [`Permission`] to one key of one store instance.
//! Keys without a declaration fall back to the owning store's default
//! policy; that fallback lives in the store, not here.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::permission::Permission;

static NEXT_STORE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a store instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreId(u64);

impl StoreId {
    /// Allocate a fresh identity.
    pub fn next() -> Self {
        Self(NEXT_STORE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric identity.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "store#{}", self.0)
    }
}

/// Declared permissions indexed by owner and key.
#[derive(Debug, Default, Clone)]
pub struct PermissionRegistry {
    /// owner -> (key -> permission). Keys are ordered for stable listings.
    by_owner: HashMap<StoreId, BTreeMap<String, Permission>>,
}

impl PermissionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the permission of `key` on `owner`.
    ///
    /// Redeclaration overwrites; the previous declaration is returned.
    pub fn declare(
        &mut self,
        owner: StoreId,
        key: impl Into<String>,
        permission: Permission,
    ) -> Option<Permission> {
        self.by_owner
            .entry(owner)
            .or_default()
            .insert(key.into(), permission)
    }

    /// The declared permission of `key` on `owner`, if any.
    pub fn lookup(&self, owner: StoreId, key: &str) -> Option<Permission> {
        self.by_owner
            .get(&owner)
            .and_then(|keys| keys.get(key))
            .copied()
    }

    /// Remove a declaration, returning it.
    pub fn forget(&mut self, owner: StoreId, key: &str) -> Option<Permission> {
        let keys = self.by_owner.get_mut(&owner)?;
        let removed = keys.remove(key);
        if keys.is_empty() {
            self.by_owner.remove(&owner);
        }
        removed
    }

    /// Remove every declaration of an owner, returning how many there were.
    pub fn forget_owner(&mut self, owner: StoreId) -> usize {
        self.by_owner
            .remove(&owner)
            .map_or(0, |keys| keys.len())
    }

    /// All declarations of an owner, ordered by key.
    pub fn declarations(&self, owner: StoreId) -> Vec<(String, Permission)> {
        self.by_owner
            .get(&owner)
            .map(|keys| keys.iter().map(|(k, p)| (k.clone(), *p)).collect())
            .unwrap_or_default()
    }

    /// Total number of declarations across all owners.
    pub fn len(&self) -> usize {
        self.by_owner.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_owner.is_empty()
    }
}

/// Cloneable handle to a registry shared by every store of a tree.
///
/// Locks are taken for a single lookup or declaration only.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<PermissionRegistry>>,
}

impl SharedRegistry {
    /// Create a handle to a fresh, empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing registry.
    pub fn from_registry(registry: PermissionRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    pub fn declare(
        &self,
        owner: StoreId,
        key: impl Into<String>,
        permission: Permission,
    ) -> Option<Permission> {
        self.inner.write().declare(owner, key, permission)
    }

    pub fn lookup(&self, owner: StoreId, key: &str) -> Option<Permission> {
        self.inner.read().lookup(owner, key)
    }

    pub fn forget(&self, owner: StoreId, key: &str) -> Option<Permission> {
        self.inner.write().forget(owner, key)
    }

    pub fn forget_owner(&self, owner: StoreId) -> usize {
        self.inner.write().forget_owner(owner)
    }

    pub fn declarations(&self, owner: StoreId) -> Vec<(String, Permission)> {
        self.inner.read().declarations(owner)
    }

    /// Copy of the current registry contents.
    pub fn snapshot(&self) -> PermissionRegistry {
        self.inner.read().clone()
    }

    /// Whether two handles point at the same registry.
    pub fn same_registry(&self, other: &SharedRegistry) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn permission() -> impl Strategy<Value = Permission> {
        prop::sample::select(Permission::ALL.to_vec())
    }

    #[test]
    fn test_declare_and_lookup() {
        let mut registry = PermissionRegistry::new();
        let owner = StoreId::next();

        assert_eq!(registry.lookup(owner, "name"), None);

        registry.declare(owner, "name", Permission::Read);
        assert_eq!(registry.lookup(owner, "name"), Some(Permission::Read));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_redeclare_overwrites() {
        let mut registry = PermissionRegistry::new();
        let owner = StoreId::next();

        assert_eq!(registry.declare(owner, "k", Permission::Read), None);
        assert_eq!(
            registry.declare(owner, "k", Permission::None),
            Some(Permission::Read)
        );
        assert_eq!(registry.lookup(owner, "k"), Some(Permission::None));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_declarations_are_per_owner() {
        let mut registry = PermissionRegistry::new();
        let a = StoreId::next();
        let b = StoreId::next();

        registry.declare(a, "key", Permission::Read);
        registry.declare(b, "key", Permission::Write);

        assert_eq!(registry.lookup(a, "key"), Some(Permission::Read));
        assert_eq!(registry.lookup(b, "key"), Some(Permission::Write));
    }

    #[test]
    fn test_forget() {
        let mut registry = PermissionRegistry::new();
        let owner = StoreId::next();

        registry.declare(owner, "k", Permission::Write);
        assert_eq!(registry.forget(owner, "k"), Some(Permission::Write));
        assert_eq!(registry.forget(owner, "k"), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_forget_owner() {
        let mut registry = PermissionRegistry::new();
        let gone = StoreId::next();
        let kept = StoreId::next();

        registry.declare(gone, "a", Permission::Read);
        registry.declare(gone, "b", Permission::None);
        registry.declare(kept, "a", Permission::Write);

        assert_eq!(registry.forget_owner(gone), 2);
        assert_eq!(registry.forget_owner(gone), 0);
        assert_eq!(registry.lookup(gone, "a"), None);
        assert_eq!(registry.lookup(kept, "a"), Some(Permission::Write));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_declarations_sorted() {
        let mut registry = PermissionRegistry::new();
        let owner = StoreId::next();

        registry.declare(owner, "b", Permission::Read);
        registry.declare(owner, "a", Permission::None);

        assert_eq!(
            registry.declarations(owner),
            vec![
                ("a".to_string(), Permission::None),
                ("b".to_string(), Permission::Read),
            ]
        );
        assert!(registry.declarations(StoreId::next()).is_empty());
    }

    #[test]
    fn test_store_ids_are_unique() {
        let a = StoreId::next();
        let b = StoreId::next();
        assert_ne!(a, b);
        assert!(a.to_string().starts_with("store#"));
    }

    #[test]
    fn test_shared_handle_sees_declarations() {
        let registry = SharedRegistry::new();
        let clone = registry.clone();
        let owner = StoreId::next();

        registry.declare(owner, "k", Permission::Read);
        assert_eq!(clone.lookup(owner, "k"), Some(Permission::Read));
        assert!(registry.same_registry(&clone));
        assert!(!registry.same_registry(&SharedRegistry::new()));
        assert_eq!(clone.snapshot().len(), 1);
    }

    proptest! {
        #[test]
        fn test_last_declaration_wins(
            key in "[a-z]{1,8}",
            levels in prop::collection::vec(permission(), 1..6),
        ) {
            let mut registry = PermissionRegistry::new();
            let owner = StoreId::next();
            for level in &levels {
                registry.declare(owner, key.clone(), *level);
            }
            prop_assert_eq!(registry.lookup(owner, &key), levels.last().copied());
            prop_assert_eq!(registry.len(), 1);
        }
    }
}
