//! # Keytree Permissions
//!
//! Access levels and the registry that associates them with store keys.
//!
//! ## Overview
//!
//! Every slot of a keytree store carries an access policy. A policy is
//! either declared for a specific `(store, key)` pair or inherited from the
//! owning store's default. This crate owns the declared half:
//!
//! - **Permission**: `r`, `w`, `rw` or `none`
//! - **StoreId**: process-unique identity of a store instance
//! - **PermissionRegistry**: `(StoreId, key) -> Permission` declarations
//! - **SharedRegistry**: a cloneable handle so a whole tree consults one registry
//!
//! Declarations are per instance, not per key name: two stores may declare
//! different policies for the same key.
//!
//! ## Usage
//!
//! ```rust
//! use keytree_perms::{Permission, PermissionRegistry, StoreId};
//!
//! let mut registry = PermissionRegistry::new();
//! let owner = StoreId::next();
//!
//! registry.declare(owner, "secret", Permission::None);
//! assert_eq!(registry.lookup(owner, "secret"), Some(Permission::None));
//! assert_eq!(registry.lookup(owner, "public"), None);
//! ```

pub mod error;
pub mod permission;
pub mod registry;

pub use error::{PermsError, Result};
pub use permission::{Access, Permission};
pub use registry::{PermissionRegistry, SharedRegistry, StoreId};
