//! # Keytree
//!
//! The unified API for keytree: a hierarchical key-value tree whose slots
//! carry read/write permissions.
//!
//! ## Overview
//!
//! - **Stores**: nested key-value nodes addressed by colon paths (`"a:b:c"`)
//! - **Permissions**: `r`, `w`, `rw`, `none`, declared per store and key
//! - **Producers**: closures stored as values and evaluated on every read
//! - **Configuration**: JSON-loadable defaults and declarations
//!
//! ## Usage
//!
//! ```rust
//! use keytree::StoreConfig;
//!
//! let config = StoreConfig::from_json_str(r#"{"declarations": {"version": "r"}}"#).unwrap();
//! let mut store = keytree::open(&config).unwrap();
//!
//! store.write("db:host", "localhost").unwrap();
//! assert_eq!(store.read("db:host").unwrap().unwrap().as_str(), Some("localhost"));
//!
//! // `version` is read-only.
//! assert!(store.write("version", "2").is_err());
//! ```
//!
//! ## Re-exports
//!
//! - `keytree::perms` - Permission levels and the registry
//! - `keytree::store` - The store, values, and paths

pub mod config;
pub mod error;

pub use keytree_perms as perms;
pub use keytree_store as store;

pub use config::StoreConfig;
pub use error::{KeytreeError, Result};

pub use keytree_perms::{Access, Permission, PermissionRegistry, SharedRegistry, StoreId};
pub use keytree_store::{
    Object, PathStore, PathStoreExt, Primitive, Producer, Store, StoreBuilder, StoreError, Value,
};

/// Build an empty root store from a configuration.
pub fn open(config: &StoreConfig) -> Result<Store> {
    config.open()
}
