//! # Keytree Store
//!
//! A hierarchical, permission-aware key-value tree.
//!
//! ## Overview
//!
//! A [`Store`] maps keys to [`Value`]s. A value is a primitive, a list, a
//! nested store, or a [`Producer`] evaluated lazily on read. Values are
//! addressed by colon paths such as `"a:b:c"`, routed one segment at a time
//! through nested stores.
//!
//! Every hop checks the effective permission of the key it touches: the
//! declaration in the tree's [`SharedRegistry`] if there is one, otherwise
//! the owning store's default policy.
//!
//! ## Key Types
//!
//! - [`Store`] - The recursive tree node
//! - [`Value`] - What a slot holds
//! - [`StoreBuilder`] - Entries first, declarations second
//! - [`PathStore`] - The abstract store contract
//!
//! ## Usage
//!
//! ```rust
//! use keytree_store::{Permission, Store, Value};
//! use serde_json::json;
//!
//! let mut store = Store::new();
//! store.write("server", Value::from(json!({"port": 8080, "tls": {"on": true}}))).unwrap();
//!
//! let port = store.read("server:port").unwrap().unwrap();
//! assert_eq!(port.as_i64(), Some(8080));
//!
//! store.declare("server", Permission::Read);
//! assert!(store.write("server", 1).is_err());
//! ```
//!
//! ## Design Notes
//!
//! - **Absence is not an error**: a missing key or a path through a leaf reads as `Ok(None)`
//! - **Auto-vivification**: writing `a:b` creates an empty store at `a` if needed
//! - **Ignored writes**: writing `a:b` when `a` holds a leaf changes nothing
//! - **No rollback**: `write_entries` keeps entries written before a failure

pub mod builder;
pub mod error;
pub mod path;
pub mod store;
pub mod traits;
pub mod value;

pub use builder::StoreBuilder;
pub use error::{Result, StoreError};
pub use store::Store;
pub use traits::{PathStore, PathStoreExt};
pub use value::{Object, Primitive, Producer, Value};

pub use keytree_perms::{Access, Permission, SharedRegistry, StoreId};
