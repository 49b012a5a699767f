//! # Keytree Testkit
//!
//! Testing utilities for keytree.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Generators**: Proptest strategies for keys, paths, primitives and nested objects
//! - **Fixtures**: Ready-made stores with one key per permission level, and a
//!   producer that counts its invocations
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use keytree_testkit::generators::WriteParams;
//!
//! proptest! {
//!     #[test]
//!     fn write_then_read(params: WriteParams) {
//!         let mut store = keytree_store::Store::new();
//!         store.write(&params.key, params.value.clone()).unwrap();
//!         // ...
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use keytree_testkit::fixtures::{restricted_store, CountingProducer};
//!
//! let store = restricted_store();
//! assert!(store.read("hidden").is_err());
//!
//! let producer = CountingProducer::new();
//! let _value = producer.value();
//! assert_eq!(producer.calls(), 0);
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{restricted_store, CountingProducer};
pub use generators::{WriteParams, key, nested_object, path, permission, primitive};
