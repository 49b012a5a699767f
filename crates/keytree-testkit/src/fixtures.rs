//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use keytree_perms::Permission;
use keytree_store::{Store, Value};

/// A store with one key per permission level, each holding its own name:
///
/// | key         | permission |
/// |-------------|------------|
/// | `public`    | `rw`       |
/// | `readonly`  | `r`        |
/// | `writeonly` | `w`        |
/// | `hidden`    | `none`     |
///
/// Values are written before the declarations are made.
pub fn restricted_store() -> Store {
    let mut store = Store::new();
    let levels = [
        ("public", Permission::ReadWrite),
        ("readonly", Permission::Read),
        ("writeonly", Permission::Write),
        ("hidden", Permission::None),
    ];

    for (key, _) in levels {
        // A fresh store has a `rw` default policy.
        store.write(key, key).expect("fresh store is rw");
    }
    for (key, permission) in levels {
        store.declare(key, permission);
    }
    store
}

/// A producer that counts how many times it has been invoked.
///
/// Each invocation yields the running call count, starting at 1.
#[derive(Debug, Clone, Default)]
pub struct CountingProducer {
    calls: Arc<AtomicUsize>,
}

impl CountingProducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A producer value sharing this counter.
    pub fn value(&self) -> Value {
        let calls = self.calls.clone();
        Value::producer(move || Value::from(calls.fetch_add(1, Ordering::SeqCst) + 1))
    }

    /// Number of invocations so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}
