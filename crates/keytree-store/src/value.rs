//! Values held in store slots.
//!
//! A slot holds a [`Value`]: a JSON-like primitive, a list, a nested
//! [`Store`], or a [`Producer`] that is evaluated on every terminal read.
//! [`Value::Object`] only exists as input; writing one normalizes it into a
//! nested store.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Number;

use crate::error::{Result, StoreError};
use crate::store::Store;

/// Insertion-ordered mapping of key to value.
pub type Object = IndexMap<String, Value>;

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Primitive {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Primitive::Null => serde_json::Value::Null,
            Primitive::Bool(b) => serde_json::Value::Bool(*b),
            Primitive::Number(n) => serde_json::Value::Number(n.clone()),
            Primitive::String(s) => serde_json::Value::String(s.clone()),
        }
    }
}

/// A zero-argument closure evaluated anew on every terminal read.
///
/// Clones share the closure. Two producers are equal only if they share it.
#[derive(Clone)]
pub struct Producer(Arc<dyn Fn() -> Value + Send + Sync>);

impl Producer {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invoke the closure.
    pub fn produce(&self) -> Value {
        (self.0)()
    }
}

impl fmt::Debug for Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Producer(..)")
    }
}

impl PartialEq for Producer {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.0) as *const (),
            Arc::as_ptr(&other.0) as *const (),
        )
    }
}

/// Anything a slot can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Primitive(Primitive),
    List(Vec<Value>),
    /// Plain mapping; normalized into [`Value::Store`] on write.
    Object(Object),
    Store(Box<Store>),
    Producer(Producer),
}

impl Value {
    /// The null primitive.
    pub const fn null() -> Self {
        Value::Primitive(Primitive::Null)
    }

    /// Wrap a closure as a producer value.
    pub fn producer<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Value::Producer(Producer::new(f))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Primitive(Primitive::Null))
    }

    pub fn is_store(&self) -> bool {
        matches!(self, Value::Store(_))
    }

    pub fn is_producer(&self) -> bool {
        matches!(self, Value::Producer(_))
    }

    pub fn as_primitive(&self) -> Option<&Primitive> {
        match self {
            Value::Primitive(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_store(&self) -> Option<&Store> {
        match self {
            Value::Store(store) => Some(store.as_ref()),
            _ => None,
        }
    }

    pub fn as_store_mut(&mut self) -> Option<&mut Store> {
        match self {
            Value::Store(store) => Some(store.as_mut()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Primitive(Primitive::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Primitive(Primitive::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Primitive(Primitive::Number(n)) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Primitive(Primitive::Number(n)) => n.as_f64(),
            _ => None,
        }
    }

    /// Convert to JSON.
    ///
    /// Nested stores serialize as their readable entries. Producers have no
    /// JSON form.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        match self {
            Value::Primitive(p) => Ok(p.to_json()),
            Value::List(items) => items
                .iter()
                .map(Value::to_json)
                .collect::<Result<Vec<_>>>()
                .map(serde_json::Value::Array),
            Value::Object(map) => object_to_json(map),
            Value::Store(store) => object_to_json(&store.entries()),
            Value::Producer(_) => Err(StoreError::NotSerializable("producer")),
        }
    }
}

fn object_to_json(map: &Object) -> Result<serde_json::Value> {
    map.iter()
        .map(|(k, v)| Ok((k.clone(), v.to_json()?)))
        .collect::<Result<serde_json::Map<_, _>>>()
        .map(serde_json::Value::Object)
}

impl From<Primitive> for Value {
    fn from(p: Primitive) -> Self {
        Value::Primitive(p)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Primitive(Primitive::Bool(b))
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Primitive(Primitive::Number(Number::from(n)))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);

impl From<f64> for Value {
    /// Non-finite floats have no JSON number form and become null.
    fn from(n: f64) -> Self {
        Number::from_f64(n)
            .map(|n| Value::Primitive(Primitive::Number(n)))
            .unwrap_or_else(Value::null)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Primitive(Primitive::String(s.to_string()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Primitive(Primitive::String(s))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Object> for Value {
    fn from(map: Object) -> Self {
        Value::Object(map)
    }
}

impl From<Store> for Value {
    fn from(store: Store) -> Self {
        Value::Store(Box::new(store))
    }
}

impl From<Producer> for Value {
    fn from(producer: Producer) -> Self {
        Value::Producer(producer)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::null(),
            serde_json::Value::Bool(b) => Value::Primitive(Primitive::Bool(b)),
            serde_json::Value::Number(n) => Value::Primitive(Primitive::Number(n)),
            serde_json::Value::String(s) => Value::Primitive(Primitive::String(s)),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_from_json_preserves_shape() {
        let value = Value::from(json!({"a": 1, "b": [true, null], "c": "x"}));

        let map = value.as_object().unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(map["a"].as_i64(), Some(1));
        assert_eq!(
            map["b"],
            Value::List(vec![Value::from(true), Value::null()])
        );
        assert_eq!(map["c"].as_str(), Some("x"));
    }

    #[test]
    fn test_to_json_roundtrip_for_plain_data() {
        let json = json!({"n": 1.5, "list": [1, "two"], "nested": {"ok": false}});
        let value = Value::from(json.clone());
        assert_eq!(value.to_json().unwrap(), json);
    }

    #[test]
    fn test_producer_not_serializable() {
        let value = Value::producer(|| Value::from(1));
        assert_eq!(
            value.to_json(),
            Err(StoreError::NotSerializable("producer"))
        );

        let list = Value::List(vec![Value::from(1), value]);
        assert!(list.to_json().is_err());
    }

    #[test]
    fn test_producer_invoked_each_time() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let producer = Producer::new(move || {
            Value::from(counter.fetch_add(1, Ordering::SeqCst) as u64)
        });

        assert_eq!(producer.produce(), Value::from(0u64));
        assert_eq!(producer.produce(), Value::from(1u64));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_producer_equality_is_identity() {
        let a = Producer::new(|| Value::null());
        let b = Producer::new(|| Value::null());
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_non_finite_float_is_null() {
        assert!(Value::from(f64::NAN).is_null());
        assert_eq!(Value::from(2.5).as_f64(), Some(2.5));
    }

    #[test]
    fn test_accessors() {
        let value = Value::from("hello");
        assert_eq!(value.as_str(), Some("hello"));
        assert_eq!(value.as_i64(), None);
        assert!(!value.is_store());
        assert!(Value::from(Store::new()).is_store());
        assert!(Value::producer(Value::null).is_producer());
    }
}
