//! Proptest generators for property-based testing.

use proptest::prelude::*;

use keytree_perms::Permission;
use keytree_store::{path as kpath, Object, Primitive, Value};
use serde_json::Number;

/// Generate a key: no separator, never empty.
pub fn key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}".prop_map(String::from)
}

/// Generate a path of 1 to `max_segments` keys.
pub fn path(max_segments: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(key(), 1..=max_segments.max(1)).prop_map(kpath::join)
}

/// Generate a permission level.
pub fn permission() -> impl Strategy<Value = Permission> {
    prop_oneof![
        Just(Permission::Read),
        Just(Permission::Write),
        Just(Permission::ReadWrite),
        Just(Permission::None),
    ]
}

/// Generate a primitive. Floats are finite.
pub fn primitive() -> impl Strategy<Value = Primitive> {
    prop_oneof![
        Just(Primitive::Null),
        any::<bool>().prop_map(Primitive::Bool),
        any::<i64>().prop_map(|n| Primitive::Number(Number::from(n))),
        (-1.0e9f64..1.0e9f64)
            .prop_filter_map("finite", Number::from_f64)
            .prop_map(Primitive::Number),
        "[ -~]{0,24}".prop_map(Primitive::String),
    ]
}

/// Generate a plain object nested up to `depth` levels, with primitive leaves.
pub fn nested_object(depth: u32) -> impl Strategy<Value = Object> {
    let leaf = primitive().prop_map(Value::Primitive);
    let tree = leaf.prop_recursive(depth, 64, 4, |inner| {
        prop::collection::vec((key(), inner), 1..4).prop_map(|pairs| {
            Value::Object(pairs.into_iter().collect::<Object>())
        })
    });
    prop::collection::vec((key(), tree), 0..6).prop_map(|pairs| pairs.into_iter().collect())
}

/// Parameters for a single declared write.
#[derive(Debug, Clone)]
pub struct WriteParams {
    pub key: String,
    pub value: Primitive,
    pub permission: Permission,
}

impl Arbitrary for WriteParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (key(), primitive(), permission())
            .prop_map(|(key, value, permission)| WriteParams {
                key,
                value,
                permission,
            })
            .boxed()
    }
}
