//! Shared proptest strategies for unit tests.

use proptest::prelude::*;
use serde_json::{Map, Value};

/// Field names, biased towards a small pool so records and allowlists overlap.
pub(crate) fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop::sample::select(vec![
            "a", "b", "c", "name", "email", "is_admin", "role", "__proto__", "constructor",
        ])
        .prop_map(str::to_string),
        1 => "[a-z_]{0,6}",
    ]
}

/// Arbitrary JSON values up to a small depth.
pub(crate) fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[ -~]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec((arb_key(), inner), 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// Untrusted records: mostly objects, sometimes any other JSON shape.
pub(crate) fn arb_record() -> impl Strategy<Value = Value> {
    prop_oneof![
        3 => prop::collection::vec((arb_key(), arb_json()), 0..8)
            .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        1 => arb_json(),
    ]
}

/// Untrusted allowlists: mostly string arrays, sometimes malformed.
pub(crate) fn arb_allowlist_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        3 => prop::collection::vec(arb_key(), 0..8)
            .prop_map(|keys| Value::Array(keys.into_iter().map(Value::String).collect())),
        1 => arb_json(),
    ]
}
