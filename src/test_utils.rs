//! Shared proptest strategies for unit tests.

use proptest::prelude::*;
use serde_json::{Map, Value};

/// Small key alphabet so that generated maps and selectors overlap often.
pub(crate) fn arb_key() -> impl Strategy<Value = String> {
    "[a-e]{1,2}"
}

/// Leaf JSON values, including every "empty" shape.
pub(crate) fn arb_json_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::String),
        Just(Value::Array(Vec::new())),
        Just(Value::Object(Map::new())),
        prop::collection::vec("[a-z]{0,4}", 1..3)
            .prop_map(|items| Value::Array(items.into_iter().map(Value::String).collect())),
    ]
}

/// A top-level input map with arbitrary leaf values.
pub(crate) fn arb_input_map() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::vec((arb_key(), arb_json_leaf()), 0..8)
        .prop_map(|pairs| pairs.into_iter().collect())
}

/// A map of string values, shaped like path or query parameters.
pub(crate) fn arb_string_map() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::vec((arb_key(), "[a-z0-9]{0,6}"), 0..6).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect()
    })
}

/// A key selector as a plain list.
pub(crate) fn arb_key_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_key(), 0..5)
}
