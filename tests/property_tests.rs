//! Integration property tests for request-view.
//!
//! These tests validate the merge and key-selection invariants end to end,
//! through `RequestSnapshot` and `RequestView`.

use proptest::prelude::*;
use request_view::{is_empty_value, RequestSnapshot, RequestUrl, RequestView};
use serde_json::{Map, Value};

// Strategy: small key alphabet so sources overlap often
fn arb_key() -> impl Strategy<Value = String> {
    "[a-d]{1,2}"
}

// Strategy: payload objects with arbitrary leaf values
fn arb_payload() -> impl Strategy<Value = Map<String, Value>> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,5}".prop_map(Value::String),
        Just(Value::Array(Vec::new())),
        Just(Value::Object(Map::new())),
    ];
    prop::collection::vec((arb_key(), leaf), 0..6).prop_map(|pairs| pairs.into_iter().collect())
}

// Strategy: string-valued parameter maps
fn arb_params() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((arb_key(), "[a-z0-9]{0,5}"), 0..5)
}

fn build(
    payload: &Map<String, Value>,
    params: &[(String, String)],
    query: &[(String, String)],
) -> RequestView {
    let url = RequestUrl::parse("http://localhost/").unwrap();
    let mut snapshot = RequestSnapshot::new("req-prop", url);
    snapshot.set_payload(Value::Object(payload.clone())).unwrap();
    for (k, v) in params {
        snapshot.insert_param(k.clone(), v.clone());
    }
    for (k, v) in query {
        snapshot.append_query(k.clone(), v.clone());
    }
    RequestView::new(snapshot)
}

proptest! {
    /// Property: each key resolves to query, else params, else payload
    #[test]
    fn proptest_precedence_query_params_payload(
        payload in arb_payload(),
        params in arb_params(),
        query in arb_params()
    ) {
        let request = build(&payload, &params, &query);
        let snapshot = request.snapshot();
        let all = request.all();

        for (key, value) in all.as_map() {
            let expected = snapshot
                .query()
                .get(key)
                .or_else(|| snapshot.params().get(key))
                .or_else(|| payload.get(key));
            prop_assert_eq!(Some(value), expected);
        }

        let source_keys = payload
            .keys()
            .chain(snapshot.params().keys())
            .chain(snapshot.query().keys());
        for key in source_keys {
            prop_assert!(all.as_map().contains_key(key));
        }
    }

    /// Property: only(keys) and except(keys) partition all()
    #[test]
    fn proptest_only_except_partition(
        payload in arb_payload(),
        query in arb_params(),
        keys in prop::collection::vec(arb_key(), 0..5)
    ) {
        let request = build(&payload, &[], &query);
        let all = request.all();
        let only = request.only(keys.clone());
        let except = request.except(keys.clone());

        prop_assert_eq!(only.len() + except.len(), all.len());
        for key in all.as_map().keys() {
            let selected = keys.contains(key);
            prop_assert_eq!(only.contains_key(key), selected);
            prop_assert_eq!(except.contains_key(key), !selected);
        }
    }

    /// Property: has is existence, filled is existence plus non-emptiness
    #[test]
    fn proptest_has_and_filled_agree_with_values(
        payload in arb_payload(),
        key in arb_key()
    ) {
        let request = build(&payload, &[], &[]);

        prop_assert_eq!(request.has(key.as_str()), payload.contains_key(&key));
        prop_assert_eq!(request.missing(key.as_str()), !payload.contains_key(&key));

        let expected_filled = payload.get(&key).is_some_and(|v| !is_empty_value(v));
        prop_assert_eq!(request.filled(key.as_str()), expected_filled);
    }

    /// Property: a single-segment input() matches all() or the default
    #[test]
    fn proptest_input_falls_back_to_default(
        payload in arb_payload(),
        key in arb_key()
    ) {
        let request = build(&payload, &[], &[]);
        let default = Value::String("fallback".to_string());

        let expected = payload.get(&key).cloned().unwrap_or_else(|| default.clone());
        prop_assert_eq!(request.input(&key, default), expected);
    }

    /// Property: accessors never panic on arbitrary header values
    #[test]
    fn proptest_header_predicates_never_panic(
        content_type in "\\PC{0,30}",
        accept in "\\PC{0,30}",
        authorization in "\\PC{0,30}"
    ) {
        let url = RequestUrl::parse("http://localhost/").unwrap();
        let mut snapshot = RequestSnapshot::new("req-prop", url);
        let headers = request_view::Headers::try_from_pairs([
            ("content-type", content_type.clone()),
            ("accept", accept),
            ("authorization", authorization.clone()),
        ])
        .unwrap();
        snapshot.set_headers(headers);
        let request = RequestView::new(snapshot);

        let _ = request.wants_json();
        let _ = request.wants_html();
        prop_assert_eq!(
            request.is_json(),
            content_type.contains("/json") || content_type.trim_end().ends_with("+json")
        );
        prop_assert_eq!(
            request.bearer_token(),
            authorization.strip_prefix("Bearer ")
        );
    }
}
