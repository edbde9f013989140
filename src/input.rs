//! Unified request input.
//!
//! Payload fields, path parameters and query parameters are merged into a
//! single [`Input`] mapping. For a key present in several sources the value
//! from the highest-precedence source replaces the others entirely:
//!
//! 1. query parameters
//! 2. path parameters
//! 3. payload fields
//!
//! Nested objects are never deep-merged.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::keys::Keys;

/// The precedence-merged view over payload, params and query.
///
/// An `Input` is a snapshot: it is rebuilt on every
/// [`RequestView::all`](crate::RequestView::all) call and does not track
/// later changes to the request.
///
/// # Examples
///
/// ```
/// use request_view::Input;
/// use serde_json::json;
///
/// let input = Input::from_value(json!({ "name": "Marcus", "developer": "" }));
///
/// assert!(input.has(["name", "developer"]));
/// assert!(!input.filled("developer"));
/// assert_eq!(input.only("name").len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Input(Map<String, Value>);

impl Input {
    /// Wraps an already merged mapping.
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Wraps a JSON value; anything other than an object yields an empty input.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    /// Returns the merged mapping.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the input, returning the merged mapping.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Returns the number of top-level keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no source contributed any key.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the top-level value for `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the selected keys that are present, in input order.
    ///
    /// Selected keys with no value are dropped, never reported as null.
    pub fn only(&self, keys: impl Into<Keys>) -> Map<String, Value> {
        let keys: Keys = keys.into();
        self.0
            .iter()
            .filter(|(k, _)| keys.contains(k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Returns every key except the selected ones.
    pub fn except(&self, keys: impl Into<Keys>) -> Map<String, Value> {
        let keys: Keys = keys.into();
        self.0
            .iter()
            .filter(|(k, _)| !keys.contains(k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Returns true if every selected key is present, whatever its value.
    pub fn has(&self, keys: impl Into<Keys>) -> bool {
        let keys: Keys = keys.into();
        keys.as_slice().iter().all(|k| self.0.contains_key(k))
    }

    /// Returns true if at least one selected key is absent.
    pub fn missing(&self, keys: impl Into<Keys>) -> bool {
        !self.has(keys)
    }

    /// Returns true if every selected key is present with a non-empty value.
    ///
    /// See [`is_empty_value`] for what counts as empty.
    pub fn filled(&self, keys: impl Into<Keys>) -> bool {
        let keys: Keys = keys.into();
        keys.as_slice()
            .iter()
            .all(|k| self.0.get(k).is_some_and(|v| !is_empty_value(v)))
    }

    /// Resolves a dot-separated path such as `user.name`.
    ///
    /// A top-level key spelled exactly like the path wins over nested lookup.
    /// Only objects are traversed; array indices are not supported.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        if let Some(value) = self.0.get(path) {
            return Some(value);
        }

        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.0.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Returns the value at `path`, or `default` if it does not resolve.
    ///
    /// A JSON `null` stored at the path is returned as-is.
    pub fn input(&self, path: &str, default: impl Into<Value>) -> Value {
        match self.lookup(path) {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }
}

impl From<Input> for Value {
    fn from(input: Input) -> Self {
        Value::Object(input.into_map())
    }
}

/// Returns true for `null`, `""`, `[]` and `{}`.
///
/// Numbers (including zero) and booleans (including `false`) are never empty.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Merges the three input sources with query > params > payload precedence.
pub(crate) fn unify(
    payload: Option<&Map<String, Value>>,
    params: &Map<String, Value>,
    query: &Map<String, Value>,
) -> Input {
    let mut merged = payload.cloned().unwrap_or_default();
    for source in [params, query] {
        for (key, value) in source {
            merged.insert(key.clone(), value.clone());
        }
    }
    Input(merged)
}
