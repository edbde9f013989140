//! Key selector normalization.
//!
//! Every key-set operation accepts `impl Into<Keys>`, so callers can pass a
//! single key, a list of keys, nested lists, or use the [`keys!`](crate::keys!)
//! macro for variadic call sites. Everything ends up as one flat, ordered list.

/// A normalized, ordered list of input keys.
///
/// # Examples
///
/// ```
/// use request_view::{keys, Keys};
///
/// assert_eq!(Keys::from("name").as_slice(), ["name"]);
/// assert_eq!(Keys::from(["name", "email"]).as_slice(), ["name", "email"]);
/// assert_eq!(Keys::from(vec![vec!["a"], vec!["b", "c"]]).as_slice(), ["a", "b", "c"]);
/// assert_eq!(keys!("a", ["b", "c"]).as_slice(), ["a", "b", "c"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keys(Vec<String>);

impl Keys {
    /// Creates an empty selector.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns the keys in selection order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns true if `key` is selected.
    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|k| k == key)
    }

    /// Returns the number of selected keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no keys are selected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the selected keys.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    fn extend_from(&mut self, other: impl Into<Keys>) {
        self.0.extend(other.into().0);
    }
}

impl From<&str> for Keys {
    fn from(key: &str) -> Self {
        Self(vec![key.to_string()])
    }
}

impl From<String> for Keys {
    fn from(key: String) -> Self {
        Self(vec![key])
    }
}

impl From<&String> for Keys {
    fn from(key: &String) -> Self {
        Self(vec![key.clone()])
    }
}

impl<T: Into<Keys>> From<Vec<T>> for Keys {
    fn from(items: Vec<T>) -> Self {
        let mut keys = Keys::new();
        for item in items {
            keys.extend_from(item);
        }
        keys
    }
}

impl<T: Into<Keys>, const N: usize> From<[T; N]> for Keys {
    fn from(items: [T; N]) -> Self {
        let mut keys = Keys::new();
        for item in items {
            keys.extend_from(item);
        }
        keys
    }
}

impl<T: Into<Keys> + Clone> From<&[T]> for Keys {
    fn from(items: &[T]) -> Self {
        let mut keys = Keys::new();
        for item in items {
            keys.extend_from(item.clone());
        }
        keys
    }
}

impl<'a> IntoIterator for &'a Keys {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Builds a [`Keys`] selector from any number of key arguments.
///
/// Each argument may be anything that converts into [`Keys`]: a string, an
/// array, a `Vec`, or another selector.
///
/// ```
/// use request_view::keys;
///
/// let selected = keys!("name", "email");
/// assert_eq!(selected.len(), 2);
/// ```
#[macro_export]
macro_rules! keys {
    () => {
        $crate::Keys::new()
    };
    ($($key:expr),+ $(,)?) => {
        $crate::Keys::from(::std::vec![$($crate::Keys::from($key)),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_key_normalizes_to_one_element() {
        assert_eq!(Keys::from("name").as_slice(), ["name"]);
        assert_eq!(Keys::from("name".to_string()).as_slice(), ["name"]);
    }

    #[test]
    fn sequence_preserves_order() {
        let keys = Keys::from(vec!["b", "a", "c"]);
        assert_eq!(keys.as_slice(), ["b", "a", "c"]);
    }

    #[test]
    fn nested_sequences_are_flattened() {
        let keys = Keys::from(vec![vec!["a", "b"], vec!["c"]]);
        assert_eq!(keys.as_slice(), ["a", "b", "c"]);
    }

    #[test]
    fn slices_and_arrays_are_accepted() {
        let owned = vec!["x".to_string(), "y".to_string()];
        assert_eq!(Keys::from(owned.as_slice()).as_slice(), ["x", "y"]);
        assert_eq!(Keys::from(["x", "y"]).as_slice(), ["x", "y"]);
    }

    #[test]
    fn macro_mixes_argument_shapes() {
        let keys = keys!("a", ["b", "c"], vec!["d".to_string()]);
        assert_eq!(keys.as_slice(), ["a", "b", "c", "d"]);
        assert!(keys!().is_empty());
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = Keys::from(vec!["a", "b"]);
        let twice = Keys::from(once.clone());
        assert_eq!(once, twice);
        assert_eq!(Keys::from(vec![once.clone()]), once);
    }

    #[test]
    fn duplicates_are_kept_in_order() {
        let keys = Keys::from(["a", "b", "a"]);
        assert_eq!(keys.as_slice(), ["a", "b", "a"]);
        assert!(keys.contains("b"));
        assert!(!keys.contains("c"));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: normalizing a list of single keys preserves content and order
            #[test]
            fn proptest_flat_list_round_trips(input in prop::collection::vec("[a-z]{1,8}", 0..10)) {
                let keys = Keys::from(input.clone());
                prop_assert_eq!(keys.as_slice(), input.as_slice());
            }

            /// Property: splitting a list into chunks and re-flattening yields the same selector
            #[test]
            fn proptest_chunked_flatten_matches_flat(
                input in prop::collection::vec("[a-z]{1,8}", 0..12),
                chunk in 1usize..4
            ) {
                let chunks: Vec<Vec<String>> = input.chunks(chunk).map(<[String]>::to_vec).collect();
                prop_assert_eq!(Keys::from(chunks), Keys::from(input));
            }
        }
    }
}
