use std::collections::HashMap;
use std::fmt;

use http::header::{self, HeaderName};

use crate::error::{ContractViolation, ContractViolationKind, Error};

/// Header names whose values never appear in `Debug` output.
static REDACTED_HEADERS: [HeaderName; 3] = [
    header::AUTHORIZATION,
    header::COOKIE,
    header::PROXY_AUTHORIZATION,
];

/// Case-insensitive map of request header names to values.
///
/// Names are validated and lowercased through [`http::HeaderName`], and
/// lookups lowercase the requested name, so `X-Data` and `x-data` address the
/// same entry. A repeated header name replaces the earlier value, except
/// `cookie`: repeated cookie fields are joined with `"; "` the way HTTP/2
/// peers split them.
///
/// # Examples
///
/// ```
/// use request_view::Headers;
///
/// let mut headers = Headers::new();
/// headers.insert("X-Data", "hapi").unwrap();
///
/// assert_eq!(headers.get("x-data"), Some("hapi"));
/// assert!(headers.contains("X-DATA"));
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: HashMap<String, String>,
}

impl Headers {
    /// Creates an empty header map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a header map from raw name/value pairs.
    ///
    /// Fails on the first name that is not a valid HTTP header name.
    pub fn try_from_pairs<I, K, V>(pairs: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut headers = Self::new();
        for (name, value) in pairs {
            headers.insert(name.as_ref(), value)?;
        }
        Ok(headers)
    }

    /// Inserts a header, returning the previous value for that name.
    pub fn insert(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<Option<String>, Error> {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
            ContractViolation::logged(
                ContractViolationKind::InvalidHeaderName,
                format!("'{}' is not a valid header name", name.escape_debug()),
            )
        })?;
        let value = value.into();

        if name == header::COOKIE {
            if let Some(existing) = self.entries.get_mut(name.as_str()) {
                let previous = existing.clone();
                existing.push_str("; ");
                existing.push_str(&value);
                return Ok(Some(previous));
            }
        }
        Ok(self.entries.insert(name.as_str().to_string(), value))
    }

    /// Returns the value for `name`, ignoring case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns true if a header named `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the number of headers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no headers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(lowercased name, value)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Debug for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, value) in self.iter() {
            if REDACTED_HEADERS.iter().any(|redacted| redacted.as_str() == name) {
                map.entry(&name, &"[REDACTED]");
            } else {
                map.entry(&name, &value);
            }
        }
        map.finish()
    }
}
