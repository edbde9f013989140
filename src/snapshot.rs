use std::collections::HashMap;
use std::net::IpAddr;

use serde_json::{Map, Value};

use crate::auth::{json_type, AuthState};
use crate::error::{ContractViolation, ContractViolationKind, Error};
use crate::headers::Headers;
use crate::request_url::RequestUrl;

/// Everything the host framework knows about one request.
///
/// Built once per request by the integration layer and handed to
/// [`RequestView`](crate::RequestView). Payload, params and query stay
/// mutable through the view so that later lifecycle stages (body parsing,
/// routing, authentication) can fill them in.
///
/// # Examples
///
/// ```
/// use request_view::{RequestSnapshot, RequestUrl};
/// use serde_json::json;
///
/// let url = RequestUrl::parse("https://localhost/users/42?name=marcus").unwrap();
/// let mut snapshot = RequestSnapshot::new("req-1", url);
/// snapshot.set_query_string("name=marcus");
/// snapshot.insert_param("id", "42");
/// snapshot.set_payload(json!({ "isHapiPassionate": "oh-yeah" })).unwrap();
///
/// assert_eq!(snapshot.query()["name"], "marcus");
/// assert_eq!(snapshot.params()["id"], "42");
/// ```
#[derive(Debug, Clone)]
pub struct RequestSnapshot {
    /// Unique request identifier, attached to every log event
    request_id: String,
    /// Parsed body, if any
    payload: Option<Map<String, Value>>,
    /// Path parameters from routing
    params: Map<String, Value>,
    /// Query parameters; repeated names hold arrays
    query: Map<String, Value>,
    /// Request headers
    headers: Headers,
    /// Parsed cookies
    cookies: HashMap<String, String>,
    /// Authentication result
    auth: AuthState,
    /// Request URL
    url: RequestUrl,
    /// Address of the connected peer
    remote_addr: Option<IpAddr>,
}

impl RequestSnapshot {
    /// Creates a snapshot with the given request ID and URL.
    ///
    /// All other fields start empty; the request is unauthenticated.
    pub fn new(request_id: impl Into<String>, url: RequestUrl) -> Self {
        Self {
            request_id: request_id.into(),
            payload: None,
            params: Map::new(),
            query: Map::new(),
            headers: Headers::new(),
            cookies: HashMap::new(),
            auth: AuthState::unauthenticated(),
            url,
            remote_addr: None,
        }
    }

    /// Sets the parsed payload.
    ///
    /// `null` clears the payload. Anything other than an object or null is a
    /// contract violation, since payload fields must be addressable by key.
    pub fn set_payload(&mut self, payload: Value) -> Result<(), Error> {
        self.payload = match payload {
            Value::Object(map) => Some(map),
            Value::Null => None,
            other => {
                return Err(ContractViolation::logged(
                    ContractViolationKind::PayloadNotObject,
                    format!(
                        "request {}: expected object or null, got {}",
                        self.request_id,
                        json_type(&other)
                    ),
                )
                .into())
            }
        };
        Ok(())
    }

    /// Adds a path parameter.
    pub fn insert_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.insert(name.into(), Value::String(value.into()));
    }

    /// Adds a query parameter.
    ///
    /// A repeated name turns the stored value into an array of all values in
    /// arrival order.
    pub fn append_query(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = Value::String(value.into());
        match self.query.get_mut(&name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                self.query.insert(name, value);
            }
        }
    }

    /// Replaces the query parameters by decoding a raw query string.
    ///
    /// The string is `application/x-www-form-urlencoded`, with or without a
    /// leading `?`.
    pub fn set_query_string(&mut self, query: &str) {
        self.query.clear();
        let query = query.strip_prefix('?').unwrap_or(query);
        for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
            self.append_query(name, value);
        }
    }

    /// Replaces the headers.
    pub fn set_headers(&mut self, headers: Headers) {
        self.headers = headers;
    }

    /// Adds a cookie.
    pub fn insert_cookie(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name.into(), value.into());
    }

    /// Replaces the authentication result.
    pub fn set_auth(&mut self, auth: AuthState) {
        self.auth = auth;
    }

    /// Sets the address of the connected peer.
    pub fn set_remote_addr(&mut self, remote_addr: Option<IpAddr>) {
        self.remote_addr = remote_addr;
    }

    /// Returns the request ID.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the payload, if one was set.
    pub fn payload(&self) -> Option<&Map<String, Value>> {
        self.payload.as_ref()
    }

    /// Returns the path parameters.
    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    /// Returns the path parameters for mutation.
    pub fn params_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.params
    }

    /// Returns the query parameters.
    pub fn query(&self) -> &Map<String, Value> {
        &self.query
    }

    /// Returns the query parameters for mutation.
    pub fn query_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.query
    }

    /// Returns the headers.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns the cookies.
    pub fn cookies(&self) -> &HashMap<String, String> {
        &self.cookies
    }

    /// Returns the authentication result.
    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    /// Returns the request URL.
    pub fn url(&self) -> &RequestUrl {
        &self.url
    }

    /// Returns the address of the connected peer.
    pub fn remote_addr(&self) -> Option<IpAddr> {
        self.remote_addr
    }
}
