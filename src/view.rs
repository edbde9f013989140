use std::collections::HashMap;
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::auth::AuthState;
use crate::error::Error;
use crate::input::{self, Input};
use crate::ip::{ClientIpResolver, ForwardedIpResolver};
use crate::keys::Keys;
use crate::negotiation;
use crate::snapshot::RequestSnapshot;
use crate::web::ExtractSnapshot;

/// Read accessors over one in-flight request.
///
/// A `RequestView` is built once per request from a [`RequestSnapshot`] and
/// answers questions about it without callers needing to know which part of
/// the request a value came from. Nothing here is cached: every accessor
/// reads the current snapshot, so changes made through
/// [`set_payload`](Self::set_payload), [`params_mut`](Self::params_mut),
/// [`query_mut`](Self::query_mut) or [`set_auth`](Self::set_auth) are visible
/// to the next call.
///
/// # Examples
///
/// ```
/// use request_view::{RequestSnapshot, RequestUrl, RequestView};
/// use serde_json::json;
///
/// let url = RequestUrl::parse("https://localhost/users?name=marcus").unwrap();
/// let mut snapshot = RequestSnapshot::new("req-1", url);
/// snapshot.set_query_string("name=marcus");
/// snapshot.set_payload(json!({ "name": "other", "isHapiPassionate": "oh-yeah" })).unwrap();
///
/// let request = RequestView::new(snapshot);
///
/// assert_eq!(request.all().get("name"), Some(&json!("marcus")));
/// assert!(request.has(["name", "isHapiPassionate"]));
/// assert_eq!(request.uri(), "https://localhost/users");
/// ```
pub struct RequestView {
    snapshot: RequestSnapshot,
    ip_resolver: Arc<dyn ClientIpResolver>,
}

impl RequestView {
    /// Creates a view that resolves the client IP from the peer address only.
    pub fn new(snapshot: RequestSnapshot) -> Self {
        Self {
            snapshot,
            ip_resolver: Arc::new(ForwardedIpResolver::default()),
        }
    }

    /// Builds a view from any framework request that can produce a snapshot.
    pub fn from_request<R: ExtractSnapshot + ?Sized>(request: &R) -> Result<Self, Error> {
        Ok(Self::new(request.extract_snapshot()?))
    }

    /// Replaces the client IP resolution policy.
    pub fn with_ip_resolver(mut self, resolver: impl ClientIpResolver + 'static) -> Self {
        self.ip_resolver = Arc::new(resolver);
        self
    }

    /// Uses a shared client IP resolution policy.
    pub fn with_shared_ip_resolver(mut self, resolver: Arc<dyn ClientIpResolver>) -> Self {
        self.ip_resolver = resolver;
        self
    }

    /// Returns the underlying snapshot.
    pub fn snapshot(&self) -> &RequestSnapshot {
        &self.snapshot
    }

    /// Consumes the view, returning the snapshot.
    pub fn into_snapshot(self) -> RequestSnapshot {
        self.snapshot
    }

    /// Returns the request ID.
    pub fn request_id(&self) -> &str {
        self.snapshot.request_id()
    }

    // ---------------------------------------------------------------------
    // Lifecycle mutation
    // ---------------------------------------------------------------------

    /// Replaces the payload; see [`RequestSnapshot::set_payload`].
    pub fn set_payload(&mut self, payload: Value) -> Result<(), Error> {
        self.snapshot.set_payload(payload)
    }

    /// Path parameters, for routing stages that fill them in late.
    pub fn params_mut(&mut self) -> &mut Map<String, Value> {
        self.snapshot.params_mut()
    }

    /// Query parameters, for stages that rewrite them.
    pub fn query_mut(&mut self) -> &mut Map<String, Value> {
        self.snapshot.query_mut()
    }

    /// Records the authentication result.
    pub fn set_auth(&mut self, auth: AuthState) {
        tracing::debug!(
            request_id = %self.request_id(),
            authenticated = auth.is_authenticated(),
            "auth state updated"
        );
        self.snapshot.set_auth(auth);
    }

    // ---------------------------------------------------------------------
    // Input
    // ---------------------------------------------------------------------

    /// Returns payload, path parameters and query parameters merged into one
    /// mapping. Query wins over params, params win over payload.
    pub fn all(&self) -> Input {
        let snapshot = &self.snapshot;
        tracing::trace!(
            request_id = %snapshot.request_id(),
            payload_keys = snapshot.payload().map_or(0, Map::len),
            param_keys = snapshot.params().len(),
            query_keys = snapshot.query().len(),
            "unifying request input"
        );
        input::unify(snapshot.payload(), snapshot.params(), snapshot.query())
    }

    /// Returns only the selected keys that are present in [`all`](Self::all).
    pub fn only(&self, keys: impl Into<Keys>) -> Map<String, Value> {
        self.all().only(keys)
    }

    /// Returns every key of [`all`](Self::all) except the selected ones.
    pub fn except(&self, keys: impl Into<Keys>) -> Map<String, Value> {
        self.all().except(keys)
    }

    /// Returns true if every selected key is present, even with an empty value.
    pub fn has(&self, keys: impl Into<Keys>) -> bool {
        self.all().has(keys)
    }

    /// Returns true if any selected key is absent.
    pub fn missing(&self, keys: impl Into<Keys>) -> bool {
        self.all().missing(keys)
    }

    /// Returns true if every selected key is present and non-empty.
    pub fn filled(&self, keys: impl Into<Keys>) -> bool {
        self.all().filled(keys)
    }

    /// Returns the input at a dot-separated `key`, or `default`.
    ///
    /// ```
    /// # use request_view::{RequestSnapshot, RequestUrl, RequestView};
    /// # use serde_json::json;
    /// # let mut snapshot = RequestSnapshot::new("req-1", RequestUrl::parse("http://localhost/").unwrap());
    /// snapshot.set_payload(json!({ "user": { "name": "Marcus" } })).unwrap();
    /// let request = RequestView::new(snapshot);
    ///
    /// assert_eq!(request.input("user.name", "anonymous"), json!("Marcus"));
    /// assert_eq!(request.input("user.email", "none"), json!("none"));
    /// ```
    pub fn input(&self, key: &str, default: impl Into<Value>) -> Value {
        self.all().input(key, default)
    }

    /// Returns the input at a dot-separated `key`, if it resolves.
    pub fn input_opt(&self, key: &str) -> Option<Value> {
        self.all().lookup(key).cloned()
    }

    // ---------------------------------------------------------------------
    // Headers
    // ---------------------------------------------------------------------

    /// Returns the value of header `name`, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.snapshot.headers().get(name)
    }

    /// Returns true if header `name` is present.
    pub fn has_header(&self, name: &str) -> bool {
        self.header(name).is_some()
    }

    /// Returns true if the request body is declared as JSON.
    pub fn is_json(&self) -> bool {
        self.header("content-type")
            .is_some_and(negotiation::is_json_media_type)
    }

    /// Returns true if the client accepts a JSON response.
    pub fn wants_json(&self) -> bool {
        self.header("accept").is_some_and(negotiation::accepts_json)
    }

    /// Returns true if the client accepts an HTML response.
    pub fn wants_html(&self) -> bool {
        self.header("accept").is_some_and(negotiation::accepts_html)
    }

    /// Returns the token of a `Bearer` authorization header, without the
    /// `Bearer ` prefix.
    pub fn bearer_token(&self) -> Option<&str> {
        let authorization = self.header("authorization")?;
        let token = negotiation::bearer_token(authorization);
        if token.is_none() {
            tracing::debug!(
                request_id = %self.request_id(),
                "authorization header present without bearer scheme"
            );
        }
        token
    }

    // ---------------------------------------------------------------------
    // Cookies
    // ---------------------------------------------------------------------

    /// Returns the value of cookie `name`.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.snapshot.cookies().get(name).map(String::as_str)
    }

    /// Returns all cookies.
    pub fn cookies(&self) -> &HashMap<String, String> {
        self.snapshot.cookies()
    }

    /// Returns true if cookie `name` is present.
    pub fn has_cookie(&self, name: &str) -> bool {
        self.snapshot.cookies().contains_key(name)
    }

    // ---------------------------------------------------------------------
    // Auth
    // ---------------------------------------------------------------------

    /// Returns true if the request is authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.snapshot.auth().is_authenticated()
    }

    /// Returns the credentials of an authenticated request.
    ///
    /// `None` before authentication has run and for unauthenticated requests.
    pub fn user(&self) -> Option<&Map<String, Value>> {
        self.snapshot.auth().user()
    }

    // ---------------------------------------------------------------------
    // URL
    // ---------------------------------------------------------------------

    /// `{protocol}//{hostname}`, e.g. `https://example.com`.
    pub fn root(&self) -> String {
        self.snapshot.url().root()
    }

    /// The URL without query string or fragment.
    pub fn uri(&self) -> String {
        self.snapshot.url().uri()
    }

    /// The full URL including query string and fragment.
    pub fn full_url(&self) -> String {
        self.snapshot.url().full_url()
    }

    /// Alias for [`full_url`](Self::full_url).
    pub fn full_uri(&self) -> String {
        self.full_url()
    }

    // ---------------------------------------------------------------------
    // Client IP
    // ---------------------------------------------------------------------

    /// Returns the client IP according to the configured resolver.
    pub fn ip(&self) -> Option<IpAddr> {
        let ip = self
            .ip_resolver
            .resolve(self.snapshot.headers(), self.snapshot.remote_addr());
        tracing::trace!(request_id = %self.request_id(), client_ip = ?ip, "resolved client ip");
        ip
    }
}

impl fmt::Debug for RequestView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestView")
            .field("snapshot", &self.snapshot)
            .finish_non_exhaustive()
    }
}
