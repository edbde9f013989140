//! Request adapter for mapping raw HTTP request parts to a request view.

use std::net::IpAddr;
use std::sync::Arc;

use cookie::Cookie;
use serde_json::Value;

use crate::auth::AuthState;
use crate::error::Error;
use crate::headers::Headers;
use crate::ip::ClientIpResolver;
use crate::request_url::RequestUrl;
use crate::snapshot::RequestSnapshot;
use crate::view::RequestView;

use super::ExtractSnapshot;

/// Adapter for converting framework-specific HTTP requests into a [`RequestView`].
///
/// `RequestAdapter` collects the raw parts a server has at hand and derives
/// the rest:
/// - query parameters are decoded from the URL's query string
/// - cookies are parsed from the `cookie` header
///
/// Nothing is validated until [`build`](Self::build), which fails on the
/// first contract violation (relative URL, non-object body, bad header name).
///
/// # Design Notes
///
/// This type intentionally contains simple, owned data to avoid coupling
/// to any specific framework's request types. Framework-specific code
/// should implement `From<FrameworkRequest>` for `RequestAdapter`.
///
/// # Examples
///
/// ```
/// use request_view::web::RequestAdapter;
/// use serde_json::json;
///
/// let mut adapter = RequestAdapter::new("req-12345", "https://localhost/users?name=marcus");
/// adapter.add_header("Accept", "text/html");
/// adapter.add_header("Cookie", "name=Marcus; token=123");
/// adapter.set_body(json!({ "isHapiPassionate": "oh-yeah" }));
///
/// let request = adapter.build().unwrap();
/// assert_eq!(request.input("name", ""), "marcus");
/// assert!(request.wants_html());
/// assert_eq!(request.cookie("token"), Some("123"));
/// ```
#[derive(Debug, Clone)]
pub struct RequestAdapter {
    /// Unique request identifier (required)
    request_id: String,
    /// Absolute request URL as received
    url: String,
    /// Raw header pairs in arrival order
    headers: Vec<(String, String)>,
    /// Parsed request body
    body: Option<Value>,
    /// Path parameters from routing, in route order
    path_params: Vec<(String, String)>,
    /// Address of the connected peer
    remote_addr: Option<IpAddr>,
    /// Authentication result
    auth: AuthState,
}

impl RequestAdapter {
    /// Creates a new request adapter with the given request ID and absolute URL.
    ///
    /// All other fields are initialized as empty. Use builder-style methods
    /// to populate them.
    pub fn new(request_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            url: url.into(),
            headers: Vec::new(),
            body: None,
            path_params: Vec::new(),
            remote_addr: None,
            auth: AuthState::unauthenticated(),
        }
    }

    /// Adds a header.
    ///
    /// A repeated name replaces the earlier value, except `cookie`, whose
    /// fields are joined.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    /// Adds a path parameter. A repeated name replaces the earlier value.
    pub fn add_path_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.path_params.push((name.into(), value.into()));
    }

    /// Sets the parsed request body.
    pub fn set_body(&mut self, body: Value) {
        self.body = Some(body);
    }

    /// Sets the address of the connected peer.
    pub fn set_remote_addr(&mut self, remote_addr: IpAddr) {
        self.remote_addr = Some(remote_addr);
    }

    /// Sets the authentication result.
    pub fn set_auth(&mut self, auth: AuthState) {
        self.auth = auth;
    }

    /// Returns the request ID.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Builds a view with the default client IP policy.
    pub fn build(&self) -> Result<RequestView, Error> {
        RequestView::from_request(self)
    }

    /// Builds a view that resolves client IPs with `resolver`.
    pub fn build_with_resolver(
        &self,
        resolver: Arc<dyn ClientIpResolver>,
    ) -> Result<RequestView, Error> {
        Ok(self.build()?.with_shared_ip_resolver(resolver))
    }
}

impl ExtractSnapshot for RequestAdapter {
    fn extract_snapshot(&self) -> Result<RequestSnapshot, Error> {
        let url = RequestUrl::parse(&self.url)?;
        let headers = Headers::try_from_pairs(self.headers.iter().map(|(k, v)| (k, v.clone())))?;

        let mut snapshot = RequestSnapshot::new(self.request_id.clone(), url);
        let query_string = snapshot.url().query_string().to_string();
        snapshot.set_query_string(&query_string);

        if let Some(cookie_header) = headers.get("cookie") {
            for (name, value) in parse_cookie_header(cookie_header) {
                snapshot.insert_cookie(name, value);
            }
        }
        snapshot.set_headers(headers);

        if let Some(body) = &self.body {
            snapshot.set_payload(body.clone())?;
        }
        for (name, value) in &self.path_params {
            snapshot.insert_param(name.clone(), value.clone());
        }
        snapshot.set_remote_addr(self.remote_addr);
        snapshot.set_auth(self.auth.clone());

        tracing::debug!(
            request_id = %self.request_id,
            header_count = snapshot.headers().len(),
            cookie_count = snapshot.cookies().len(),
            "request snapshot extracted"
        );
        Ok(snapshot)
    }
}

/// Splits a `cookie` header into name/value pairs.
///
/// Malformed pairs are skipped, surrounding double quotes are removed from
/// values, and the first occurrence of a name wins.
fn parse_cookie_header(header: &str) -> Vec<(String, String)> {
    let mut cookies: Vec<(String, String)> = Vec::new();
    for cookie in Cookie::split_parse(header).filter_map(Result::ok) {
        if cookies.iter().any(|(name, _)| name == cookie.name()) {
            continue;
        }
        cookies.push((
            cookie.name().to_string(),
            cookie.value_trimmed().to_string(),
        ));
    }
    cookies
}
