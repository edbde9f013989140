//! Content negotiation and authorization header parsing.
//!
//! These are the string tests behind [`RequestView::is_json`](crate::RequestView::is_json),
//! [`RequestView::wants_json`](crate::RequestView::wants_json),
//! [`RequestView::wants_html`](crate::RequestView::wants_html) and
//! [`RequestView::bearer_token`](crate::RequestView::bearer_token). They
//! operate on raw header values and never allocate.

const BEARER_PREFIX: &str = "Bearer ";

/// Returns true if a header value denotes JSON.
///
/// Two independent tests: the value contains `/json` anywhere
/// (`application/json; charset=utf-8`), or it ends with a `+json`
/// structured syntax suffix (`application/vnd.api+json`).
///
/// ```
/// use request_view::negotiation::is_json_media_type;
///
/// assert!(is_json_media_type("application/json"));
/// assert!(is_json_media_type("application/vnd.api+json"));
/// assert!(!is_json_media_type("text/html"));
/// ```
pub fn is_json_media_type(value: &str) -> bool {
    value.contains("/json") || value.trim_end().ends_with("+json")
}

/// Returns true if an `accept` header asks for JSON.
///
/// The whole header is tested, so a `+json` range only matches when it is
/// the last one and carries no parameters.
pub fn accepts_json(accept: &str) -> bool {
    is_json_media_type(accept)
}

/// Returns true if an `accept` header mentions `text/html`.
pub fn accepts_html(accept: &str) -> bool {
    accept.contains("text/html")
}

/// Extracts the token from an `authorization` header value.
///
/// The scheme prefix is matched exactly: `Bearer` followed by one space.
///
/// ```
/// use request_view::negotiation::bearer_token;
///
/// assert_eq!(bearer_token("Bearer 1234"), Some("1234"));
/// assert_eq!(bearer_token("API-Key 1234"), None);
/// ```
pub fn bearer_token(authorization: &str) -> Option<&str> {
    authorization.strip_prefix(BEARER_PREFIX)
}
