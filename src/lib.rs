//! Unified, framework-agnostic accessors over an in-flight HTTP request.
//!
//! This crate answers the questions request handlers ask over and over:
//! - **Input**: what did the caller send, regardless of whether it arrived in
//!   the body, the path or the query string?
//! - **Negotiation**: did the caller send JSON, and does it want JSON or HTML back?
//! - **Identity**: bearer token, cookies, authentication result, client IP
//! - **URL**: root, path and full URL of the request
//!
//! # Core Types
//!
//! - [`RequestView`]: Accessor methods over one request
//! - [`RequestSnapshot`]: The request data handed over by the host framework
//! - [`Input`]: Payload, path and query parameters merged with query > params > payload precedence
//! - [`Keys`]: Normalized key selector accepted by every key-set operation
//! - [`ClientIpResolver`]: Pluggable client IP policy, see [`ForwardedIpResolver`]
//!
//! # Examples
//!
//! ```
//! use request_view::web::RequestAdapter;
//! use serde_json::json;
//!
//! let mut adapter = RequestAdapter::new("req-123", "https://localhost/users?name=marcus#top");
//! adapter.add_header("Accept", "text/html");
//! adapter.add_header("Authorization", "Bearer 1234");
//! adapter.set_body(json!({ "name": "other", "isHapiPassionate": "oh-yeah" }));
//!
//! let request = adapter.build().expect("well-formed request");
//!
//! // Query parameters win over the payload
//! assert_eq!(request.input("name", ""), "marcus");
//! assert!(request.filled(["name", "isHapiPassionate"]));
//! assert!(request.missing("email"));
//!
//! assert!(request.wants_html());
//! assert!(!request.wants_json());
//! assert_eq!(request.bearer_token(), Some("1234"));
//! assert_eq!(request.full_url(), "https://localhost/users?name=marcus#top");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod error;
mod headers;
mod input;
mod ip;
mod keys;
pub mod negotiation;
mod request_url;
mod snapshot;
mod view;
pub mod web;

#[cfg(test)]
mod test_utils;

pub use auth::AuthState;
pub use error::{ContractViolation, ContractViolationKind, Error};
pub use headers::Headers;
pub use input::{is_empty_value, Input};
pub use ip::{ClientIpResolver, ForwardedIpResolver, ProxyConfig};
pub use keys::Keys;
pub use request_url::RequestUrl;
pub use snapshot::RequestSnapshot;
pub use view::RequestView;
