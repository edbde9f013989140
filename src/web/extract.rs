//! Extraction boundary trait for web integration.
//!
//! This module defines the core abstraction for turning framework-specific
//! request types into a [`RequestSnapshot`].

use crate::error::Error;
use crate::snapshot::RequestSnapshot;

/// Builds a request snapshot from a framework-specific request.
///
/// This trait is the boundary between web framework types and this crate.
/// Framework integrations implement it to hand over what they already
/// parsed: URL, headers, cookies, body, route parameters and the
/// authentication result.
///
/// # Design Notes
///
/// This trait intentionally does NOT:
/// - Parse HTTP (the server already did)
/// - Authenticate (the framework's auth layer did)
/// - Validate or coerce input values
///
/// It ONLY maps framework types to a snapshot, failing when the framework
/// hands over data that breaks the snapshot contract.
///
/// # Examples
///
/// ```
/// use request_view::web::ExtractSnapshot;
/// use request_view::{Error, RequestSnapshot, RequestUrl, RequestView};
/// use std::collections::HashMap;
///
/// // Example framework-specific implementation
/// struct MyFrameworkRequest {
///     id: String,
///     url: String,
///     route_params: HashMap<String, String>,
/// }
///
/// impl ExtractSnapshot for MyFrameworkRequest {
///     fn extract_snapshot(&self) -> Result<RequestSnapshot, Error> {
///         let url = RequestUrl::parse(&self.url)?;
///         let mut snapshot = RequestSnapshot::new(self.id.clone(), url);
///         for (k, v) in &self.route_params {
///             snapshot.insert_param(k.clone(), v.clone());
///         }
///         Ok(snapshot)
///     }
/// }
///
/// let req = MyFrameworkRequest {
///     id: "req-1".to_string(),
///     url: "http://localhost/users/7".to_string(),
///     route_params: HashMap::from([("id".to_string(), "7".to_string())]),
/// };
/// let view = RequestView::from_request(&req).unwrap();
/// assert_eq!(view.input("id", ""), "7");
/// ```
pub trait ExtractSnapshot {
    /// Extracts the request snapshot.
    ///
    /// Returns an error only for contract violations, never for missing data.
    fn extract_snapshot(&self) -> Result<RequestSnapshot, Error>;
}
