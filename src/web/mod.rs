//! Web framework integration surface.
//!
//! This module provides the boundary between HTTP frameworks and
//! [`RequestView`](crate::RequestView). It handles:
//! - Mapping framework requests to a [`RequestSnapshot`](crate::RequestSnapshot)
//! - Deriving query parameters from the URL and cookies from the `cookie` header
//! - Failing fast when a framework hands over malformed data
//!
//! # Design Principles
//!
//! 1. **No Framework Dependencies**: This module contains no framework-specific code.
//!    It defines interfaces that framework-specific code can implement.
//!
//! 2. **Explicit Construction**: A view is built once per request. Nothing is
//!    registered globally and no request object is decorated at runtime.
//!
//! 3. **No Authentication**: The web boundary only carries the framework's
//!    authentication result; it never authenticates.
//!
//! # Integration Model
//!
//! Framework-specific code should either:
//! 1. Implement [`ExtractSnapshot`] for its request type and call
//!    `RequestView::from_request`, or
//! 2. Fill a [`RequestAdapter`] from its request type and call `build()`.
//!
//! # Example Flow
//!
//! ```ignore
//! // In a framework-specific integration (e.g., axum, actix):
//!
//! let mut adapter = RequestAdapter::new(request_id, absolute_url);
//! for (name, value) in http_req.headers() {
//!     adapter.add_header(name.as_str(), value.to_str()?);
//! }
//! adapter.set_body(parsed_json);
//! let request = adapter.build()?;
//!
//! if request.wants_json() {
//!     return json_response(request.only(["name", "email"]));
//! }
//! ```

mod adapter;
mod extract;

pub use adapter::RequestAdapter;
pub use extract::ExtractSnapshot;
