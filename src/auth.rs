use std::fmt;

use serde_json::{Map, Value};

use crate::error::{ContractViolation, ContractViolationKind, Error};

/// The outcome of authentication as reported by the host framework.
///
/// This crate never authenticates anything itself; it only reads the result.
/// A request that has not been through authentication yet is represented by
/// [`AuthState::unauthenticated`].
///
/// # Examples
///
/// ```
/// use request_view::AuthState;
/// use serde_json::json;
///
/// let auth = AuthState::authenticated(json!({ "id": 1, "name": "Marcus" })).unwrap();
/// assert!(auth.is_authenticated());
/// assert_eq!(auth.credentials().unwrap()["name"], "Marcus");
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct AuthState {
    is_authenticated: bool,
    credentials: Option<Map<String, Value>>,
}

impl AuthState {
    /// An unauthenticated request with no credentials.
    pub fn unauthenticated() -> Self {
        Self::default()
    }

    /// A successfully authenticated request.
    ///
    /// `credentials` must be a JSON object, or null for an authenticated
    /// request without credentials.
    pub fn authenticated(credentials: Value) -> Result<Self, Error> {
        let credentials = match credentials {
            Value::Object(map) => Some(map),
            Value::Null => None,
            other => {
                return Err(ContractViolation::logged(
                    ContractViolationKind::CredentialsNotObject,
                    format!("expected object or null, got {}", json_type(&other)),
                )
                .into())
            }
        };

        Ok(Self {
            is_authenticated: true,
            credentials,
        })
    }

    /// Returns the authentication flag.
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// Returns the credentials, whether or not authentication succeeded.
    pub fn credentials(&self) -> Option<&Map<String, Value>> {
        self.credentials.as_ref()
    }

    /// Returns the credentials only if the request is authenticated.
    pub fn user(&self) -> Option<&Map<String, Value>> {
        if self.is_authenticated {
            self.credentials.as_ref()
        } else {
            None
        }
    }
}

impl fmt::Debug for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthState")
            .field("is_authenticated", &self.is_authenticated)
            .field(
                "credentials",
                &self.credentials.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
