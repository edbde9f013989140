use std::fmt;

/// Errors that can occur while building or mutating a request view.
///
/// Missing data (absent headers, cookies, keys, unauthenticated requests) is
/// never an error. Only malformed data handed over by the integrating
/// framework ends up here.
#[derive(Debug)]
pub enum Error {
    /// The collaborator broke the snapshot contract
    Contract(ContractViolation),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Contract(v) => write!(f, "Contract violation: {}", v),
        }
    }
}

impl std::error::Error for Error {}

impl From<ContractViolation> for Error {
    fn from(v: ContractViolation) -> Self {
        Error::Contract(v)
    }
}

/// A contract violation with details about which part of the snapshot was malformed.
#[derive(Debug)]
pub struct ContractViolation {
    /// The kind of violation that occurred
    pub kind: ContractViolationKind,
    /// Human-readable message explaining the violation
    pub message: String,
}

impl ContractViolation {
    /// Creates a new violation.
    pub fn new(kind: ContractViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates a violation and records it as a `warn` event.
    pub(crate) fn logged(kind: ContractViolationKind, message: impl Into<String>) -> Self {
        let violation = Self::new(kind, message);
        tracing::warn!(
            kind = %violation.kind,
            message = %violation.message,
            "request snapshot contract violated"
        );
        violation
    }
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ContractViolation {}

/// The kind of contract violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractViolationKind {
    /// The payload was neither a JSON object nor null
    PayloadNotObject,
    /// Authentication credentials were neither a JSON object nor null
    CredentialsNotObject,
    /// The request URL was not absolute or had no host
    InvalidUrl,
    /// A header name was empty or contained non-token characters
    InvalidHeaderName,
}

impl fmt::Display for ContractViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractViolationKind::PayloadNotObject => write!(f, "payload is not an object"),
            ContractViolationKind::CredentialsNotObject => {
                write!(f, "credentials are not an object")
            }
            ContractViolationKind::InvalidUrl => write!(f, "invalid request URL"),
            ContractViolationKind::InvalidHeaderName => write!(f, "invalid header name"),
        }
    }
}
