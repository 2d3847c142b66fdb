//! Client call status
//!
//! Every native client call produces a [`Status`]: one of ok, transport
//! error, not found, or something the bridge does not recognize, plus the
//! diagnostic code string reported by the client library.
//!
//! SSDB reports status as a code string. [`Status::from_code`] is the only
//! place that string is interpreted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome class of a native call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    /// The call succeeded
    Ok,
    /// The transport failed (connect, send, receive)
    Error,
    /// The addressed entity does not exist
    NotFound,
    /// Any other code (`fail`, `client_error`, ...)
    Other,
}

/// Status of one native call, with its diagnostic code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    kind: StatusKind,
    code: String,
}

impl Status {
    /// Code string for success
    pub const OK: &'static str = "ok";
    /// Code string for transport errors
    pub const ERROR: &'static str = "error";
    /// Code string for missing entities
    pub const NOT_FOUND: &'static str = "not_found";

    /// Classify a code string as reported by the client library.
    pub fn from_code(code: impl Into<String>) -> Self {
        let code = code.into();
        let kind = match code.as_str() {
            Self::OK => StatusKind::Ok,
            Self::ERROR => StatusKind::Error,
            Self::NOT_FOUND => StatusKind::NotFound,
            _ => StatusKind::Other,
        };
        Self { kind, code }
    }

    /// Successful status
    pub fn ok() -> Self {
        Self::from_code(Self::OK)
    }

    /// Transport error status
    pub fn error() -> Self {
        Self::from_code(Self::ERROR)
    }

    /// Not-found status
    pub fn not_found() -> Self {
        Self::from_code(Self::NOT_FOUND)
    }

    /// Outcome class
    pub fn kind(&self) -> StatusKind {
        self.kind
    }

    /// Diagnostic code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Consume into the diagnostic code
    pub fn into_code(self) -> String {
        self.code
    }

    /// Whether the call succeeded
    pub fn is_ok(&self) -> bool {
        self.kind == StatusKind::Ok
    }

    /// Whether the transport failed
    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }

    /// Whether the entity was missing
    pub fn is_not_found(&self) -> bool {
        self.kind == StatusKind::NotFound
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}
