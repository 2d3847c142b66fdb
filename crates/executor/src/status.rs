//! Status translation.
//!
//! Maps a client [`Status`] onto the host's failure vocabulary. The match in
//! [`translate`] is exhaustive over [`StatusKind`]; a new kind fails to
//! compile here instead of falling through.

use std::fmt;

use kvbridge_core::{Status, StatusKind};
use serde::{Deserialize, Serialize};

/// Failure class reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// Transport failure or dead handle
    Connection,
    /// The addressed entity does not exist
    #[serde(rename = "notfound")]
    NotFound,
    /// Any other failure, including malformed replies
    Unknown,
}

impl FailureKind {
    /// Host-facing string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Connection => "connection",
            FailureKind::NotFound => "notfound",
            FailureKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Translated status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translated {
    /// The call succeeded
    Success,
    /// The call failed; the code is the client's diagnostic string
    Failure(FailureKind, String),
}

/// Translate a client status.
pub fn translate(status: Status) -> Translated {
    match status.kind() {
        StatusKind::Ok => Translated::Success,
        StatusKind::Error => Translated::Failure(FailureKind::Connection, status.into_code()),
        StatusKind::NotFound => Translated::Failure(FailureKind::NotFound, status.into_code()),
        StatusKind::Other => Translated::Failure(FailureKind::Unknown, status.into_code()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_ok() {
        assert_eq!(translate(Status::ok()), Translated::Success);
    }

    #[test]
    fn test_translate_every_failure_kind() {
        let cases = [
            ("error", FailureKind::Connection),
            ("not_found", FailureKind::NotFound),
            ("fail", FailureKind::Unknown),
            ("client_error", FailureKind::Unknown),
            ("", FailureKind::Unknown),
        ];
        for (code, kind) in cases {
            assert_eq!(
                translate(Status::from_code(code)),
                Translated::Failure(kind, code.to_string()),
                "code {:?}",
                code
            );
        }
    }

    #[test]
    fn test_failure_kind_strings() {
        assert_eq!(FailureKind::Connection.to_string(), "connection");
        assert_eq!(FailureKind::NotFound.to_string(), "notfound");
        assert_eq!(FailureKind::Unknown.to_string(), "unknown");
        assert_eq!(
            serde_json::to_string(&FailureKind::NotFound).unwrap(),
            "\"notfound\""
        );
    }
}
