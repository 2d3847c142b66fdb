//! Error types for the bridge.
//!
//! Store-side failures are not errors: they come back as
//! [`Reply::Failure`](crate::Reply::Failure) values. [`Error`] covers caller
//! mistakes and setup problems only:
//! - **Structured**: Each variant has typed fields for error details
//! - **Serializable**: Can be converted to/from JSON

use serde::{Deserialize, Serialize};

use crate::marshal::MarshalError;
use crate::registry::RegistryError;

/// Bridge errors.
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Caller | `UnknownOperation`, `Argument` | Bad operation name or argument |
/// | Setup | `Config`, `Registry` | Invalid configuration or operation tables |
/// | System | `Internal` | Bug or unexpected condition |
///
/// # Example
///
/// ```ignore
/// use kvbridge_executor::{Bridge, Error};
///
/// match bridge.call(handle, "get", &[Value::from("k")]) {
///     Ok(values) => { /* host convention */ }
///     Err(Error::Argument { slot, reason, .. }) => {
///         println!("bad argument #{}: {}", slot, reason);
///     }
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Caller Errors ====================
    /// No operation with this name is registered
    #[error("unknown operation: {name}")]
    UnknownOperation {
        /// Name the caller asked for
        name: String,
    },

    /// An argument failed validation or marshaling. `slot` is 1-based.
    #[error("bad argument #{slot} to '{operation}': {reason}")]
    Argument {
        /// Operation being called
        operation: String,
        /// 1-based argument position
        slot: usize,
        /// What was wrong with it
        reason: String,
    },

    // ==================== Setup Errors ====================
    /// Invalid configuration
    #[error("invalid config: {reason}")]
    Config {
        /// What was wrong
        reason: String,
    },

    /// Operation tables failed to build
    #[error("registry error: {0}")]
    Registry(RegistryError),

    // ==================== System Errors ====================
    /// Internal error (bug or unexpected condition)
    #[error("internal error: {reason}")]
    Internal {
        /// Diagnostic text
        reason: String,
    },
}

impl From<RegistryError> for Error {
    fn from(e: RegistryError) -> Self {
        Error::Registry(e)
    }
}

// Native argument mismatches inside a bound call are descriptor bugs, not
// caller mistakes; caller-facing marshal failures become `Argument` instead.
impl From<MarshalError> for Error {
    fn from(e: MarshalError) -> Self {
        Error::Internal {
            reason: format!("native argument: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_display() {
        let err = Error::Argument {
            operation: "get".into(),
            slot: 1,
            reason: "expected string, got bool".into(),
        };
        assert_eq!(
            err.to_string(),
            "bad argument #1 to 'get': expected string, got bool"
        );
    }

    #[test]
    fn test_error_serialization_roundtrip() {
        let err = Error::UnknownOperation {
            name: "frobnicate".into(),
        };
        let json = serde_json::to_string(&err).unwrap();
        let back: Error = serde_json::from_str(&json).unwrap();
        assert_eq!(err, back);
    }

    #[test]
    fn test_registry_error_converts() {
        let err: Error = RegistryError::DuplicateName { name: "get".into() }.into();
        assert!(matches!(err, Error::Registry(_)));
    }
}
