//! Error types for JMS Extender hooks.
//!
//! [`HookError`] is what a hook returns to reject the request that
//! triggered it. [`HostError`] is what the host side (configuration,
//! library loading, hook initialization) propagates with `?`.

use std::fmt;
use thiserror::Error;

type BoxedCause = Box<dyn std::error::Error + Send + Sync>;

/// Rejection raised by a hook method.
///
/// Carries a human-readable message, an optional machine-checkable code,
/// and an optional underlying cause. A returned `HookError` is terminal for
/// the triggering request; the host decides how it reaches the client.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HookError {
    message: String,
    code: Option<String>,
    #[source]
    source: Option<BoxedCause>,
}

impl HookError {
    /// Creates an error with only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            source: None,
        }
    }

    /// Creates an error with a message and an error code.
    pub fn with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: Some(code.into()),
            source: None,
        }
    }

    /// Creates an error with a message and an underlying cause.
    ///
    /// The cause may be any error value or an already boxed one.
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxedCause>) -> Self {
        Self {
            message: message.into(),
            code: None,
            source: Some(source.into()),
        }
    }

    /// Creates an error with a message, an error code, and an underlying cause.
    pub fn with_code_and_source(
        message: impl Into<String>,
        code: impl Into<String>,
        source: impl Into<BoxedCause>,
    ) -> Self {
        Self {
            message: message.into(),
            code: Some(code.into()),
            source: Some(source.into()),
        }
    }

    /// Returns the detail message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the error code, if one was given.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Returns whether an underlying cause is attached.
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }
}

impl Clone for HookError {
    /// Clones message and code. The cause is not clonable and is dropped.
    fn clone(&self) -> Self {
        Self {
            message: self.message.clone(),
            code: self.code.clone(),
            source: None,
        }
    }
}

/// Category of a host-side failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Configuration could not be built or deserialized.
    Configuration,
    /// A hook failed its one-time initialization.
    Initialization,
    /// A hook library could not be loaded.
    Loading,
    /// File system I/O failed.
    Io,
    /// A record or scenario could not be (de)serialized.
    Serialization,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Initialization => write!(f, "INITIALIZATION"),
            Self::Loading => write!(f, "LOADING"),
            Self::Io => write!(f, "IO"),
            Self::Serialization => write!(f, "SERIALIZATION"),
        }
    }
}

/// Error propagated by the host side of the hook boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct HostError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<BoxedCause>,
}

impl HostError {
    /// Create a new host error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new host error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an initialization error.
    pub fn initialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Initialization, message)
    }

    /// Create a loading error.
    pub fn loading(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Loading, message)
    }
}

impl From<HookError> for HostError {
    fn from(err: HookError) -> Self {
        let message = match err.code() {
            Some(code) => format!("Hook initialization failed [{code}]: {}", err.message()),
            None => format!("Hook initialization failed: {}", err.message()),
        };
        Self::with_source(ErrorKind::Initialization, message, err)
    }
}

impl From<serde_json::Error> for HostError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for HostError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Io, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for HostError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_message_only() {
        let err = HookError::new("denied");
        assert_eq!(err.message(), "denied");
        assert_eq!(err.code(), None);
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "denied");
    }

    #[test]
    fn test_message_and_code() {
        let err = HookError::with_code("bad creds", "AUTH_001");
        assert_eq!(err.message(), "bad creds");
        assert_eq!(err.code(), Some("AUTH_001"));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_message_and_source() {
        let cause = std::io::Error::new(std::io::ErrorKind::NotFound, "users.db missing");
        let err = HookError::with_source("lookup failed", cause);
        assert_eq!(err.code(), None);
        let source = err.source().expect("source kept");
        assert_eq!(source.to_string(), "users.db missing");
    }

    #[test]
    fn test_message_code_and_source() {
        let cause = std::io::Error::other("ldap unreachable");
        let err = HookError::with_code_and_source("auth backend down", "AUTH_503", cause);
        assert_eq!(err.message(), "auth backend down");
        assert_eq!(err.code(), Some("AUTH_503"));
        assert!(err.has_source());
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("ldap unreachable"));
    }

    #[test]
    fn test_boxed_cause_is_accepted() {
        let cause: BoxedCause = Box::new(std::io::Error::other("broker refused"));
        let err = HookError::with_code_and_source("connect failed", "BRK_01", cause);
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("broker refused"));

        let err = HookError::with_source("principal rejected", "unknown realm");
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("unknown realm"));
    }

    #[test]
    fn test_clone_drops_source_keeps_code() {
        let err = HookError::with_code_and_source("x", "C1", std::io::Error::other("inner"));
        let cloned = err.clone();
        assert_eq!(cloned.code(), Some("C1"));
        assert!(!cloned.has_source());
    }

    #[test]
    fn test_host_error_from_hook_error_keeps_code() {
        let host: HostError = HookError::with_code("no license file", "INIT_02").into();
        assert_eq!(host.kind, ErrorKind::Initialization);
        assert!(host.message.contains("INIT_02"));
        assert!(host.message.contains("no license file"));
        assert!(host.source.is_some());
    }

    #[test]
    fn test_host_error_display() {
        let err = HostError::loading("symbol missing");
        assert_eq!(err.to_string(), "LOADING: symbol missing");
    }
}
