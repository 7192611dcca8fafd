//! Shared error types for the provisioning pipeline.
//!
//! This module provides structured error handling with:
//!
//! - Strongly-typed error kinds for the different failure categories
//! - Builder pattern for ergonomic error construction
//! - Type-safe error source tracking with boxed trait objects
//! - Integration with `thiserror` for automatic `Display` and `Error` trait implementations

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

/// Type alias for boxed errors that are Send + Sync.
///
/// This is the standard error boxing type used throughout the workspace for
/// error sources.
pub type BoxedError = Box<dyn StdError + Send + Sync>;

/// Result type alias for provisioning operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error kind enumeration for categorizing provisioning errors.
///
/// This enum represents the different categories of errors that can occur
/// while handling a provisioning request. It's separated from [`Error`] to
/// allow for pattern matching on error types without accessing the full
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or unresolvable descriptor document.
    Descriptor,
    /// External service communication errors.
    External,
    /// Remote answered outside of its documented contract.
    Protocol,
    /// Caller did not satisfy a guarding precondition.
    Precondition,
    /// Configuration-related errors.
    Config,
    /// Internal service logic errors.
    Internal,
}

impl ErrorKind {
    /// Returns the error kind as a string for categorization.
    ///
    /// Useful for metrics, logging, or error categorization.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Descriptor => "descriptor",
            Self::External => "external_service",
            Self::Protocol => "protocol",
            Self::Precondition => "precondition",
            Self::Config => "config",
            Self::Internal => "internal_service",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provisioning error with structured information.
///
/// This structure provides comprehensive error information including:
///
/// - Error kind for categorization
/// - Human-readable message
/// - Optional source error for error chaining
#[derive(Debug, thiserror::Error)]
#[error("{kind} error: {message}")]
pub struct Error {
    /// The error category/type
    kind: ErrorKind,
    /// Human-readable error message
    message: Cow<'static, str>,
    /// Optional underlying error that caused this error
    #[source]
    source: Option<BoxedError>,
}

impl Error {
    /// Creates a new [`Error`].
    #[inline]
    fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches a source error to this error, enabling error chain tracking.
    ///
    /// This method consumes the error and returns a new one with the source
    /// attached.
    #[inline]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error kind.
    #[must_use]
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[must_use]
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Creates a new descriptor error.
    #[inline]
    pub fn descriptor(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Descriptor, message)
    }

    /// Creates a new external service error.
    #[inline]
    pub fn external(
        service: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        let service_name = service.into();
        let msg = message.into();
        let full_message = format!("{}: {}", service_name, msg);
        Self::new(ErrorKind::External, full_message)
    }

    /// Creates a new protocol violation error.
    #[inline]
    pub fn protocol(
        service: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        let service_name = service.into();
        let msg = message.into();
        let full_message = format!("{}: {}", service_name, msg);
        Self::new(ErrorKind::Protocol, full_message)
    }

    /// Creates a new precondition error.
    #[inline]
    pub fn precondition(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Precondition, message)
    }

    /// Creates a new configuration error.
    #[inline]
    pub fn config(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    /// Creates a new internal service error.
    #[inline]
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}
