//! Unified error types for the system registry.
//!
//! Every failure that leaves the service layer is one of four kinds: an unparseable
//! identifier, a validation failure, a missing record, or a store failure. The
//! remaining variants only occur while the process starts up.

use thiserror::Error;

/// Boxed cause kept on store failures for diagnostics.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error vocabulary surfaced by the service and store layers.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller-supplied identifier is not a canonical UUID string.
    #[error("Invalid system identifier: {value:?}")]
    InvalidIdentifier {
        /// The rejected input, verbatim
        value: String,
    },

    /// A required field is missing, empty, or malformed.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// External (camelCase) name of the offending field
        field: &'static str,
        /// Human-readable reason
        message: String,
    },

    /// No system exists with the requested identifier or name.
    #[error("System not found: {id}")]
    NotFound {
        /// Identifier (or name) that was looked up
        id: String,
    },

    /// The backing store failed, timed out, or rejected the statement.
    #[error("Store error: {message}")]
    Store {
        /// What the store was doing when it failed
        message: String,
        /// Underlying cause, for logs only
        #[source]
        source: Option<BoxError>,
    },

    /// Configuration could not be read or is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the problem
        message: String,
    },

    /// I/O error, e.g. while binding the listener.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wraps a store-level failure with a short description of the operation.
    pub fn store<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Store {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Shorthand for a validation failure on `field`.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// True for malformed caller input: a bad identifier or a failed validation.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidIdentifier { .. } | Self::Validation { .. })
    }
}

impl From<sea_orm::DbErr> for Error {
    fn from(value: sea_orm::DbErr) -> Self {
        Self::store("database operation failed", value)
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
