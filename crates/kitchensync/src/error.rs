//! Error types for kitchensync.
//!
//! This module defines the command-level error taxonomy: local failures that
//! never reach the remote store, remote failures surfaced by an adapter, and
//! configuration problems.

use thiserror::Error;

use crate::recipe::{DraftField, RecipeId};
use crate::store::RemoteError;

/// The main error type for kitchensync operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Local Command Errors ===
    /// A draft failed validation; no state was changed and the remote store
    /// was not contacted.
    #[error("invalid draft: {field} must not be empty")]
    Validation {
        /// The field that failed validation.
        field: DraftField,
    },

    /// A command requiring an authenticated identity ran without one.
    #[error("no authenticated session")]
    Unauthenticated,

    /// A delete targeted an id not present in local state.
    #[error("no record with id {id}")]
    NotFound {
        /// The requested identifier.
        id: RecipeId,
    },

    // === Remote Errors ===
    /// The remote store adapter reported a failure.
    #[error("remote operation failed: {0}")]
    Remote(#[from] RemoteError),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },
}

/// A specialized Result type for kitchensync operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a validation error for the given draft field.
    #[must_use]
    pub fn validation(field: DraftField) -> Self {
        Self::Validation { field }
    }

    /// Create a not-found error for the given id.
    #[must_use]
    pub fn not_found(id: RecipeId) -> Self {
        Self::NotFound { id }
    }

    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error is a draft validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this error is a missing-session failure.
    #[must_use]
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }

    /// Check if this error is a local not-found failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error came from the remote store adapter.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    /// The remote error, if this error came from the adapter.
    #[must_use]
    pub fn as_remote(&self) -> Option<&RemoteError> {
        match self {
            Self::Remote(err) => Some(err),
            _ => None,
        }
    }
}
