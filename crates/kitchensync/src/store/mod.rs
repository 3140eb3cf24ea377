//! Remote store abstraction for recipe records.
//!
//! This module defines the contract the synchronization core speaks to the
//! external document store through, along with the error kinds an adapter
//! can report. Two adapters are provided:
//!
//! - [`HttpStore`]: talks to the remote document service over REST.
//! - [`MemoryStore`]: in-process map, used for tests and offline operation.
//!
//! Adapters hold no record state between calls; the authoritative client
//! view lives in the synchronization core.

use thiserror::Error;

use crate::recipe::{OwnerId, Recipe, RecipeId};

mod http;
mod memory;

pub use http::HttpStore;
pub use memory::MemoryStore;

/// Errors reported by a remote store adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The remote service could not be reached.
    #[error("network failure: {0}")]
    Network(String),

    /// The operation did not complete within the adapter's time bound.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The remote service refused the operation for this identity.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Any other adapter failure.
    #[error("remote store error: {0}")]
    Unknown(String),
}

impl RemoteError {
    /// True if this error is a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// True if the remote refused the operation for this identity.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied(_))
    }

    /// True if the remote could not be reached at all.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, RemoteError>;

/// Contract for the remote document store holding recipe records.
///
/// All operations are asynchronous and may suspend on network I/O; none are
/// guaranteed to complete within bounded time. Implementations are stateless
/// between calls and perform no caching.
#[async_trait::async_trait]
pub trait RecipeStore: Send + Sync {
    /// Upsert a record by id.
    ///
    /// Idempotent: calling twice with the same record produces the same
    /// remote state.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] if the remote service cannot complete the
    /// write.
    async fn put(&self, record: &Recipe) -> Result<()>;

    /// All records owned by `owner`, in unspecified order.
    ///
    /// Ordering is the synchronization core's responsibility, not the
    /// adapter's.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] if the query cannot be completed.
    async fn list_by_owner(&self, owner: &OwnerId) -> Result<Vec<Recipe>>;

    /// Remove a record by id.
    ///
    /// Idempotent: deleting an id that does not exist is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] if the remote service cannot complete the
    /// removal.
    async fn delete(&self, id: RecipeId) -> Result<()>;
}
