//! Application error types

use courier_domain::{CommandParseError, DomainError, Id};
use thiserror::Error;

use crate::ports::SnapshotError;

/// Errors reported by the folder and request stores.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No entity has the given id.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// `"folder"` or `"request"`.
        kind: &'static str,
        /// The missing id.
        id: Id,
    },

    /// The mutation applied in memory but the snapshot write failed.
    #[error("failed to write {location}: {source}")]
    Write {
        /// Snapshot location.
        location: String,
        /// Underlying failure.
        #[source]
        source: SnapshotError,
    },
}

impl StoreError {
    /// Creates a `NotFound` for a folder.
    #[must_use]
    pub fn folder_not_found(id: impl Into<Id>) -> Self {
        Self::NotFound {
            kind: "folder",
            id: id.into(),
        }
    }

    /// Creates a `NotFound` for a request.
    #[must_use]
    pub fn request_not_found(id: impl Into<Id>) -> Self {
        Self::NotFound {
            kind: "request",
            id: id.into(),
        }
    }

    /// Returns true for `NotFound`.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// A store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A pasted command could not be parsed.
    #[error(transparent)]
    Parse(#[from] CommandParseError),

    /// The operation needs a persisted id and none was given.
    #[error("request has no id")]
    MissingId,

    /// An import needs a target folder and none exists.
    #[error("no folder available to import into")]
    NoTargetFolder,
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
