//! Snapshot storage port
//!
//! Each store owns one whole-document snapshot. Loading distinguishes a
//! missing document from an unreadable one so the store can establish the
//! file in the first case and fail soft in the second.

use thiserror::Error;

/// Errors raised while reading or writing a snapshot.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SnapshotError {
    /// The document exists but could not be decoded.
    #[error("malformed snapshot at {location}: {message}")]
    Malformed {
        /// Where the snapshot lives.
        location: String,
        /// Decoder message.
        message: String,
    },

    /// The snapshot could not be encoded.
    #[error("failed to encode snapshot: {0}")]
    Encode(String),

    /// Reading or writing the backing medium failed.
    #[error("I/O error at {location}: {message}")]
    Io {
        /// Where the snapshot lives.
        location: String,
        /// Underlying error message.
        message: String,
    },
}

/// Port for a whole-document snapshot of type `T`.
///
/// Writes are synchronous and replace the entire document.
pub trait SnapshotStorage<T>: Send + Sync {
    /// Reads the snapshot. `Ok(None)` means no document exists yet.
    ///
    /// # Errors
    ///
    /// Returns `Malformed` if the document cannot be decoded, `Io` if it
    /// cannot be read.
    fn load(&self) -> Result<Option<T>, SnapshotError>;

    /// Replaces the snapshot with `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails. A failed write must
    /// leave the previously stored document intact.
    fn store(&self, snapshot: &T) -> Result<(), SnapshotError>;

    /// Human-readable location, used in logs.
    fn location(&self) -> String;
}
