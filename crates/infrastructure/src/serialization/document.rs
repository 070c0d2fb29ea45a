//! Pretty JSON documents with a stable layout.
//!
//! Documents are written with 2-space indentation and a trailing newline so
//! hand edits and diffs of the storage files stay readable. Object order is
//! whatever the source type serializes, which keeps folder maps in insertion
//! order.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Failure to encode or decode a stored document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The value could not be written as JSON.
    #[error("cannot encode document: {0}")]
    Encode(serde_json::Error),

    /// The bytes are not a valid document of the expected shape.
    #[error("cannot decode document at line {line}, column {column}: {source}")]
    Decode {
        /// 1-based line of the failure.
        line: usize,
        /// 1-based column of the failure.
        column: usize,
        /// Underlying parser error.
        source: serde_json::Error,
    },
}

/// Encodes `value` as an indented document ending in a newline.
///
/// # Errors
///
/// Returns [`DocumentError::Encode`] if the value cannot be serialized.
pub fn encode_document<T: Serialize>(value: &T) -> Result<Vec<u8>, DocumentError> {
    let mut buffer = Vec::with_capacity(256);
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer).map_err(DocumentError::Encode)?;
    buffer.push(b'\n');
    Ok(buffer)
}

/// Decodes a document, accepting any whitespace layout.
///
/// # Errors
///
/// Returns [`DocumentError::Decode`] with the failing position.
pub fn decode_document<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DocumentError> {
    serde_json::from_slice(bytes).map_err(|source| DocumentError::Decode {
        line: source.line(),
        column: source.column(),
        source,
    })
}
