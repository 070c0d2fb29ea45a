//! On-disk encoding of snapshot and settings documents.

mod document;

pub use document::{DocumentError, decode_document, encode_document};
