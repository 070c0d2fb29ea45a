//! Courier Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod import;
pub mod persistence;
pub mod serialization;

pub use adapters::{ReqwestHttpClient, SystemClock};
pub use import::CurlParser;
pub use persistence::{
    FOLDERS_FILE, JsonFileSnapshot, REQUESTS_FILE, STORAGE_DIR_ENV, SettingsError,
    SettingsRepository, StorageDir, StorageDirError, open_library,
};
pub use serialization::{DocumentError, decode_document, encode_document};
