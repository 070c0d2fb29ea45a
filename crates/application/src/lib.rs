//! Courier Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for external dependencies)
//! - The folder and request stores behind a shared `Library`
//! - The per-panel request controller and auto-save machinery
//! - Use case orchestration

pub mod error;
pub mod execution;
pub mod form;
pub mod ports;
pub mod store;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod tree;
pub mod use_cases;

pub use error::{ApplicationError, ApplicationResult, StoreError};
pub use execution::{AutoSaver, DebounceTimer, RequestController, SendOutcome, prepare_request};
pub use form::FormState;
pub use ports::{
    CancellationReceiver, CancellationToken, Clock, CommandParser, HttpClient, HttpClientError,
    OutboundRequest, SnapshotError, SnapshotStorage,
};
pub use store::{FolderStore, Library, RequestStore, SharedLibrary};
pub use tree::TreeComposer;
pub use use_cases::{
    AutoSaveRequest, ImportCommand, ImportCommandInput, ImportCommandOutput, ImportTarget,
    LoadRequest, SaveRequest, SaveRequestInput, SaveRequestOutput, generate_request_name,
};
