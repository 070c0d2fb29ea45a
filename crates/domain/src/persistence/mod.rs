//! Persistence model: the records mirrored to the two snapshot files.

mod folder;
mod request;
mod snapshot;

pub use folder::{Folder, FolderPatch};
pub use request::{RequestPatch, SavedRequest};
pub use snapshot::{FolderSnapshot, RequestSnapshot};

/// Identifier type shared by folders and requests.
pub type Id = String;
