//! Write-through persistence stores.

mod folders;
mod library;
mod requests;

pub use folders::{FolderStore, compare_names};
pub use library::{Library, SharedLibrary};
pub use requests::RequestStore;
