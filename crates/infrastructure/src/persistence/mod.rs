//! File-backed persistence.

mod json_snapshot;
mod settings_repository;
mod storage_dir;

pub use json_snapshot::JsonFileSnapshot;
pub use settings_repository::{SettingsError, SettingsRepository};
pub use storage_dir::{
    FOLDERS_FILE, REQUESTS_FILE, STORAGE_DIR_ENV, StorageDir, StorageDirError, open_library,
};
