//! Storage directory resolution and library bootstrap.
//!
//! Lookup order: explicit path (CLI flag), `COURIER_STORAGE_DIR`, the
//! `storage_dir` setting, then `<data dir>/courier`.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use courier_application::ports::Clock;
use courier_application::{FolderStore, Library, RequestStore, SharedLibrary};
use courier_domain::CourierSettings;

use super::JsonFileSnapshot;

/// Environment variable overriding the storage directory.
pub const STORAGE_DIR_ENV: &str = "COURIER_STORAGE_DIR";

/// File holding the folder map.
pub const FOLDERS_FILE: &str = "directories.json";

/// File holding the request array.
pub const REQUESTS_FILE: &str = "requests.json";

/// Error type for storage directory operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageDirError {
    /// No override was given and the platform has no data directory.
    #[error("Could not determine data directory")]
    NoDataDir,

    /// The directory could not be created.
    #[error("Could not create storage directory {path}: {source}")]
    Create {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// The per-installation directory holding both snapshot files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageDir {
    root: PathBuf,
}

impl StorageDir {
    /// Uses `root` as is.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves the directory from the flag, the environment and settings.
    ///
    /// # Errors
    ///
    /// Returns `NoDataDir` when nothing is configured and the platform
    /// data directory is unknown.
    pub fn resolve(
        flag: Option<PathBuf>,
        settings: &CourierSettings,
    ) -> Result<Self, StorageDirError> {
        Self::resolve_from(flag, std::env::var_os(STORAGE_DIR_ENV), settings)
    }

    fn resolve_from(
        flag: Option<PathBuf>,
        env: Option<OsString>,
        settings: &CourierSettings,
    ) -> Result<Self, StorageDirError> {
        let env = env.filter(|value| !value.is_empty()).map(PathBuf::from);
        flag.or(env)
            .or_else(|| settings.storage_dir.clone())
            .or_else(|| dirs::data_dir().map(|p| p.join("courier")))
            .map(Self::new)
            .ok_or(StorageDirError::NoDataDir)
    }

    /// The directory itself.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the folder snapshot.
    #[must_use]
    pub fn folders_path(&self) -> PathBuf {
        self.root.join(FOLDERS_FILE)
    }

    /// Path of the request snapshot.
    #[must_use]
    pub fn requests_path(&self) -> PathBuf {
        self.root.join(REQUESTS_FILE)
    }

    /// Creates the directory if needed and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn ensure(&self) -> Result<&Path, StorageDirError> {
        fs::create_dir_all(&self.root).map_err(|source| StorageDirError::Create {
            path: self.root.clone(),
            source,
        })?;
        Ok(&self.root)
    }
}

/// Opens both stores under `dir` and bundles them into a shared library.
///
/// Missing snapshot files are created empty; unreadable ones are logged and
/// the affected store starts empty.
///
/// # Errors
///
/// Returns an error if the storage directory cannot be created.
pub fn open_library(
    dir: &StorageDir,
    settings: &CourierSettings,
    clock: Arc<dyn Clock>,
) -> Result<SharedLibrary, StorageDirError> {
    dir.ensure()?;
    tracing::debug!(path = %dir.root().display(), "opening library");

    let folders = FolderStore::open(
        Box::new(JsonFileSnapshot::new(dir.folders_path())),
        Arc::clone(&clock),
    );
    let requests = RequestStore::open(Box::new(JsonFileSnapshot::new(dir.requests_path())), clock);

    Ok(Library::new(folders, requests)
        .with_settings(settings)
        .shared())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::adapters::SystemClock;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_flag_wins_over_env_and_settings() {
        let settings = CourierSettings {
            storage_dir: Some(PathBuf::from("/from/settings")),
            ..CourierSettings::default()
        };

        let dir = StorageDir::resolve_from(
            Some(PathBuf::from("/from/flag")),
            Some(OsString::from("/from/env")),
            &settings,
        )
        .unwrap();
        assert_eq!(dir.root(), Path::new("/from/flag"));

        let dir =
            StorageDir::resolve_from(None, Some(OsString::from("/from/env")), &settings).unwrap();
        assert_eq!(dir.root(), Path::new("/from/env"));

        let dir = StorageDir::resolve_from(None, Some(OsString::new()), &settings).unwrap();
        assert_eq!(dir.root(), Path::new("/from/settings"));
    }

    #[test]
    fn test_file_names() {
        let dir = StorageDir::new("/data");
        assert_eq!(dir.folders_path(), PathBuf::from("/data/directories.json"));
        assert_eq!(dir.requests_path(), PathBuf::from("/data/requests.json"));
    }

    #[test]
    fn test_open_library_establishes_both_files() {
        let temp = TempDir::new().unwrap();
        let dir = StorageDir::new(temp.path().join("store"));

        let library = open_library(&dir, &CourierSettings::default(), Arc::new(SystemClock)).unwrap();

        assert!(library.lock().folders().is_empty());
        assert_eq!(fs::read_to_string(dir.folders_path()).unwrap(), "{}\n");
        assert_eq!(fs::read_to_string(dir.requests_path()).unwrap(), "[]\n");
    }
}
