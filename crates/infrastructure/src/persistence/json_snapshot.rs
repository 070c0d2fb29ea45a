//! Whole-document JSON snapshots on the local file system.

use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use courier_application::ports::{SnapshotError, SnapshotStorage};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::serialization::{decode_document, encode_document};

/// A JSON document replaced in full on every store.
///
/// Writes go to a sibling temporary file that is then renamed over the
/// target, so a failed write leaves the previous document readable.
#[derive(Debug)]
pub struct JsonFileSnapshot<T> {
    path: PathBuf,
    _document: PhantomData<fn() -> T>,
}

impl<T> Clone for JsonFileSnapshot<T> {
    fn clone(&self) -> Self {
        Self::new(self.path.clone())
    }
}

impl<T> JsonFileSnapshot<T> {
    /// Creates a snapshot stored at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _document: PhantomData,
        }
    }

    /// Path of the document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, error: &std::io::Error) -> SnapshotError {
        SnapshotError::Io {
            location: self.path.display().to_string(),
            message: error.to_string(),
        }
    }
}

impl<T> SnapshotStorage<T> for JsonFileSnapshot<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<Option<T>, SnapshotError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(&e)),
        };

        decode_document(&bytes)
            .map(Some)
            .map_err(|e| SnapshotError::Malformed {
                location: self.location(),
                message: e.to_string(),
            })
    }

    fn store(&self, snapshot: &T) -> Result<(), SnapshotError> {
        let bytes = encode_document(snapshot).map_err(|e| SnapshotError::Encode(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(&e))?;
        }

        let temp = self.temp_path();
        fs::write(&temp, &bytes).map_err(|e| self.io_error(&e))?;
        if let Err(e) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(self.io_error(&e));
        }
        tracing::trace!(path = %self.path.display(), bytes = bytes.len(), "snapshot written");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use courier_domain::{FolderSnapshot, RequestSnapshot};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let snapshot = JsonFileSnapshot::<RequestSnapshot>::new(dir.path().join("requests.json"));
        assert!(snapshot.load().unwrap().is_none());
    }

    #[test]
    fn test_store_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("directories.json");
        let snapshot = JsonFileSnapshot::<FolderSnapshot>::new(&path);

        snapshot.store(&FolderSnapshot::default()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
        assert_eq!(snapshot.load().unwrap(), Some(FolderSnapshot::default()));
        assert!(!snapshot.temp_path().exists());
    }

    #[test]
    fn test_garbage_is_reported_as_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("requests.json");
        fs::write(&path, "[{not json").unwrap();

        let snapshot = JsonFileSnapshot::<RequestSnapshot>::new(&path);
        assert!(matches!(snapshot.load(), Err(SnapshotError::Malformed { .. })));
    }

    #[test]
    fn test_failed_write_keeps_previous_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("requests.json");
        fs::write(&path, "[]\n").unwrap();
        // A directory in the temp file's place makes the write fail.
        fs::create_dir(dir.path().join("requests.json.tmp")).unwrap();

        let snapshot = JsonFileSnapshot::<RequestSnapshot>::new(&path);
        assert!(matches!(
            snapshot.store(&RequestSnapshot::default()),
            Err(SnapshotError::Io { .. })
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]\n");
    }
}
