//! The saved-request library: both stores plus change notification.

use std::sync::Arc;

use courier_domain::{CourierSettings, Folder, FolderPatch, Id, RequestPatch, SavedRequest};
use parking_lot::Mutex;
use tokio::sync::watch;

use super::{FolderStore, RequestStore};
use crate::error::StoreError;
use crate::tree::TreeComposer;

/// Library shared between panels and the sidebar.
pub type SharedLibrary = Arc<Mutex<Library>>;

/// Folders and requests behind one handle.
///
/// Every mutation that changes memory bumps a revision on a watch channel,
/// including ones whose snapshot write failed. Subscribers refresh their
/// whole tree on change.
pub struct Library {
    folders: FolderStore,
    requests: RequestStore,
    default_folder_name: String,
    revision: watch::Sender<u64>,
}

impl Library {
    /// Bundles two opened stores.
    #[must_use]
    pub fn new(folders: FolderStore, requests: RequestStore) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            folders,
            requests,
            default_folder_name: CourierSettings::default().default_folder_name,
            revision,
        }
    }

    /// Applies naming settings to this library and its request store.
    #[must_use]
    pub fn with_settings(mut self, settings: &CourierSettings) -> Self {
        self.requests = self
            .requests
            .with_naming(&settings.untitled_request_name, &settings.copy_suffix);
        self.default_folder_name.clone_from(&settings.default_folder_name);
        self
    }

    /// Wraps the library for sharing.
    #[must_use]
    pub fn shared(self) -> SharedLibrary {
        Arc::new(Mutex::new(self))
    }

    /// Subscribes to revision bumps.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Current revision.
    #[must_use]
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Read access to the folder store.
    #[must_use]
    pub const fn folders(&self) -> &FolderStore {
        &self.folders
    }

    /// Read access to the request store.
    #[must_use]
    pub const fn requests(&self) -> &RequestStore {
        &self.requests
    }

    /// A composer over the current contents.
    #[must_use]
    pub const fn tree(&self) -> TreeComposer<'_> {
        TreeComposer::new(&self.folders, &self.requests)
    }

    /// Name used when a save needs a folder and none exists.
    #[must_use]
    pub fn default_folder_name(&self) -> &str {
        &self.default_folder_name
    }

    /// Creates a folder.
    ///
    /// # Errors
    ///
    /// See [`FolderStore::create`].
    pub fn create_folder(
        &mut self,
        name: impl Into<String>,
        parent_id: Option<Id>,
    ) -> Result<Folder, StoreError> {
        let result = self.folders.create(name, parent_id);
        self.bump_unless_missing(&result);
        result
    }

    /// Renames a folder.
    ///
    /// # Errors
    ///
    /// See [`FolderStore::update`].
    pub fn rename_folder(&mut self, id: &str, name: impl Into<String>) -> Result<Folder, StoreError> {
        let result = self.folders.update(id, FolderPatch::rename(name));
        self.bump_unless_missing(&result);
        result
    }

    /// Deletes a folder subtree. With `purge_requests`, requests filed under
    /// any removed folder go too; otherwise they are left dangling.
    ///
    /// # Errors
    ///
    /// Returns the first write failure; later steps still run.
    pub fn delete_folder(&mut self, id: &str, purge_requests: bool) -> Result<bool, StoreError> {
        let doomed = if purge_requests {
            self.folders.subtree(id)
        } else {
            Vec::new()
        };
        let folder_result = self.folders.delete(id);
        if matches!(folder_result, Ok(false)) {
            return Ok(false);
        }
        let mut first_error = folder_result.err();
        for folder_id in &doomed {
            if let Err(error) = self.requests.delete_by_folder(folder_id) {
                first_error.get_or_insert(error);
            }
        }
        self.bump();
        first_error.map_or(Ok(true), Err)
    }

    /// Creates a request.
    ///
    /// # Errors
    ///
    /// See [`RequestStore::create`].
    pub fn create_request(&mut self, patch: RequestPatch) -> Result<SavedRequest, StoreError> {
        let result = self.requests.create(patch);
        self.bump_unless_missing(&result);
        result
    }

    /// Updates a request.
    ///
    /// # Errors
    ///
    /// See [`RequestStore::update`].
    pub fn update_request(
        &mut self,
        id: &str,
        patch: RequestPatch,
    ) -> Result<SavedRequest, StoreError> {
        let result = self.requests.update(id, patch);
        self.bump_unless_missing(&result);
        result
    }

    /// Renames a request.
    ///
    /// # Errors
    ///
    /// See [`RequestStore::update`].
    pub fn rename_request(
        &mut self,
        id: &str,
        name: impl Into<String>,
    ) -> Result<SavedRequest, StoreError> {
        self.update_request(id, RequestPatch::new().with_name(name))
    }

    /// Deletes a request.
    ///
    /// # Errors
    ///
    /// See [`RequestStore::delete`].
    pub fn delete_request(&mut self, id: &str) -> Result<bool, StoreError> {
        let result = self.requests.delete(id);
        if !matches!(result, Ok(false)) {
            self.bump();
        }
        result
    }

    /// Copies a request.
    ///
    /// # Errors
    ///
    /// See [`RequestStore::copy`].
    pub fn copy_request(&mut self, id: &str) -> Result<SavedRequest, StoreError> {
        let result = self.requests.copy(id);
        self.bump_unless_missing(&result);
        result
    }

    fn bump_unless_missing<T>(&self, result: &Result<T, StoreError>) {
        if !matches!(result, Err(StoreError::NotFound { .. })) {
            self.bump();
        }
    }

    fn bump(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::{MemorySnapshot, fixed_clock};

    fn library() -> Library {
        let clock = fixed_clock();
        Library::new(
            FolderStore::open(Box::new(MemorySnapshot::empty()), Arc::clone(&clock)),
            RequestStore::open(Box::new(MemorySnapshot::empty()), clock),
        )
    }

    #[test]
    fn test_mutations_bump_revision() {
        let mut library = library();
        let rx = library.subscribe();
        let folder = library.create_folder("A", None).unwrap();
        library
            .create_request(RequestPatch::new().in_folder(folder.id.clone()))
            .unwrap();
        assert_eq!(*rx.borrow(), 2);

        assert!(library.rename_folder("missing", "x").is_err());
        assert!(!library.delete_request("missing").unwrap());
        assert_eq!(library.revision(), 2);
    }

    #[test]
    fn test_delete_folder_without_purge_orphans_requests() {
        let mut library = library();
        let folder = library.create_folder("A", None).unwrap();
        let request = library
            .create_request(RequestPatch::new().in_folder(folder.id.clone()))
            .unwrap();

        assert!(library.delete_folder(&folder.id, false).unwrap());

        let orphan = library.requests().get(&request.id).unwrap();
        assert_eq!(orphan.folder_id.as_deref(), Some(folder.id.as_str()));
        assert!(library.tree().roots().is_empty());
    }

    #[test]
    fn test_delete_folder_with_purge_removes_nested_requests() {
        let mut library = library();
        let root = library.create_folder("root", None).unwrap();
        let child = library.create_folder("child", Some(root.id.clone())).unwrap();
        library
            .create_request(RequestPatch::new().in_folder(child.id.clone()))
            .unwrap();
        let keep = library.create_request(RequestPatch::new()).unwrap();

        assert!(library.delete_folder(&root.id, true).unwrap());

        assert_eq!(library.requests().len(), 1);
        assert!(library.requests().get(&keep.id).is_some());
    }

    #[test]
    fn test_settings_apply_to_request_naming() {
        let settings = CourierSettings {
            untitled_request_name: "untitled".into(),
            default_folder_name: "Inbox".into(),
            ..CourierSettings::default()
        };
        let mut library = library().with_settings(&settings);
        assert_eq!(library.default_folder_name(), "Inbox");
        let request = library.create_request(RequestPatch::new()).unwrap();
        assert_eq!(request.name, "untitled");
    }
}
