//! Folder store backed by the `directories.json` snapshot.

use std::cmp::Ordering;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use courier_domain::{Folder, FolderIdGenerator, FolderPatch, FolderSnapshot, Id};
use indexmap::IndexMap;

use crate::error::StoreError;
use crate::ports::{Clock, SnapshotError, SnapshotStorage};

/// Orders folder names the way the sidebar shows them: case-folded first,
/// then by the exact text so the order is total.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// In-memory folder map mirrored to a whole-document snapshot.
///
/// Every successful mutation rewrites the snapshot. When a write fails the
/// in-memory map keeps the change and the next successful write reconciles
/// storage.
pub struct FolderStore {
    folders: IndexMap<Id, Folder>,
    storage: Box<dyn SnapshotStorage<FolderSnapshot>>,
    clock: Arc<dyn Clock>,
    ids: FolderIdGenerator,
}

impl FolderStore {
    /// Loads the snapshot, establishing an empty one if none exists.
    ///
    /// A malformed or unreadable snapshot is logged and treated as empty.
    pub fn open(storage: Box<dyn SnapshotStorage<FolderSnapshot>>, clock: Arc<dyn Clock>) -> Self {
        let location = storage.location();
        let folders = match storage.load() {
            Ok(Some(FolderSnapshot(folders))) => {
                tracing::debug!(%location, count = folders.len(), "loaded folders");
                folders
            }
            Ok(None) => {
                tracing::info!(%location, "no folder snapshot, creating an empty one");
                if let Err(error) = storage.store(&FolderSnapshot::default()) {
                    tracing::error!(%location, %error, "failed to establish folder snapshot");
                }
                IndexMap::new()
            }
            Err(error @ SnapshotError::Malformed { .. }) => {
                tracing::warn!(%location, %error, "ignoring malformed folder snapshot");
                IndexMap::new()
            }
            Err(error) => {
                tracing::error!(%location, %error, "failed to read folder snapshot");
                IndexMap::new()
            }
        };

        let mut ids = FolderIdGenerator::new();
        for id in folders.keys() {
            ids.observe(id);
        }

        Self {
            folders,
            storage,
            clock,
            ids,
        }
    }

    /// Creates a folder under `parent_id` (or at the root).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Write` if the snapshot could not be written; the
    /// folder still exists in memory.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        parent_id: Option<Id>,
    ) -> Result<Folder, StoreError> {
        let now = self.clock.now();
        let id = self.ids.next_id(now);
        let folder = Folder::new(id.clone(), name, parent_id, now);
        self.folders.insert(id, folder.clone());
        tracing::debug!(id = %folder.id, name = %folder.name, "created folder");
        self.flush()?;
        Ok(folder)
    }

    /// Applies `patch` to an existing folder and stamps `updatedAt`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` without writing if `id` is absent, or
    /// `StoreError::Write` if the snapshot could not be written.
    pub fn update(&mut self, id: &str, patch: FolderPatch) -> Result<Folder, StoreError> {
        let now = self.clock.now();
        let folder = self
            .folders
            .get_mut(id)
            .ok_or_else(|| StoreError::folder_not_found(id))?;
        patch.apply(folder, now);
        let folder = folder.clone();
        self.flush()?;
        Ok(folder)
    }

    /// Renames a folder.
    ///
    /// # Errors
    ///
    /// See [`FolderStore::update`].
    pub fn rename(&mut self, id: &str, name: impl Into<String>) -> Result<Folder, StoreError> {
        self.update(id, FolderPatch::rename(name))
    }

    /// Deletes a folder and every transitive descendant folder.
    ///
    /// Requests are never touched. Returns `Ok(false)` without writing if
    /// `id` is absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Write` if the snapshot could not be written.
    pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        if !self.folders.contains_key(id) {
            return Ok(false);
        }
        let doomed = self.subtree(id);
        for folder_id in &doomed {
            self.folders.shift_remove(folder_id);
        }
        tracing::debug!(%id, removed = doomed.len(), "deleted folder subtree");
        self.flush()?;
        Ok(true)
    }

    /// Returns `id` followed by every transitive descendant, breadth-first.
    ///
    /// Cycles in `parentId` links are visited once.
    #[must_use]
    pub fn subtree(&self, id: &str) -> Vec<Id> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::from([id.to_string()]);
        while let Some(current) = queue.pop_front() {
            if !seen.insert(current.clone()) {
                continue;
            }
            queue.extend(
                self.folders
                    .values()
                    .filter(|f| f.parent_id.as_deref() == Some(current.as_str()))
                    .map(|f| f.id.clone()),
            );
            order.push(current);
        }
        order
    }

    /// Looks up a folder.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Folder> {
        self.folders.get(id)
    }

    /// Returns true if the folder exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.folders.contains_key(id)
    }

    /// All folders in store order.
    pub fn all(&self) -> impl Iterator<Item = &Folder> {
        self.folders.values()
    }

    /// Direct child folders of `parent_id`, in store order.
    pub fn children<'a>(&'a self, parent_id: &'a str) -> impl Iterator<Item = &'a Folder> + 'a {
        self.folders
            .values()
            .filter(move |f| f.parent_id.as_deref() == Some(parent_id))
    }

    /// Root folders sorted by name.
    #[must_use]
    pub fn roots(&self) -> Vec<&Folder> {
        let mut roots: Vec<_> = self.folders.values().filter(|f| f.is_root()).collect();
        roots.sort_by(|a, b| compare_names(&a.name, &b.name));
        roots
    }

    /// Number of folders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.folders.len()
    }

    /// Returns true if there are no folders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    fn flush(&self) -> Result<(), StoreError> {
        let location = self.storage.location();
        self.storage
            .store(&FolderSnapshot(self.folders.clone()))
            .map_err(|source| {
                tracing::error!(%location, error = %source, "failed to write folder snapshot");
                StoreError::Write { location, source }
            })
    }
}
