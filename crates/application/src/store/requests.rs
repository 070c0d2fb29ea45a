//! Request store backed by the `requests.json` snapshot.

use std::sync::Arc;

use courier_domain::{
    CourierSettings, RequestPatch, RequestSnapshot, SavedRequest, generate_request_id,
};

use crate::error::StoreError;
use crate::ports::{Clock, SnapshotError, SnapshotStorage};

/// In-memory request list mirrored to a whole-document snapshot.
pub struct RequestStore {
    requests: Vec<SavedRequest>,
    storage: Box<dyn SnapshotStorage<RequestSnapshot>>,
    clock: Arc<dyn Clock>,
    untitled_name: String,
    copy_suffix: String,
}

impl RequestStore {
    /// Loads the snapshot, establishing an empty one if none exists.
    ///
    /// A malformed or unreadable snapshot is logged and treated as empty.
    pub fn open(storage: Box<dyn SnapshotStorage<RequestSnapshot>>, clock: Arc<dyn Clock>) -> Self {
        let location = storage.location();
        let requests = match storage.load() {
            Ok(Some(RequestSnapshot(requests))) => {
                tracing::debug!(%location, count = requests.len(), "loaded requests");
                requests
            }
            Ok(None) => {
                tracing::info!(%location, "no request snapshot, creating an empty one");
                if let Err(error) = storage.store(&RequestSnapshot::default()) {
                    tracing::error!(%location, %error, "failed to establish request snapshot");
                }
                Vec::new()
            }
            Err(error @ SnapshotError::Malformed { .. }) => {
                tracing::warn!(%location, %error, "ignoring malformed request snapshot");
                Vec::new()
            }
            Err(error) => {
                tracing::error!(%location, %error, "failed to read request snapshot");
                Vec::new()
            }
        };

        let defaults = CourierSettings::default();
        Self {
            requests,
            storage,
            clock,
            untitled_name: defaults.untitled_request_name,
            copy_suffix: defaults.copy_suffix,
        }
    }

    /// Overrides the default name and the copy marker.
    #[must_use]
    pub fn with_naming(
        mut self,
        untitled_name: impl Into<String>,
        copy_suffix: impl Into<String>,
    ) -> Self {
        self.untitled_name = untitled_name.into();
        self.copy_suffix = copy_suffix.into();
        self
    }

    /// Creates a request from `patch`, filling defaults.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Write` if the snapshot could not be written; the
    /// request still exists in memory.
    pub fn create(&mut self, patch: RequestPatch) -> Result<SavedRequest, StoreError> {
        let mut id = generate_request_id();
        while self.get(&id).is_some() {
            id = generate_request_id();
        }
        let request = patch.into_request(id, &self.untitled_name, self.clock.now());
        self.requests.push(request.clone());
        tracing::debug!(id = %request.id, name = %request.name, "created request");
        self.flush()?;
        Ok(request)
    }

    /// Shallow-merges `patch` onto an existing request and stamps `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` without writing if `id` is absent, or
    /// `StoreError::Write` if the snapshot could not be written.
    pub fn update(&mut self, id: &str, patch: RequestPatch) -> Result<SavedRequest, StoreError> {
        let now = self.clock.now();
        let request = self
            .requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::request_not_found(id))?;
        patch.apply(request, now);
        let request = request.clone();
        self.flush()?;
        Ok(request)
    }

    /// Removes a request. Returns `Ok(false)` without writing if `id` is absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Write` if the snapshot could not be written.
    pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let before = self.requests.len();
        self.requests.retain(|r| r.id != id);
        if self.requests.len() == before {
            return Ok(false);
        }
        self.flush()?;
        Ok(true)
    }

    /// Removes every request filed directly under `folder_id`.
    ///
    /// Returns how many were removed; nothing is written when none were.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Write` if the snapshot could not be written.
    pub fn delete_by_folder(&mut self, folder_id: &str) -> Result<usize, StoreError> {
        let before = self.requests.len();
        self.requests
            .retain(|r| r.folder_id.as_deref() != Some(folder_id));
        let removed = before - self.requests.len();
        if removed > 0 {
            tracing::debug!(%folder_id, removed, "purged folder requests");
            self.flush()?;
        }
        Ok(removed)
    }

    /// Duplicates a request under a fresh id with the copy marker appended.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if `id` is absent, or
    /// `StoreError::Write` if the snapshot could not be written.
    pub fn copy(&mut self, id: &str) -> Result<SavedRequest, StoreError> {
        let source = self
            .get(id)
            .ok_or_else(|| StoreError::request_not_found(id))?;
        let name = format!("{}{}", source.name, self.copy_suffix);
        let patch = source.to_patch().with_name(name);
        self.create(patch)
    }

    /// Looks up a request.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SavedRequest> {
        self.requests.iter().find(|r| r.id == id)
    }

    /// All requests in store order.
    #[must_use]
    pub fn all(&self) -> &[SavedRequest] {
        &self.requests
    }

    /// Requests filed directly under `folder_id`, in store order.
    pub fn by_folder<'a>(&'a self, folder_id: &'a str) -> impl Iterator<Item = &'a SavedRequest> + 'a {
        self.requests
            .iter()
            .filter(move |r| r.folder_id.as_deref() == Some(folder_id))
    }

    /// Number of requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Returns true if there are no requests.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    fn flush(&self) -> Result<(), StoreError> {
        let location = self.storage.location();
        self.storage
            .store(&RequestSnapshot(self.requests.clone()))
            .map_err(|source| {
                tracing::error!(%location, error = %source, "failed to write request snapshot");
                StoreError::Write { location, source }
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::{MemorySnapshot, fixed_clock, manual_clock};
    use courier_domain::{HeaderEntry, Headers};
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn store() -> (RequestStore, MemorySnapshot<RequestSnapshot>) {
        let snapshot = MemorySnapshot::empty();
        let store = RequestStore::open(Box::new(snapshot.clone()), fixed_clock());
        (store, snapshot)
    }

    #[test]
    fn test_create_fills_defaults_and_flushes() {
        let (mut store, snapshot) = store();
        let request = store.create(RequestPatch::new()).unwrap();
        assert_eq!(request.name, "Untitled Request");
        assert_eq!(request.method, "GET");
        assert_eq!(request.url, "");
        assert_eq!(snapshot.current().unwrap().0, vec![request]);
    }

    #[test]
    fn test_create_ids_are_unique() {
        let (mut store, _) = store();
        let ids: HashSet<_> = (0..50)
            .map(|_| store.create(RequestPatch::new()).unwrap().id)
            .collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_update_missing_is_not_found_without_write() {
        let (mut store, snapshot) = store();
        store.create(RequestPatch::new().with_name("a")).unwrap();
        let before = snapshot.current();
        let writes = snapshot.writes();

        let error = store
            .update("missing", RequestPatch::new().with_url("https://x.test"))
            .unwrap_err();

        assert!(error.is_not_found());
        assert_eq!(snapshot.writes(), writes);
        assert_eq!(snapshot.current(), before);
    }

    #[test]
    fn test_copy_duplicates_fields_with_marker() {
        let (mut store, _) = store();
        let headers = Headers::from(vec![HeaderEntry::new("Accept", "*/*")]);
        let source = store
            .create(
                RequestPatch::new()
                    .with_name("Ping")
                    .with_method("POST")
                    .with_url("https://x.test")
                    .with_headers(headers)
                    .with_body(Some("{}".into()))
                    .in_folder("42"),
            )
            .unwrap();

        let copy = store.copy(&source.id).unwrap();
        let fetched = store.get(&copy.id).unwrap();

        assert_ne!(fetched.id, source.id);
        assert_eq!(fetched.name, "Ping (copy)");
        assert_eq!(fetched.method, source.method);
        assert_eq!(fetched.url, source.url);
        assert_eq!(fetched.headers, source.headers);
        assert_eq!(fetched.body, source.body);
        assert_eq!(fetched.folder_id, source.folder_id);
    }

    #[test]
    fn test_copy_and_update_stamp_current_time() {
        let clock = manual_clock();
        let mut store =
            RequestStore::open(Box::new(MemorySnapshot::empty()), Arc::new(clock.clone()));
        let source = store.create(RequestPatch::new().with_name("Ping")).unwrap();
        assert_eq!(source.created_at, source.updated_at);

        clock.advance(chrono::Duration::seconds(5));
        let copy = store.copy(&source.id).unwrap();
        assert!(copy.created_at > source.created_at);
        assert_eq!(copy.updated_at, copy.created_at);

        clock.advance(chrono::Duration::seconds(5));
        let updated = store
            .update(&source.id, RequestPatch::new().with_url("https://x.test"))
            .unwrap();
        assert_eq!(updated.created_at, source.created_at);
        assert!(updated.updated_at > copy.created_at);
        assert_eq!(store.get(&copy.id).unwrap().updated_at, copy.updated_at);
    }

    #[test]
    fn test_copy_missing_fails() {
        let (mut store, _) = store();
        assert!(store.copy("missing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_by_folder_and_delete_by_folder() {
        let (mut store, _) = store();
        store.create(RequestPatch::new().with_name("a").in_folder("1")).unwrap();
        store.create(RequestPatch::new().with_name("b").in_folder("2")).unwrap();
        store.create(RequestPatch::new().with_name("c").in_folder("1")).unwrap();

        let names: Vec<_> = store.by_folder("1").map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);

        assert_eq!(store.delete_by_folder("1").unwrap(), 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.delete_by_folder("1").unwrap(), 0);
    }

    #[test]
    fn test_delete_reports_whether_removed() {
        let (mut store, _) = store();
        let request = store.create(RequestPatch::new()).unwrap();
        assert!(store.delete(&request.id).unwrap());
        assert!(!store.delete(&request.id).unwrap());
    }

    #[test]
    fn test_custom_naming() {
        let (store, _) = store();
        let mut store = store.with_naming("untitled", " - copy");
        let request = store.create(RequestPatch::new()).unwrap();
        assert_eq!(request.name, "untitled");
        assert_eq!(store.copy(&request.id).unwrap().name, "untitled - copy");
    }
}
