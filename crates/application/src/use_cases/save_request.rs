//! Explicit save from a panel.

use courier_domain::{Folder, Id, RequestDraft, SavedRequest};

use crate::ApplicationResult;
use crate::store::SharedLibrary;

/// Input for saving the panel form.
#[derive(Debug, Clone)]
pub struct SaveRequestInput {
    /// Current form contents.
    pub draft: RequestDraft,
    /// Folder the panel was opened from, if any.
    pub panel_folder_id: Option<Id>,
}

/// Output from saving.
#[derive(Debug, Clone)]
pub struct SaveRequestOutput {
    /// The stored request.
    pub request: SavedRequest,
    /// True if a new request was created rather than updated.
    pub created: bool,
    /// The folder created to hold the request, if one had to be made.
    pub created_folder: Option<Folder>,
}

/// Use case for the save action.
///
/// A draft that already has an id is updated in place and keeps its stored
/// name. A new draft goes into the panel's folder if it still exists, else
/// the first folder in the store, else a freshly created default folder.
pub struct SaveRequest {
    library: SharedLibrary,
}

impl SaveRequest {
    /// Creates a new `SaveRequest` use case.
    #[must_use]
    pub const fn new(library: SharedLibrary) -> Self {
        Self { library }
    }

    /// Saves the draft.
    ///
    /// # Errors
    ///
    /// Returns a store error if the request to update no longer exists or a
    /// snapshot write fails.
    pub fn execute(&self, input: SaveRequestInput) -> ApplicationResult<SaveRequestOutput> {
        let mut library = self.library.lock();

        if let Some(id) = input.draft.id.as_deref() {
            let request = library.update_request(id, input.draft.content_patch())?;
            tracing::info!(%id, name = %request.name, "updated request");
            return Ok(SaveRequestOutput {
                request,
                created: false,
                created_folder: None,
            });
        }

        let existing = input
            .panel_folder_id
            .as_deref()
            .and_then(|id| library.folders().get(id))
            .or_else(|| library.folders().all().next())
            .map(|folder| folder.id.clone());

        let (folder_id, created_folder) = match existing {
            Some(id) => (id, None),
            None => {
                let name = library.default_folder_name().to_string();
                let folder = library.create_folder(name, None)?;
                (folder.id.clone(), Some(folder))
            }
        };

        let patch = input
            .draft
            .content_patch()
            .with_name(input.draft.name.clone())
            .in_folder(folder_id);
        let request = library.create_request(patch)?;
        tracing::info!(id = %request.id, name = %request.name, "saved new request");

        Ok(SaveRequestOutput {
            request,
            created: true,
            created_folder,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::memory_library;
    use courier_domain::RequestPatch;
    use pretty_assertions::assert_eq;

    fn draft(name: &str) -> RequestDraft {
        RequestDraft {
            name: name.into(),
            method: "GET".into(),
            url: "https://x.test".into(),
            ..RequestDraft::default()
        }
    }

    #[test]
    fn test_new_request_without_folders_creates_default_folder() {
        let library = memory_library();
        let output = SaveRequest::new(library.clone())
            .execute(SaveRequestInput {
                draft: draft("Ping"),
                panel_folder_id: None,
            })
            .unwrap();

        let library = library.lock();
        assert!(output.created);
        assert_eq!(library.folders().len(), 1);
        assert_eq!(library.requests().len(), 1);
        let folder = output.created_folder.unwrap();
        assert_eq!(folder.name, "Default Folder");
        assert_eq!(output.request.folder_id.as_deref(), Some(folder.id.as_str()));
        assert_eq!(output.request.name, "Ping");
    }

    #[test]
    fn test_new_request_prefers_existing_panel_folder() {
        let library = memory_library();
        let (_, second) = {
            let mut lib = library.lock();
            let first = lib.create_folder("first", None).unwrap();
            let second = lib.create_folder("second", None).unwrap();
            (first, second)
        };
        let save = SaveRequest::new(library.clone());

        let output = save
            .execute(SaveRequestInput {
                draft: draft("a"),
                panel_folder_id: Some(second.id.clone()),
            })
            .unwrap();
        assert_eq!(output.request.folder_id, Some(second.id));
        assert!(output.created_folder.is_none());
    }

    #[test]
    fn test_missing_panel_folder_falls_back_to_first_in_store() {
        let library = memory_library();
        let zeta = library.lock().create_folder("zeta", None).unwrap();
        library.lock().create_folder("alpha", None).unwrap();

        let output = SaveRequest::new(library)
            .execute(SaveRequestInput {
                draft: draft("a"),
                panel_folder_id: Some("deleted".into()),
            })
            .unwrap();
        assert_eq!(output.request.folder_id, Some(zeta.id));
    }

    #[test]
    fn test_existing_request_updates_in_place_keeping_name() {
        let library = memory_library();
        let stored = library
            .lock()
            .create_request(RequestPatch::new().with_name("Original"))
            .unwrap();
        let mut edited = RequestDraft::from(&stored);
        edited.name = "Renamed in form".into();
        edited.method = "POST".into();

        let output = SaveRequest::new(library.clone())
            .execute(SaveRequestInput {
                draft: edited,
                panel_folder_id: None,
            })
            .unwrap();

        assert!(!output.created);
        assert_eq!(output.request.id, stored.id);
        assert_eq!(output.request.name, "Original");
        assert_eq!(output.request.method, "POST");
        assert_eq!(library.lock().requests().len(), 1);
    }
}
