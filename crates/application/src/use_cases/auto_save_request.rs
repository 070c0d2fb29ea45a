//! Silent save of edits to an already-saved request.

use courier_domain::{RequestDraft, SavedRequest};

use crate::error::{ApplicationError, StoreError};
use crate::store::SharedLibrary;
use crate::ApplicationResult;

/// Use case behind the auto-save timer.
pub struct AutoSaveRequest {
    library: SharedLibrary,
}

impl AutoSaveRequest {
    /// Creates a new `AutoSaveRequest` use case.
    #[must_use]
    pub const fn new(library: SharedLibrary) -> Self {
        Self { library }
    }

    /// Writes the draft's fields onto its stored request.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::MissingId` for a draft that was never
    /// saved, or a store error if the request is gone or the write fails.
    pub fn execute(&self, draft: &RequestDraft) -> ApplicationResult<SavedRequest> {
        let id = draft.id.as_deref().ok_or(ApplicationError::MissingId)?;
        let mut patch = draft.content_patch();
        if !draft.name.trim().is_empty() {
            patch = patch.with_name(draft.name.clone());
        }
        Ok(self.library.lock().update_request(id, patch)?)
    }

    /// The status message shown for a failed auto-save.
    #[must_use]
    pub fn describe(error: &ApplicationError) -> String {
        match error {
            ApplicationError::Store(StoreError::NotFound { .. }) | ApplicationError::MissingId => {
                "request not found or deleted".to_string()
            }
            other => other.to_string(),
        }
    }
}
