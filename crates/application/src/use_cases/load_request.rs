//! Open a saved request in a panel.

use courier_domain::RequestDraft;

use crate::ApplicationResult;
use crate::error::StoreError;
use crate::store::SharedLibrary;

/// Use case for loading a stored request into a form.
pub struct LoadRequest {
    library: SharedLibrary,
}

impl LoadRequest {
    /// Creates a new `LoadRequest` use case.
    #[must_use]
    pub const fn new(library: SharedLibrary) -> Self {
        Self { library }
    }

    /// Fetches the request as form contents.
    ///
    /// # Errors
    ///
    /// Returns `MissingId` for a blank id, or `NotFound` if it is not stored.
    pub fn execute(&self, id: &str) -> ApplicationResult<RequestDraft> {
        if id.trim().is_empty() {
            return Err(crate::ApplicationError::MissingId);
        }
        let library = self.library.lock();
        let request = library
            .requests()
            .get(id)
            .ok_or_else(|| StoreError::request_not_found(id))?;
        Ok(RequestDraft::from(request))
    }
}
