//! Panel form model with URL/parameter synchronisation.
//!
//! Parameter edits rewrite the URL's query string at once. URL edits are
//! re-derived into parameters after a quiet window, so a half-typed query
//! does not churn the parameter list.

use std::time::Duration;

use courier_domain::{Headers, QueryParam, RequestDraft, params_from_url, url_with_params};

use crate::execution::DebounceTimer;

/// Editable form state of one panel.
#[derive(Debug, Clone)]
pub struct FormState {
    draft: RequestDraft,
    params: Vec<QueryParam>,
    param_sync: DebounceTimer,
}

impl FormState {
    /// Creates an empty form.
    #[must_use]
    pub fn new(param_sync_window: Duration) -> Self {
        Self {
            draft: RequestDraft::default(),
            params: Vec::new(),
            param_sync: DebounceTimer::new(param_sync_window),
        }
    }

    /// Replaces the form contents, e.g. when a saved request is opened.
    pub fn load(&mut self, draft: RequestDraft) {
        self.params = params_from_url(&draft.url);
        self.draft = draft;
        self.param_sync.cancel();
    }

    /// Sets the method.
    pub fn set_method(&mut self, method: impl Into<String>) {
        self.draft.method = method.into();
    }

    /// Sets the URL and schedules parameter re-derivation.
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.draft.url = url.into();
        self.param_sync.touch();
    }

    /// Replaces the header rows.
    pub fn set_headers(&mut self, headers: Headers) {
        self.draft.headers = headers;
    }

    /// Sets the body text.
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.draft.body = body.into();
    }

    /// Replaces the parameter rows and rewrites the URL's query string.
    ///
    /// A pending URL-to-parameter sync is dropped; parameters win.
    pub fn set_params(&mut self, params: Vec<QueryParam>) {
        self.draft.url = url_with_params(&self.draft.url, &params);
        self.params = params;
        self.param_sync.cancel();
    }

    /// Re-derives parameters from the current URL and returns them.
    pub fn sync_params_from_url(&mut self) -> &[QueryParam] {
        self.param_sync.cancel();
        self.params = params_from_url(&self.draft.url);
        &self.params
    }

    /// Resolves when a URL edit is due for re-derivation. Cancel-safe.
    pub async fn param_sync_due(&mut self) {
        self.param_sync.elapsed().await;
    }

    /// Records the persisted identity after a save.
    pub fn set_identity(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.draft.id = Some(id.into());
        self.draft.name = name.into();
    }

    /// Current form contents.
    #[must_use]
    pub const fn draft(&self) -> &RequestDraft {
        &self.draft
    }

    /// Current parameter rows.
    #[must_use]
    pub fn params(&self) -> &[QueryParam] {
        &self.params
    }
}
