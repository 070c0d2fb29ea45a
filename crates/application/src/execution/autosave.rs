//! Debounced auto-save of persisted drafts.

use std::time::Duration;

use courier_domain::{RequestDraft, SaveStatus};

use super::DebounceTimer;
use crate::store::SharedLibrary;
use crate::use_cases::AutoSaveRequest;

/// Coalesces edit bursts on a saved request into one write.
///
/// Drafts without a persisted id never arm the timer.
pub struct AutoSaver {
    timer: DebounceTimer,
    save: AutoSaveRequest,
}

impl AutoSaver {
    /// Creates an auto-saver with the given quiet window.
    #[must_use]
    pub fn new(library: SharedLibrary, window: Duration) -> Self {
        Self {
            timer: DebounceTimer::new(window),
            save: AutoSaveRequest::new(library),
        }
    }

    /// Records an edit. Returns true if a save was scheduled.
    pub fn note_edit(&mut self, draft: &RequestDraft) -> bool {
        if draft.is_persisted() {
            self.timer.touch();
            true
        } else {
            false
        }
    }

    /// Drops any scheduled save.
    pub fn cancel(&mut self) {
        self.timer.cancel();
    }

    /// Returns true while a save is scheduled.
    #[must_use]
    pub const fn is_scheduled(&self) -> bool {
        self.timer.is_armed()
    }

    /// Resolves when a scheduled save is due. Cancel-safe.
    pub async fn due(&mut self) {
        self.timer.elapsed().await;
    }

    /// Writes `draft` now and reports the resulting status.
    #[must_use]
    pub fn save(&self, draft: &RequestDraft) -> SaveStatus {
        match self.save.execute(draft) {
            Ok(saved) => {
                tracing::debug!(id = %saved.id, "auto-saved request");
                SaveStatus::Saved
            }
            Err(error) => {
                tracing::warn!(%error, "auto-save failed");
                SaveStatus::Error(AutoSaveRequest::describe(&error))
            }
        }
    }
}
