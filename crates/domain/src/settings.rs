//! User settings for Courier.
//!
//! Every field has a serde default so a partial `settings.json` still loads.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunables read once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourierSettings {
    /// Storage directory override. `None` uses the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,

    /// Quiet window before an edit burst is auto-saved.
    #[serde(default = "default_autosave_debounce_ms")]
    pub autosave_debounce_ms: u64,

    /// Quiet window before URL edits are re-derived into parameters.
    #[serde(default = "default_param_sync_debounce_ms")]
    pub param_sync_debounce_ms: u64,

    /// Client-side timeout. `None` waits for the server indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_ms: Option<u64>,

    /// User-Agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Name given to requests saved without one.
    #[serde(default = "default_untitled_request_name")]
    pub untitled_request_name: String,

    /// Suffix appended to the name of a copied request.
    #[serde(default = "default_copy_suffix")]
    pub copy_suffix: String,

    /// Name of the folder created when saving with no folder available.
    #[serde(default = "default_folder_name")]
    pub default_folder_name: String,
}

const fn default_autosave_debounce_ms() -> u64 {
    500
}

const fn default_param_sync_debounce_ms() -> u64 {
    300
}

fn default_user_agent() -> String {
    format!("courier/{}", env!("CARGO_PKG_VERSION"))
}

fn default_untitled_request_name() -> String {
    "Untitled Request".to_string()
}

fn default_copy_suffix() -> String {
    " (copy)".to_string()
}

fn default_folder_name() -> String {
    "Default Folder".to_string()
}

impl CourierSettings {
    /// Auto-save debounce window.
    #[must_use]
    pub const fn autosave_debounce(&self) -> Duration {
        Duration::from_millis(self.autosave_debounce_ms)
    }

    /// URL-to-parameter sync debounce window.
    #[must_use]
    pub const fn param_sync_debounce(&self) -> Duration {
        Duration::from_millis(self.param_sync_debounce_ms)
    }

    /// Client-side request timeout, if any.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for CourierSettings {
    fn default() -> Self {
        Self {
            storage_dir: None,
            autosave_debounce_ms: default_autosave_debounce_ms(),
            param_sync_debounce_ms: default_param_sync_debounce_ms(),
            request_timeout_ms: None,
            user_agent: default_user_agent(),
            untitled_request_name: default_untitled_request_name(),
            copy_suffix: default_copy_suffix(),
            default_folder_name: default_folder_name(),
        }
    }
}
