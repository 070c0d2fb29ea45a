//! User settings persistence.
//!
//! Stores user settings in the platform-specific config directory:
//! - Linux: ~/.config/courier/settings.json
//! - macOS: ~/Library/Application Support/courier/settings.json
//! - Windows: %APPDATA%/courier/settings.json

use std::path::PathBuf;

use courier_domain::CourierSettings;
use tokio::fs;

use crate::serialization::{DocumentError, decode_document, encode_document};

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not a valid settings document.
    #[error("invalid settings file: {0}")]
    Document(#[from] DocumentError),

    /// Could not determine config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Repository for user settings persistence.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    path: Option<PathBuf>,
}

impl Default for SettingsRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsRepository {
    /// Creates a repository over the platform config directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: dirs::config_dir().map(|p| p.join("courier").join("settings.json")),
        }
    }

    /// Creates a repository over an explicit settings file.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Loads user settings from disk.
    ///
    /// Returns default settings if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or decoded.
    pub async fn load(&self) -> Result<CourierSettings, SettingsError> {
        let Some(path) = &self.path else {
            return Ok(CourierSettings::default());
        };

        let content = match fs::read(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(CourierSettings::default());
            }
            Err(e) => return Err(e.into()),
        };

        let settings = decode_document(&content)?;
        Ok(settings)
    }

    /// Saves user settings to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no config directory or writing fails.
    pub async fn save(&self, settings: &CourierSettings) -> Result<(), SettingsError> {
        let Some(path) = &self.path else {
            return Err(SettingsError::NoConfigDir);
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = encode_document(settings)?;
        fs::write(path, content).await?;

        Ok(())
    }

    /// Returns the path where settings are stored, if available.
    #[must_use]
    pub fn settings_path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn settings_path_is_valid() {
        let repo = SettingsRepository::new();
        if let Some(p) = repo.settings_path() {
            assert!(p.ends_with("courier/settings.json"));
        }
    }

    #[tokio::test]
    async fn load_returns_default_when_no_file() {
        let temp = TempDir::new().unwrap();
        let repo = SettingsRepository::at(temp.path().join("settings.json"));
        assert_eq!(repo.load().await.unwrap(), CourierSettings::default());
    }

    #[tokio::test]
    async fn save_then_load() {
        let temp = TempDir::new().unwrap();
        let repo = SettingsRepository::at(temp.path().join("cfg").join("settings.json"));
        let settings = CourierSettings {
            autosave_debounce_ms: 1_000,
            request_timeout_ms: Some(5_000),
            ..CourierSettings::default()
        };

        repo.save(&settings).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), settings);
    }

    #[tokio::test]
    async fn partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        std::fs::write(&path, r#"{"copy_suffix": " - Copy"}"#).unwrap();

        let settings = SettingsRepository::at(&path).load().await.unwrap();
        assert_eq!(settings.copy_suffix, " - Copy");
        assert_eq!(settings.autosave_debounce_ms, 500);
    }
}
