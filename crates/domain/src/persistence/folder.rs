//! Folder record stored in `directories.json`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Id;

/// A named grouping node in the saved-request hierarchy.
///
/// Folders form a forest through `parent_id`; `None` marks a root folder.
/// Field names follow the camelCase layout of the folder snapshot file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Time-derived unique identifier.
    pub id: Id,

    /// Human-readable folder name.
    pub name: String,

    /// Parent folder, or `None` for a root folder.
    #[serde(default)]
    pub parent_id: Option<Id>,

    /// Creation time, immutable once set.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,

    /// Last mutation time.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Creates a folder stamped with `now` for both timestamps.
    #[must_use]
    pub fn new(id: Id, name: impl Into<String>, parent_id: Option<Id>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true if this folder has no parent.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Partial update for a folder. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderPatch {
    /// New name.
    pub name: Option<String>,
    /// New parent; `Some(None)` moves the folder to the root.
    pub parent_id: Option<Option<Id>>,
}

impl FolderPatch {
    /// A patch that only renames.
    #[must_use]
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            parent_id: None,
        }
    }

    /// Merges the set fields onto `folder` and stamps `updated_at`.
    pub fn apply(self, folder: &mut Folder, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            folder.name = name;
        }
        if let Some(parent_id) = self.parent_id {
            folder.parent_id = parent_id;
        }
        folder.updated_at = now;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn at(millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(millis).unwrap()
    }

    #[test]
    fn test_folder_serializes_camel_case_millis() {
        let folder = Folder::new("17".to_string(), "Auth", None, at(1_700_000_000_000));
        let json = serde_json::to_value(&folder).unwrap();
        assert_eq!(json["parentId"], serde_json::Value::Null);
        assert_eq!(json["createdAt"], 1_700_000_000_000_i64);
        assert_eq!(json["updatedAt"], 1_700_000_000_000_i64);
    }

    #[test]
    fn test_rename_patch_keeps_created_at() {
        let mut folder = Folder::new("1".to_string(), "Old", None, at(1_000));
        FolderPatch::rename("New").apply(&mut folder, at(2_000));
        assert_eq!(folder.name, "New");
        assert_eq!(folder.created_at, at(1_000));
        assert_eq!(folder.updated_at, at(2_000));
        assert!(folder.is_root());
    }
}
