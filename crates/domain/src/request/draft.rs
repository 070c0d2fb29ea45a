//! The editable request shown in a panel form.

use serde::{Deserialize, Serialize};

use super::Headers;
use crate::persistence::{Id, RequestPatch, SavedRequest};

/// Form contents exchanged with the panel.
///
/// `id` is present only once the request has been saved; drafts without an
/// id are never auto-saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDraft {
    /// Persisted id, if saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    /// Request name.
    #[serde(default)]
    pub name: String,
    /// Method token as typed.
    #[serde(default)]
    pub method: String,
    /// URL as typed, possibly partial.
    #[serde(default)]
    pub url: String,
    /// Header rows in form order.
    #[serde(default)]
    pub headers: Headers,
    /// Raw body text; empty means no body.
    #[serde(default)]
    pub body: String,
    /// Folder the panel was opened from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<Id>,
}

impl RequestDraft {
    /// Returns true if the draft belongs to a persisted request.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Patch with the editable request fields: method, URL, headers and body.
    ///
    /// Name and folder are left to the caller.
    #[must_use]
    pub fn content_patch(&self) -> RequestPatch {
        let body = (!self.body.is_empty()).then(|| self.body.clone());
        RequestPatch::new()
            .with_method(self.method.clone())
            .with_url(self.url.clone())
            .with_headers(self.headers.clone())
            .with_body(body)
    }
}

impl From<&SavedRequest> for RequestDraft {
    fn from(request: &SavedRequest) -> Self {
        Self {
            id: Some(request.id.clone()),
            name: request.name.clone(),
            method: request.method.clone(),
            url: request.url.clone(),
            headers: request.headers.clone(),
            body: request.body_text().to_string(),
            folder_id: request.folder_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::HeaderEntry;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_draft_from_saved_request_and_back() {
        let now = DateTime::from_timestamp_millis(1).unwrap_or_default();
        let saved = RequestPatch::new()
            .with_name("Ping")
            .with_method("POST")
            .with_url("https://x.test")
            .with_headers(Headers::from(vec![HeaderEntry::new("A", "1")]))
            .in_folder("7")
            .into_request("id".into(), "Untitled", now);

        let draft = RequestDraft::from(&saved);
        assert!(draft.is_persisted());
        assert_eq!(draft.body, "");
        assert_eq!(draft.folder_id.as_deref(), Some("7"));

        let patch = draft.content_patch();
        assert_eq!(patch.body, Some(None));
        assert_eq!(patch.method.as_deref(), Some("POST"));
        assert_eq!(patch.name, None);
    }

    #[test]
    fn test_draft_wire_shape_is_camel_case() {
        let draft = RequestDraft {
            folder_id: Some("3".into()),
            ..RequestDraft::default()
        };
        let json = serde_json::to_value(&draft).unwrap_or_default();
        assert_eq!(json["folderId"], "3");
        assert!(json["headers"].is_array());
        assert!(json.get("id").is_none());
    }
}
