//! Saved request record stored in `requests.json`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Id;
use crate::request::{Headers, ParsedRequest, normalize_method};

const fn unix_epoch() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH
}

/// A persisted, named HTTP request definition.
///
/// Field names follow the snake_case layout of the request snapshot file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedRequest {
    /// Random unique identifier (UUID v4).
    pub id: Id,

    /// Human-readable request name.
    pub name: String,

    /// Upper-cased HTTP method token.
    pub method: String,

    /// Request URL, possibly partial while being edited.
    #[serde(default)]
    pub url: String,

    /// Headers as an ordered list; legacy map form is accepted on read.
    #[serde(default)]
    pub headers: Headers,

    /// Raw body text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Owning folder. Dangling references are tolerated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<Id>,

    /// Creation time, immutable once set.
    #[serde(with = "chrono::serde::ts_milliseconds", default = "unix_epoch")]
    pub created_at: DateTime<Utc>,

    /// Last mutation time.
    #[serde(with = "chrono::serde::ts_milliseconds", default = "unix_epoch")]
    pub updated_at: DateTime<Utc>,
}

impl SavedRequest {
    /// Returns the body text, or an empty string when absent.
    #[must_use]
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }

    /// Builds a patch that copies every user-editable field of this request.
    ///
    /// Identity and timestamps are excluded.
    #[must_use]
    pub fn to_patch(&self) -> RequestPatch {
        RequestPatch {
            name: Some(self.name.clone()),
            method: Some(self.method.clone()),
            url: Some(self.url.clone()),
            headers: Some(self.headers.clone()),
            body: Some(self.body.clone()),
            folder_id: Some(self.folder_id.clone()),
        }
    }
}

/// Partial request fields used for both creation and shallow-merge updates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestPatch {
    /// Request name.
    pub name: Option<String>,
    /// HTTP method token.
    pub method: Option<String>,
    /// Request URL.
    pub url: Option<String>,
    /// Header list.
    pub headers: Option<Headers>,
    /// Body; `Some(None)` clears it.
    pub body: Option<Option<String>>,
    /// Folder; `Some(None)` unfiles the request.
    pub folder_id: Option<Option<Id>>,
}

impl RequestPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the method.
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Sets the URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the headers.
    #[must_use]
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Sets the body. Empty text is stored as an empty body, not a missing one.
    #[must_use]
    pub fn with_body(mut self, body: Option<String>) -> Self {
        self.body = Some(body);
        self
    }

    /// Files the request under a folder.
    #[must_use]
    pub fn in_folder(mut self, folder_id: impl Into<Id>) -> Self {
        self.folder_id = Some(Some(folder_id.into()));
        self
    }

    /// Materializes a new request, filling unset fields with defaults.
    #[must_use]
    pub fn into_request(self, id: Id, untitled_name: &str, now: DateTime<Utc>) -> SavedRequest {
        SavedRequest {
            id,
            name: self
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| untitled_name.to_string()),
            method: normalize_method(self.method.as_deref().unwrap_or_default()),
            url: self.url.unwrap_or_default(),
            headers: self.headers.unwrap_or_default(),
            body: self.body.flatten(),
            folder_id: self.folder_id.flatten(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges the set fields onto `request` and stamps `updated_at`.
    pub fn apply(self, request: &mut SavedRequest, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            request.name = name;
        }
        if let Some(method) = self.method {
            request.method = normalize_method(&method);
        }
        if let Some(url) = self.url {
            request.url = url;
        }
        if let Some(headers) = self.headers {
            request.headers = headers;
        }
        if let Some(body) = self.body {
            request.body = body;
        }
        if let Some(folder_id) = self.folder_id {
            request.folder_id = folder_id;
        }
        request.updated_at = now;
    }
}

impl From<ParsedRequest> for RequestPatch {
    fn from(parsed: ParsedRequest) -> Self {
        Self::new()
            .with_method(parsed.method)
            .with_url(parsed.url)
            .with_headers(parsed.headers)
            .with_body(parsed.body)
    }
}
