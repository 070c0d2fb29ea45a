//! Response data delivered to the panel after a completed call.
//!
//! Any status code is a completed call; only transport failures and
//! cancellation are reported through other channels.

mod status;

pub use status::StatusCode;

use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Decoded response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseBody {
    /// Body that parsed as JSON.
    Json(serde_json::Value),
    /// Anything else, decoded lossily as UTF-8.
    Text(String),
}

impl ResponseBody {
    /// Decodes raw bytes, preferring JSON when the bytes parse as JSON.
    #[must_use]
    pub fn decode(bytes: &[u8]) -> Self {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Self::Text(String::from_utf8_lossy(bytes).into_owned());
        }
        serde_json::from_slice(bytes).map_or_else(
            |_| Self::Text(String::from_utf8_lossy(bytes).into_owned()),
            Self::Json,
        )
    }

    /// Returns the body as display text; JSON is pretty-printed.
    #[must_use]
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Self::Text(text) => text.clone(),
        }
    }

    /// Returns true if the body decoded as JSON.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self, Self::Json(_))
    }
}

impl Default for ResponseBody {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// A completed HTTP exchange as seen by the panel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    /// Numeric status code.
    pub status: u16,
    /// Reason phrase reported by the server, or the canonical one.
    pub status_text: String,
    /// Response headers, lower-cased names in arrival order.
    pub headers: IndexMap<String, String>,
    /// Decoded body.
    #[serde(rename = "data")]
    pub body: ResponseBody,
    /// Wall time from dispatch to the last body byte.
    #[serde(skip)]
    pub duration: Duration,
}

impl HttpResponse {
    /// Builds a response, filling the reason phrase from the status code.
    #[must_use]
    pub fn new(status: u16, headers: IndexMap<String, String>, body: &[u8]) -> Self {
        Self {
            status,
            status_text: StatusCode::new(status).reason_phrase().to_string(),
            headers,
            body: ResponseBody::decode(body),
            duration: Duration::ZERO,
        }
    }

    /// Sets the measured duration.
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Returns the status as a `StatusCode`.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        StatusCode::new(self.status)
    }

    /// Looks up a header case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_json_body_is_decoded_as_value() {
        let body = ResponseBody::decode(br#"{"ok":true}"#);
        assert_eq!(body, ResponseBody::Json(json!({"ok": true})));
    }

    #[test]
    fn test_non_json_body_stays_text() {
        assert_eq!(
            ResponseBody::decode(b"<html></html>"),
            ResponseBody::Text("<html></html>".to_string())
        );
        assert_eq!(ResponseBody::decode(b""), ResponseBody::Text(String::new()));
    }

    #[test]
    fn test_response_fills_status_text_and_serializes_data() {
        let mut headers = IndexMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        let response = HttpResponse::new(404, headers, br#"{"error":"missing"}"#);

        assert_eq!(response.status_text, "Not Found");
        assert_eq!(response.header("Content-Type"), Some("application/json"));

        let wire = serde_json::to_value(&response).unwrap_or_default();
        assert_eq!(wire["statusText"], "Not Found");
        assert_eq!(wire["data"]["error"], "missing");
    }
}
