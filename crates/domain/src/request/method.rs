//! HTTP Method enumeration
//!
//! Saved requests keep their method as the upper-cased token the user typed
//! (an imported command may carry any method name), so this enum is used to
//! classify well-known methods rather than to constrain storage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// Well-known HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET method
    #[default]
    Get,
    /// HTTP POST method
    Post,
    /// HTTP PUT method
    Put,
    /// HTTP PATCH method
    Patch,
    /// HTTP DELETE method
    Delete,
    /// HTTP HEAD method
    Head,
    /// HTTP OPTIONS method
    Options,
    /// HTTP TRACE method
    Trace,
}

impl HttpMethod {
    /// Returns all well-known HTTP methods.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Get,
            Self::Post,
            Self::Put,
            Self::Patch,
            Self::Delete,
            Self::Head,
            Self::Options,
            Self::Trace,
        ]
    }

    /// Returns whether a request with this method may carry a body.
    #[must_use]
    pub const fn allows_body(self) -> bool {
        !matches!(self, Self::Get | Self::Head | Self::Options | Self::Trace)
    }

    /// Returns the method as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
        }
    }

    /// Classifies a method token case-insensitively.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(token.trim()))
    }
}

/// Returns whether a method token may carry a body.
///
/// Extension methods are not known to forbid a body, so they allow one.
#[must_use]
pub fn method_allows_body(token: &str) -> bool {
    HttpMethod::from_token(token).is_none_or(HttpMethod::allows_body)
}

/// Normalizes a method token for storage: trimmed, upper-cased, `GET` when empty.
#[must_use]
pub fn normalize_method(token: &str) -> String {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        HttpMethod::Get.as_str().to_string()
    } else {
        trimmed.to_uppercase()
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        Self::from_token(s).ok_or_else(|| DomainError::InvalidMethod(s.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_method_from_str() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("POST".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
        assert_eq!("Put".parse::<HttpMethod>().unwrap(), HttpMethod::Put);
        assert_eq!(
            "BREW".parse::<HttpMethod>().unwrap_err().to_string(),
            "invalid HTTP method: BREW"
        );
    }

    #[test]
    fn test_allows_body() {
        assert!(!HttpMethod::Get.allows_body());
        assert!(!HttpMethod::Head.allows_body());
        assert!(HttpMethod::Post.allows_body());
        assert!(HttpMethod::Delete.allows_body());
        assert!(method_allows_body("patch"));
        assert!(!method_allows_body("options"));
        assert!(method_allows_body("PROPFIND"));
    }

    #[test]
    fn test_normalize_method() {
        assert_eq!(normalize_method(" post "), "POST");
        assert_eq!(normalize_method(""), "GET");
        assert_eq!(normalize_method("propfind"), "PROPFIND");
    }
}
