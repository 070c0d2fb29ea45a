//! Transient output of command import.

use serde::{Deserialize, Serialize};

use super::Headers;

/// A request recovered from a pasted command-line invocation.
///
/// Never persisted directly; it becomes a saved request only when the
/// import flow stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRequest {
    /// Upper-cased method token, `GET` when the command named none.
    pub method: String,
    /// The URL as it appeared in the command.
    pub url: String,
    /// Headers in encounter order, duplicates preserved.
    pub headers: Headers,
    /// Un-escaped body payload, if a data flag was present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}
