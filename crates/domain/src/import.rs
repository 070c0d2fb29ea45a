//! Command import error taxonomy.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable reason a command could not be imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParseErrorCode {
    /// Nothing but whitespace was supplied.
    EmptyInput,
    /// No URL could be located in the command.
    #[serde(rename = "NO_URL")]
    NoUrlFound,
    /// A quoted segment is malformed.
    InvalidSyntax,
    /// The command relies on a flag Courier cannot represent.
    UnsupportedFeature,
}

impl ParseErrorCode {
    /// Returns the stable code string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyInput => "EMPTY_INPUT",
            Self::NoUrlFound => "NO_URL",
            Self::InvalidSyntax => "INVALID_SYNTAX",
            Self::UnsupportedFeature => "UNSUPPORTED_FEATURE",
        }
    }
}

impl fmt::Display for ParseErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed command-parse failure: code, human message and optional example.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CommandParseError {
    /// Code callers may branch on.
    pub code: ParseErrorCode,
    /// Message to surface to the user.
    pub message: String,
    /// A usage example that would have parsed.
    pub example: Option<String>,
}

impl CommandParseError {
    /// Creates an error without an example.
    #[must_use]
    pub fn new(code: ParseErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            example: None,
        }
    }

    /// Attaches a usage example.
    #[must_use]
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    /// Input was empty after trimming.
    #[must_use]
    pub fn empty_input() -> Self {
        Self::new(ParseErrorCode::EmptyInput, "Please enter a cURL command")
    }

    /// No URL was discoverable.
    #[must_use]
    pub fn no_url() -> Self {
        Self::new(
            ParseErrorCode::NoUrlFound,
            "Unable to find URL in cURL command",
        )
        .with_example("curl https://api.example.com")
    }

    /// A quoted segment after `flag` is never closed.
    #[must_use]
    pub fn unterminated_quote(flag: &str) -> Self {
        Self::new(
            ParseErrorCode::InvalidSyntax,
            format!("Unterminated quote after {flag}"),
        )
    }

    /// The command uses `flag`, which cannot be represented.
    #[must_use]
    pub fn unsupported(flag: &str) -> Self {
        Self::new(
            ParseErrorCode::UnsupportedFeature,
            format!("The {flag} option is not supported"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_url_carries_example() {
        let error = CommandParseError::no_url();
        assert_eq!(error.code, ParseErrorCode::NoUrlFound);
        assert_eq!(error.code.as_str(), "NO_URL");
        assert_eq!(error.example.as_deref(), Some("curl https://api.example.com"));
        assert_eq!(error.to_string(), "Unable to find URL in cURL command");
    }

    #[test]
    fn test_code_serializes_as_stable_string() {
        let json = serde_json::to_string(&ParseErrorCode::InvalidSyntax).unwrap_or_default();
        assert_eq!(json, "\"INVALID_SYNTAX\"");
        let json = serde_json::to_string(&ParseErrorCode::NoUrlFound).unwrap_or_default();
        assert_eq!(json, "\"NO_URL\"");
    }
}
