//! cURL command parser.
//!
//! The parser is permissive: it pulls the method, URL, headers and body out
//! of free-form shell text and ignores every flag it does not know.
//!
//! Quoted values end at the first unescaped matching quote; `\'`, `\"` and
//! `\\` inside them are un-escaped in a single pass.

use courier_application::ports::CommandParser;
use courier_domain::{CommandParseError, HeaderEntry, Headers, ParsedRequest};
use regex::Regex;

/// Parses cURL commands into [`ParsedRequest`]s.
#[derive(Debug, Clone)]
pub struct CurlParser {
    continuation: Regex,
    method: Regex,
    scheme_url: Regex,
    leading_curl: Regex,
    header_flag: Regex,
    data_flag: Regex,
    unsupported_flag: Regex,
}

impl Default for CurlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CurlParser {
    /// Creates a parser.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self {
            continuation: Regex::new(r"\\\s*\n\s*").expect("valid regex"),
            method: Regex::new(r"(?i)(?:^|\s)(?:-X|--request)\s+([A-Z]+)").expect("valid regex"),
            scheme_url: Regex::new(r#"https?://[^\s'"]+"#).expect("valid regex"),
            leading_curl: Regex::new(r"(?i)^\s*curl\s+").expect("valid regex"),
            header_flag: Regex::new(r"(?:^|\s)(-H|--header)\s+").expect("valid regex"),
            data_flag: Regex::new(r"(?:^|\s)(-d|--data|--data-raw)\s+").expect("valid regex"),
            unsupported_flag: Regex::new(r"(?:^|\s)(-F|--form|-T|--upload-file)(?:[\s=]|$)")
                .expect("valid regex"),
        }
    }

    /// Collapses line continuations and trims.
    fn normalize(&self, input: &str) -> String {
        self.continuation.replace_all(input, " ").trim().to_string()
    }

    fn extract_method(&self, input: &str) -> String {
        self.method
            .captures(input)
            .and_then(|c| c.get(1))
            .map_or_else(|| "GET".to_string(), |m| m.as_str().to_uppercase())
    }

    fn extract_url(&self, input: &str) -> Result<String, CommandParseError> {
        let cleaned = self.leading_curl.replace(input, "");

        if let Some(found) = self.scheme_url.find(&cleaned) {
            return Ok(found.as_str().to_string());
        }

        cleaned
            .split_whitespace()
            .find(|part| {
                !part.starts_with('-')
                    && !part.starts_with('"')
                    && !part.starts_with('\'')
                    && (part.contains('.') || part.contains('/'))
            })
            .map(str::to_string)
            .ok_or_else(CommandParseError::no_url)
    }

    fn extract_headers(&self, input: &str) -> Result<Headers, CommandParseError> {
        let mut headers = Headers::default();
        for captures in self.header_flag.captures_iter(input) {
            let (Some(flag), Some(whole)) = (captures.get(1), captures.get(0)) else {
                continue;
            };
            let Some(content) = quoted_value(&input[whole.end()..], flag.as_str())? else {
                continue;
            };
            let Some((key, value)) = content.split_once(':') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            headers.push(HeaderEntry::new(key, value.trim()));
        }
        Ok(headers)
    }

    fn extract_body(&self, input: &str) -> Result<Option<String>, CommandParseError> {
        for captures in self.data_flag.captures_iter(input) {
            let (Some(flag), Some(whole)) = (captures.get(1), captures.get(0)) else {
                continue;
            };
            if let Some(content) = quoted_value(&input[whole.end()..], flag.as_str())? {
                return Ok(Some(unescape(content)).filter(|body| !body.is_empty()));
            }
        }
        Ok(None)
    }

    /// Only flags outside quoted values count; `-F` inside a header is text.
    fn reject_unsupported(&self, input: &str) -> Result<(), CommandParseError> {
        let unquoted = blank_quoted(input);
        match self.unsupported_flag.captures(&unquoted).and_then(|c| c.get(1)) {
            Some(flag) => Err(CommandParseError::unsupported(flag.as_str())),
            None => Ok(()),
        }
    }
}

impl CommandParser for CurlParser {
    fn parse(&self, input: &str) -> Result<ParsedRequest, CommandParseError> {
        let normalized = self.normalize(input);
        if normalized.is_empty() {
            return Err(CommandParseError::empty_input());
        }

        self.reject_unsupported(&normalized)?;

        let method = self.extract_method(&normalized);
        let url = self.extract_url(&normalized)?;
        let headers = self.extract_headers(&normalized)?;
        let body = self.extract_body(&normalized)?;

        tracing::debug!(%method, %url, headers = headers.len(), "parsed cURL command");
        Ok(ParsedRequest {
            method,
            url,
            headers,
            body,
        })
    }
}

/// Reads a quoted value at the start of `rest`.
///
/// Returns `Ok(None)` when `rest` does not open with a quote and an error
/// when the quote is never closed. The content is returned still escaped.
fn quoted_value<'a>(rest: &'a str, flag: &str) -> Result<Option<&'a str>, CommandParseError> {
    let Some(quote) = rest.chars().next().filter(|c| matches!(c, '\'' | '"')) else {
        return Ok(None);
    };
    let content = &rest[1..];

    let mut escaped = false;
    for (index, c) in content.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return Ok(Some(&content[..index]));
        }
    }
    Err(CommandParseError::unterminated_quote(flag))
}

/// Replaces every quoted span, quotes included, with a single space.
///
/// An unclosed quote blanks the rest of the input; the value extractors
/// report that case.
fn blank_quoted(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut open: Option<char> = None;
    let mut escaped = false;
    for c in input.chars() {
        match open {
            None if matches!(c, '\'' | '"') => {
                open = Some(c);
                out.push(' ');
            }
            None => out.push(c),
            Some(_) if escaped => escaped = false,
            Some(_) if c == '\\' => escaped = true,
            Some(quote) if c == quote => open = None,
            Some(_) => {}
        }
    }
    out
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next @ ('\'' | '"' | '\\')) => out.push(next),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    out
}
