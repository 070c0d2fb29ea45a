//! Query parameter types and URL query-string synchronisation.
//!
//! The parameter editor and the raw URL field describe the same data. These
//! helpers derive a parameter list from a URL and rewrite a URL's query
//! string from a parameter list, leaving scheme, path and fragment untouched.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// A query parameter key-value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
    /// The parameter key
    pub key: String,
    /// The parameter value
    #[serde(default)]
    pub value: String,
}

impl QueryParam {
    /// Creates a new query parameter.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Splits a URL into `(base, query, fragment)` without validating it.
fn split_url(url: &str) -> (&str, Option<&str>, Option<&str>) {
    let (rest, fragment) = match url.find('#') {
        Some(i) => (&url[..i], Some(&url[i..])),
        None => (url, None),
    };
    match rest.find('?') {
        Some(i) => (&rest[..i], Some(&rest[i + 1..]), fragment),
        None => (rest, None, fragment),
    }
}

/// Derives the parameter list encoded in a URL's query string.
///
/// Works on partial URLs (no scheme, template placeholders) as typed in the
/// URL field.
#[must_use]
pub fn params_from_url(url: &str) -> Vec<QueryParam> {
    let (_, query, _) = split_url(url);
    query
        .map(|q| {
            form_urlencoded::parse(q.as_bytes())
                .map(|(k, v)| QueryParam::new(k, v))
                .collect()
        })
        .unwrap_or_default()
}

/// Rewrites a URL's query string from a parameter list.
///
/// Parameters with an empty key are omitted. An empty list removes the query
/// string entirely.
#[must_use]
pub fn url_with_params(url: &str, params: &[QueryParam]) -> String {
    let (base, _, fragment) = split_url(url);

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for param in params.iter().filter(|p| !p.key.trim().is_empty()) {
        serializer.append_pair(&param.key, &param.value);
        any = true;
    }

    let mut rebuilt = base.to_string();
    if any {
        rebuilt.push('?');
        rebuilt.push_str(&serializer.finish());
    }
    if let Some(fragment) = fragment {
        rebuilt.push_str(fragment);
    }
    rebuilt
}
