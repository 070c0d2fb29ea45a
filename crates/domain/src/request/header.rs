//! HTTP Header types
//!
//! Headers are kept as an ordered list of key/value entries everywhere inside
//! Courier. Older snapshot files may hold headers as a `{key: value}` object;
//! that shape is accepted on read and never written back.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// A single HTTP header as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
    /// The header name (e.g., "Content-Type")
    pub key: String,
    /// The header value (e.g., "application/json")
    #[serde(default)]
    pub value: String,
}

impl HeaderEntry {
    /// Creates a new header entry.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// An ordered collection of HTTP headers. Duplicate keys are preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Headers {
    items: Vec<HeaderEntry>,
}

impl Headers {
    /// Creates an empty header collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Builds headers from a key/value mapping, keeping the mapping's order.
    #[must_use]
    pub fn from_map(map: IndexMap<String, String>) -> Self {
        map.into_iter().map(|(k, v)| HeaderEntry::new(k, v)).collect()
    }

    /// Appends a header entry.
    pub fn push(&mut self, header: HeaderEntry) {
        self.items.push(header);
    }

    /// Returns all entries in encounter order.
    #[must_use]
    pub fn all(&self) -> &[HeaderEntry] {
        &self.items
    }

    /// Returns an iterator over the entries.
    pub fn iter(&self) -> std::slice::Iter<'_, HeaderEntry> {
        self.items.iter()
    }

    /// Returns the value of the first header whose key matches case-insensitively.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|h| h.key.eq_ignore_ascii_case(key))
            .map(|h| h.value.as_str())
    }

    /// Collapses the list into a lookup keyed by trimmed header name.
    ///
    /// Entries whose key is empty or whitespace-only are skipped; a later
    /// duplicate key overwrites the earlier value but keeps its position.
    #[must_use]
    pub fn to_lookup(&self) -> IndexMap<String, String> {
        let mut lookup = IndexMap::new();
        for header in &self.items {
            let key = header.key.trim();
            if key.is_empty() {
                continue;
            }
            lookup.insert(key.to_string(), header.value.clone());
        }
        lookup
    }

    /// Returns the number of entries.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::len is not const in stable
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::is_empty is not const in stable
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<HeaderEntry> for Headers {
    fn from_iter<T: IntoIterator<Item = HeaderEntry>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<HeaderEntry>> for Headers {
    fn from(items: Vec<HeaderEntry>) -> Self {
        Self { items }
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = &'a HeaderEntry;
    type IntoIter = std::slice::Iter<'a, HeaderEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// On-disk shapes a header collection may take.
#[derive(Deserialize)]
#[serde(untagged)]
enum HeadersRepr {
    List(Vec<HeaderEntry>),
    Map(IndexMap<String, String>),
    Null(()),
}

impl<'de> Deserialize<'de> for Headers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match HeadersRepr::deserialize(deserializer)? {
            HeadersRepr::List(items) => Self { items },
            HeadersRepr::Map(map) => Self::from_map(map),
            HeadersRepr::Null(()) => Self::new(),
        })
    }
}
