//! Whole-collection snapshot documents.
//!
//! The folder document is a JSON object keyed by folder id; the request
//! document is a JSON array. Both are rewritten in full on every mutation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{Folder, Id, SavedRequest};

/// Snapshot of every folder, keyed by id in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderSnapshot(pub IndexMap<Id, Folder>);

/// Snapshot of every saved request in store order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestSnapshot(pub Vec<SavedRequest>);
