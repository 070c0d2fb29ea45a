//! Courier Domain - Core business types
//!
//! This crate defines the domain model for the Courier request composer:
//! folders and saved requests, the transient output of command import,
//! the send/save state machines and the display tree.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod id;
pub mod import;
pub mod persistence;
pub mod request;
pub mod response;
pub mod settings;
pub mod state;
pub mod tree;

pub use error::{DomainError, DomainResult};
pub use id::{FolderIdGenerator, generate_request_id};
pub use import::{CommandParseError, ParseErrorCode};
pub use persistence::{
    Folder, FolderPatch, FolderSnapshot, Id, RequestPatch, RequestSnapshot, SavedRequest,
};
pub use request::{
    HeaderEntry, Headers, HttpMethod, ParsedRequest, QueryParam, RequestDraft, method_allows_body,
    normalize_method, params_from_url, url_with_params,
};
pub use response::{HttpResponse, ResponseBody, StatusCode};
pub use settings::CourierSettings;
pub use state::{RequestErrorKind, RequestState, SaveStatus};
pub use tree::{FolderTint, MethodBadge, TintColor, TreeAction, TreeNode, TreeNodeKind};
