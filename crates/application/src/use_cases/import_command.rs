//! Import a pasted command line as a saved request.

use std::sync::Arc;

use courier_domain::{Id, RequestDraft, RequestPatch, SavedRequest};
use url::Url;

use crate::error::{ApplicationError, StoreError};
use crate::ports::CommandParser;
use crate::store::SharedLibrary;
use crate::ApplicationResult;

/// Where an imported request is filed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportTarget {
    /// A specific folder, e.g. the one the import was started from.
    Folder(Id),
    /// The first folder the sidebar shows.
    FirstFolder,
}

/// Input for importing a command.
#[derive(Debug, Clone)]
pub struct ImportCommandInput {
    /// The pasted command text.
    pub command: String,
    /// Target folder.
    pub target: ImportTarget,
}

/// Output from importing a command.
#[derive(Debug, Clone)]
pub struct ImportCommandOutput {
    /// The stored request.
    pub request: SavedRequest,
    /// Form contents for opening it in a panel.
    pub draft: RequestDraft,
}

/// Names an imported request `"{METHOD} {path}"`.
///
/// The trailing slash of the path is dropped; the root path gives
/// `"{METHOD} /"` and a URL that does not parse gives `"{METHOD} Request"`.
#[must_use]
pub fn generate_request_name(method: &str, url: &str) -> String {
    let method = method.to_uppercase();
    let Ok(parsed) = Url::parse(url) else {
        return format!("{method} Request");
    };
    let path = parsed.path();
    if path.is_empty() || path == "/" {
        return format!("{method} /");
    }
    let path = path.strip_suffix('/').unwrap_or(path);
    format!("{method} {path}")
}

/// Use case for command import.
pub struct ImportCommand<P> {
    parser: Arc<P>,
    library: SharedLibrary,
}

impl<P: CommandParser> ImportCommand<P> {
    /// Creates a new `ImportCommand` use case.
    #[must_use]
    pub const fn new(parser: Arc<P>, library: SharedLibrary) -> Self {
        Self { parser, library }
    }

    /// Parses the command and stores the result.
    ///
    /// Nothing is stored when parsing fails.
    ///
    /// # Errors
    ///
    /// Returns `Parse` for unparsable input, `NoTargetFolder` if the library
    /// has no folder to import into, `NotFound` for an unknown target folder,
    /// or a write failure.
    pub fn execute(&self, input: ImportCommandInput) -> ApplicationResult<ImportCommandOutput> {
        let parsed = self.parser.parse(&input.command)?;
        let name = generate_request_name(&parsed.method, &parsed.url);

        let mut library = self.library.lock();
        let folder_id = match input.target {
            ImportTarget::Folder(id) => {
                if !library.folders().contains(&id) {
                    return Err(StoreError::folder_not_found(id).into());
                }
                id
            }
            ImportTarget::FirstFolder => library
                .tree()
                .first_folder()
                .map(|folder| folder.id.clone())
                .ok_or(ApplicationError::NoTargetFolder)?,
        };

        let patch = RequestPatch::from(parsed).with_name(name).in_folder(folder_id);
        let request = library.create_request(patch)?;
        tracing::info!(id = %request.id, name = %request.name, "imported request");

        Ok(ImportCommandOutput {
            draft: RequestDraft::from(&request),
            request,
        })
    }
}
