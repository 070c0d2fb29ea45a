//! Request building blocks

mod draft;
mod header;
mod method;
mod parsed;
mod query;

pub use draft::RequestDraft;
pub use header::{HeaderEntry, Headers};
pub use method::{HttpMethod, method_allows_body, normalize_method};
pub use parsed::ParsedRequest;
pub use query::{QueryParam, params_from_url, url_with_params};
