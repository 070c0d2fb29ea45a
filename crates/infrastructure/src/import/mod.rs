//! Import of pasted command-line invocations.

mod curl;

pub use curl::CurlParser;
