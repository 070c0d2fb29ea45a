//! Command parser port

use courier_domain::{CommandParseError, ParsedRequest};

/// Port for turning a pasted command line into a structured request.
pub trait CommandParser: Send + Sync {
    /// Parses `input`.
    ///
    /// # Errors
    ///
    /// Returns a typed `CommandParseError` when the input is empty, has no
    /// discoverable URL, or is malformed.
    fn parse(&self, input: &str) -> Result<ParsedRequest, CommandParseError>;
}
