//! Send and save state machines for UI binding.
//!
//! A panel walks `Idle -> Sending -> {Completed, Failed, Cancelled}` for each
//! send. Auto-save reports its own `SaveStatus`, independent of sending.

use serde::{Deserialize, Serialize};

use crate::response::HttpResponse;

/// Current send state of a panel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RequestState {
    /// Nothing outstanding.
    #[default]
    Idle,

    /// A call is in flight.
    Sending {
        /// Ticket of the owning send; later tickets supersede earlier ones.
        ticket: u64,
    },

    /// The server answered, with any status code.
    Completed {
        /// The response data.
        response: Box<HttpResponse>,
    },

    /// The send failed before or during transport.
    Failed {
        /// Error category for display.
        kind: RequestErrorKind,
        /// Message derived from the underlying failure.
        message: String,
    },

    /// The send was aborted by the user or by a newer send.
    Cancelled,
}

impl RequestState {
    /// Creates a Completed state.
    #[must_use]
    pub fn completed(response: HttpResponse) -> Self {
        Self::Completed {
            response: Box::new(response),
        }
    }

    /// Creates a Failed state.
    #[must_use]
    pub fn failed(kind: RequestErrorKind, message: impl Into<String>) -> Self {
        Self::Failed {
            kind,
            message: message.into(),
        }
    }

    /// Returns true if the state is Idle.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true if a call is in flight.
    #[must_use]
    pub const fn is_sending(&self) -> bool {
        matches!(self, Self::Sending { .. })
    }

    /// Returns true for Completed, Failed or Cancelled.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed { .. } | Self::Failed { .. } | Self::Cancelled
        )
    }

    /// Returns the response if Completed.
    #[must_use]
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            Self::Completed { response } => Some(response),
            _ => None,
        }
    }
}

/// Categories of send failures for user-friendly display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestErrorKind {
    /// Invalid URL format.
    InvalidUrl,

    /// DNS resolution failed.
    DnsError,

    /// Could not establish connection.
    ConnectionFailed,

    /// Connection was refused by the server.
    ConnectionRefused,

    /// Request timed out.
    Timeout,

    /// TLS/SSL error.
    TlsError,

    /// Body text is not valid JSON.
    InvalidBody,

    /// Too many redirects.
    TooManyRedirects,

    /// Request was cancelled.
    Cancelled,

    /// Unknown or unexpected error.
    Unknown,
}

impl RequestErrorKind {
    /// Returns user-friendly suggestions for this error type.
    #[must_use]
    pub const fn suggestions(&self) -> &[&'static str] {
        match self {
            Self::InvalidUrl => &[
                "Check that the URL starts with http:// or https://",
                "Verify there are no typos in the URL",
            ],
            Self::DnsError => &[
                "Check if the hostname is correct",
                "Verify your internet connection",
            ],
            Self::ConnectionFailed | Self::ConnectionRefused => &[
                "Check if the server is running",
                "Verify the port number is correct",
            ],
            Self::Timeout => &[
                "The server may be slow or overloaded",
                "Try increasing request_timeout_ms in settings",
            ],
            Self::TlsError => &[
                "The server's certificate may be invalid or expired",
                "Verify the hostname matches the certificate",
            ],
            Self::InvalidBody => &[
                "The body is sent as JSON and must parse as JSON",
                "Clear the body or fix the syntax",
            ],
            Self::TooManyRedirects => &["The server may have a redirect loop"],
            Self::Cancelled => &[],
            Self::Unknown => &["Check the error details for more information"],
        }
    }

    /// Returns a human-readable title for this error type.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::InvalidUrl => "Invalid URL",
            Self::DnsError => "DNS Resolution Failed",
            Self::ConnectionFailed => "Connection Failed",
            Self::ConnectionRefused => "Connection Refused",
            Self::Timeout => "Request Timeout",
            Self::TlsError => "SSL/TLS Error",
            Self::InvalidBody => "Invalid Request Body",
            Self::TooManyRedirects => "Too Many Redirects",
            Self::Cancelled => "Request Cancelled",
            Self::Unknown => "Request Failed",
        }
    }
}

/// Auto-save status shown next to the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum SaveStatus {
    /// A save is being written.
    Saving,
    /// The last save succeeded.
    Saved,
    /// The last save failed.
    Error(String),
}

impl SaveStatus {
    /// Returns true for `Error`.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}
