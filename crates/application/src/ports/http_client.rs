//! HTTP Client port

use std::future::Future;
use std::pin::Pin;

use courier_domain::{HttpResponse, RequestErrorKind};
use indexmap::IndexMap;
use thiserror::Error;
use tokio::sync::watch;

/// A request ready for the transport: headers folded into a lookup and the
/// body already decoded as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutboundRequest {
    /// Upper-cased method token.
    pub method: String,
    /// Target URL.
    pub url: String,
    /// Header lookup; blank keys were dropped.
    pub headers: IndexMap<String, String>,
    /// JSON body, sent only when present.
    pub body: Option<serde_json::Value>,
}

/// Errors from the transport. Any HTTP status is a success at this level.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpClientError {
    /// The URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The method token is not a valid HTTP method.
    #[error("Invalid method: {0}")]
    InvalidMethod(String),

    /// A header name or value is not representable on the wire.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The host name did not resolve.
    #[error("DNS resolution failed for {host}: {message}")]
    DnsError {
        /// Host that was looked up.
        host: String,
        /// Resolver message.
        message: String,
    },

    /// The server refused the connection.
    #[error("Connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// Some other connect-phase failure.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// A client-side or transport timeout elapsed.
    #[error("Request timed out{}", timeout_suffix(.timeout_ms.as_ref()))]
    Timeout {
        /// Configured timeout, if one was set.
        timeout_ms: Option<u64>,
    },

    /// Certificate or handshake failure.
    #[error("TLS error: {0}")]
    Tls(String),

    /// The redirect limit was exceeded.
    #[error("Too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit.
        max: usize,
    },

    /// The call was aborted before it finished.
    #[error("request cancelled")]
    Cancelled,

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

impl HttpClientError {
    /// Maps the error to a display category.
    #[must_use]
    pub const fn to_error_kind(&self) -> RequestErrorKind {
        match self {
            Self::InvalidUrl(_) => RequestErrorKind::InvalidUrl,
            Self::DnsError { .. } => RequestErrorKind::DnsError,
            Self::ConnectionRefused { .. } => RequestErrorKind::ConnectionRefused,
            Self::ConnectionFailed(_) => RequestErrorKind::ConnectionFailed,
            Self::Timeout { .. } => RequestErrorKind::Timeout,
            Self::Tls(_) => RequestErrorKind::TlsError,
            Self::TooManyRedirects { .. } => RequestErrorKind::TooManyRedirects,
            Self::Cancelled => RequestErrorKind::Cancelled,
            Self::InvalidMethod(_) | Self::InvalidHeader(_) | Self::Other(_) => {
                RequestErrorKind::Unknown
            }
        }
    }
}

/// Boxed future returned by [`HttpClient::execute`].
pub type HttpFuture<'a> =
    Pin<Box<dyn Future<Output = Result<HttpResponse, HttpClientError>> + Send + 'a>>;

/// Port for executing HTTP requests.
pub trait HttpClient: Send + Sync {
    /// Executes `request`.
    ///
    /// Dropping the returned future aborts the call.
    fn execute(&self, request: &OutboundRequest) -> HttpFuture<'_>;
}

/// Sender half of a cooperative cancellation signal.
#[derive(Debug)]
pub struct CancellationToken {
    tx: watch::Sender<bool>,
}

/// Receiver half of a cooperative cancellation signal.
#[derive(Debug, Clone)]
pub struct CancellationReceiver {
    rx: watch::Receiver<bool>,
}

impl CancellationToken {
    /// Creates a linked token/receiver pair.
    #[must_use]
    pub fn new() -> (Self, CancellationReceiver) {
        let (tx, rx) = watch::channel(false);
        (Self { tx }, CancellationReceiver { rx })
    }

    /// Signals cancellation. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Returns true once `cancel` has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

impl CancellationReceiver {
    /// Completes once the token is cancelled or dropped.
    pub async fn cancelled(&mut self) {
        // A dropped token also ends the wait.
        let _ = self.rx.wait_for(|cancelled| *cancelled).await;
    }

    /// Returns true if cancellation has been signalled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }
}

fn timeout_suffix(timeout_ms: Option<&u64>) -> String {
    timeout_ms.map_or_else(String::new, |ms| format!(" after {ms} ms"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cancellation_wakes_receiver() {
        let (token, mut receiver) = CancellationToken::new();
        assert!(!receiver.is_cancelled());
        token.cancel();
        receiver.cancelled().await;
        assert!(receiver.is_cancelled());
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_dropped_token_ends_wait() {
        let (token, mut receiver) = CancellationToken::new();
        drop(token);
        receiver.cancelled().await;
    }

    #[test]
    fn test_timeout_message_names_duration_only_when_configured() {
        assert_eq!(
            HttpClientError::Timeout {
                timeout_ms: Some(1500)
            }
            .to_string(),
            "Request timed out after 1500 ms"
        );
        assert_eq!(
            HttpClientError::Timeout { timeout_ms: None }.to_string(),
            "Request timed out"
        );
    }

    #[test]
    fn test_error_kind_mapping() {
        assert_eq!(
            HttpClientError::Timeout {
                timeout_ms: Some(10)
            }
            .to_error_kind(),
            RequestErrorKind::Timeout
        );
        assert_eq!(
            HttpClientError::Cancelled.to_error_kind(),
            RequestErrorKind::Cancelled
        );
        assert_eq!(
            HttpClientError::Other("x".into()).to_error_kind(),
            RequestErrorKind::Unknown
        );
    }
}
