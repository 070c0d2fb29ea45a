//! Per-panel request execution.
//!
//! A controller owns at most one in-flight call. Every send gets a ticket;
//! a completion whose ticket is no longer the in-flight one is dropped, so a
//! superseded call can never deliver a result after its cancellation.

use std::collections::VecDeque;
use std::sync::Arc;

use courier_domain::{
    HttpResponse, RequestDraft, RequestErrorKind, RequestState, method_allows_body,
    normalize_method,
};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::ports::{CancellationToken, HttpClient, HttpClientError, OutboundRequest};

/// Message delivered for a cancelled call.
pub const CANCELLED_MESSAGE: &str = "request cancelled";

/// The draft could not be turned into a request.
#[derive(Debug, Error)]
pub enum PrepareError {
    /// The body is not valid JSON.
    #[error("Invalid JSON body: {0}")]
    InvalidJsonBody(#[from] serde_json::Error),
}

/// Builds the outbound request for a draft.
///
/// Headers with blank keys are dropped and keys are trimmed. A non-empty
/// body on a method that allows one must parse as JSON.
///
/// # Errors
///
/// Returns `PrepareError::InvalidJsonBody` if the body does not parse.
pub fn prepare_request(draft: &RequestDraft) -> Result<OutboundRequest, PrepareError> {
    let method = normalize_method(&draft.method);
    let body = if method_allows_body(&method) && !draft.body.trim().is_empty() {
        Some(serde_json::from_str(&draft.body)?)
    } else {
        None
    };
    Ok(OutboundRequest {
        method,
        url: draft.url.trim().to_string(),
        headers: draft.headers.to_lookup(),
        body,
    })
}

/// Terminal result of one send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The server answered, with any status.
    Completed {
        /// Ticket of the send.
        ticket: u64,
        /// The response.
        response: Box<HttpResponse>,
    },
    /// The send failed.
    Failed {
        /// Ticket of the send.
        ticket: u64,
        /// Failure category.
        kind: RequestErrorKind,
        /// Message for the user.
        message: String,
    },
    /// The send was cancelled explicitly or by a newer send.
    Cancelled {
        /// Ticket of the send.
        ticket: u64,
    },
}

impl SendOutcome {
    /// Ticket of the send this outcome belongs to.
    #[must_use]
    pub const fn ticket(&self) -> u64 {
        match self {
            Self::Completed { ticket, .. }
            | Self::Failed { ticket, .. }
            | Self::Cancelled { ticket } => *ticket,
        }
    }

    fn from_result(ticket: u64, result: Result<HttpResponse, HttpClientError>) -> Self {
        match result {
            Ok(response) => Self::Completed {
                ticket,
                response: Box::new(response),
            },
            Err(HttpClientError::Cancelled) => Self::Cancelled { ticket },
            Err(error) => Self::Failed {
                ticket,
                kind: error.to_error_kind(),
                message: error.to_string(),
            },
        }
    }
}

struct InFlight {
    ticket: u64,
    token: CancellationToken,
}

struct Completion {
    ticket: u64,
    result: Result<HttpResponse, HttpClientError>,
}

/// Owns the single outstanding call of a panel.
///
/// Calls run on spawned tasks; results come back through
/// [`RequestController::next_outcome`], which is cancel-safe and meant to be
/// polled from the panel's event loop.
pub struct RequestController<C> {
    client: Arc<C>,
    state: RequestState,
    in_flight: Option<InFlight>,
    next_ticket: u64,
    pending: VecDeque<SendOutcome>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl<C: HttpClient + 'static> RequestController<C> {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(client: Arc<C>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            client,
            state: RequestState::Idle,
            in_flight: None,
            next_ticket: 1,
            pending: VecDeque::new(),
            completions_tx,
            completions_rx,
        }
    }

    /// Current send state.
    #[must_use]
    pub const fn state(&self) -> &RequestState {
        &self.state
    }

    /// Returns true while a call is outstanding.
    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Starts sending `draft`, cancelling any outstanding call first.
    ///
    /// Returns the new ticket. A superseded call yields a `Cancelled` outcome;
    /// a body that fails to parse yields a `Failed` outcome without a call.
    /// Must be called inside a Tokio runtime.
    pub fn send(&mut self, draft: &RequestDraft) -> u64 {
        self.cancel();

        let ticket = self.next_ticket;
        self.next_ticket += 1;

        let request = match prepare_request(draft) {
            Ok(request) => request,
            Err(error) => {
                tracing::debug!(ticket, %error, "rejected request body");
                let outcome = SendOutcome::Failed {
                    ticket,
                    kind: RequestErrorKind::InvalidBody,
                    message: error.to_string(),
                };
                self.settle(&outcome);
                self.pending.push_back(outcome);
                return ticket;
            }
        };

        tracing::info!(ticket, method = %request.method, url = %request.url, "sending request");
        let (token, mut cancelled) = CancellationToken::new();
        let client = Arc::clone(&self.client);
        let completions = self.completions_tx.clone();
        tokio::spawn(async move {
            let result = tokio::select! {
                result = client.execute(&request) => result,
                () = cancelled.cancelled() => Err(HttpClientError::Cancelled),
            };
            // The controller may be gone; nothing to deliver to then.
            let _ = completions.send(Completion { ticket, result });
        });

        self.in_flight = Some(InFlight { ticket, token });
        self.state = RequestState::Sending { ticket };
        ticket
    }

    /// Cancels the outstanding call, if any, and returns to `Idle`.
    ///
    /// The cancelled call yields a `Cancelled` outcome. Returns false when
    /// nothing was outstanding.
    pub fn cancel(&mut self) -> bool {
        let Some(in_flight) = self.in_flight.take() else {
            return false;
        };
        in_flight.token.cancel();
        tracing::debug!(ticket = in_flight.ticket, "cancelled request");
        self.pending.push_back(SendOutcome::Cancelled {
            ticket: in_flight.ticket,
        });
        self.state = RequestState::Idle;
        true
    }

    /// Waits for the next outcome.
    ///
    /// Never resolves while nothing is outstanding or queued.
    pub async fn next_outcome(&mut self) -> SendOutcome {
        loop {
            if let Some(outcome) = self.pending.pop_front() {
                return outcome;
            }
            let Some(completion) = self.completions_rx.recv().await else {
                // The controller holds a sender, so the channel stays open.
                std::future::pending::<()>().await;
                continue;
            };
            let current = self.in_flight.as_ref().map(|f| f.ticket);
            if current != Some(completion.ticket) {
                tracing::debug!(ticket = completion.ticket, "dropping stale outcome");
                continue;
            }
            self.in_flight = None;
            let outcome = SendOutcome::from_result(completion.ticket, completion.result);
            self.settle(&outcome);
            match &outcome {
                SendOutcome::Completed { ticket, response } => {
                    tracing::info!(ticket, status = response.status, "request completed");
                }
                SendOutcome::Failed { ticket, message, .. } => {
                    tracing::info!(ticket, %message, "request failed");
                }
                SendOutcome::Cancelled { ticket } => {
                    tracing::debug!(ticket, "request cancelled");
                }
            }
            return outcome;
        }
    }

    /// Cancels any outstanding call and drops queued outcomes.
    pub fn dispose(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.token.cancel();
        }
        self.pending.clear();
        self.state = RequestState::Idle;
    }

    fn settle(&mut self, outcome: &SendOutcome) {
        self.state = match outcome {
            SendOutcome::Completed { response, .. } => RequestState::completed((**response).clone()),
            SendOutcome::Failed { kind, message, .. } => RequestState::failed(*kind, message.clone()),
            SendOutcome::Cancelled { .. } => RequestState::Cancelled,
        };
    }
}

impl<C> Drop for RequestController<C> {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.token.cancel();
        }
    }
}
