//! In-memory test doubles for the application ports.
//!
//! Used by unit tests here and by the ui and app integration tests.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::DateTime;
use courier_domain::HttpResponse;
use parking_lot::Mutex;

use crate::ports::{
    Clock, HttpClient, HttpClientError, HttpFuture, ManualClock, OutboundRequest, SnapshotError,
    SnapshotStorage,
};
use crate::store::{FolderStore, Library, RequestStore, SharedLibrary};

/// A clock pinned to 2024-01-01T00:00:00Z.
#[must_use]
pub fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(manual_clock())
}

/// A manual clock starting at 2024-01-01T00:00:00Z.
#[must_use]
pub fn manual_clock() -> ManualClock {
    ManualClock::new(DateTime::from_timestamp_millis(1_704_067_200_000).unwrap_or_default())
}

/// A shared library over empty in-memory snapshots and a fixed clock.
#[must_use]
pub fn memory_library() -> SharedLibrary {
    let clock = fixed_clock();
    Library::new(
        FolderStore::open(Box::new(MemorySnapshot::empty()), Arc::clone(&clock)),
        RequestStore::open(Box::new(MemorySnapshot::empty()), clock),
    )
    .shared()
}

#[derive(Debug)]
struct SnapshotState<T> {
    current: Option<T>,
    malformed: bool,
    fail_writes: bool,
    writes: usize,
}

/// Snapshot storage kept in memory, with switchable failures.
#[derive(Debug)]
pub struct MemorySnapshot<T> {
    state: Arc<Mutex<SnapshotState<T>>>,
}

impl<T> Clone for MemorySnapshot<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Clone> MemorySnapshot<T> {
    fn with_state(current: Option<T>, malformed: bool) -> Self {
        Self {
            state: Arc::new(Mutex::new(SnapshotState {
                current,
                malformed,
                fail_writes: false,
                writes: 0,
            })),
        }
    }

    /// No document stored yet.
    #[must_use]
    pub fn empty() -> Self {
        Self::with_state(None, false)
    }

    /// A document is already stored.
    #[must_use]
    pub fn with(snapshot: T) -> Self {
        Self::with_state(Some(snapshot), false)
    }

    /// The stored document cannot be decoded.
    #[must_use]
    pub fn malformed() -> Self {
        Self::with_state(None, true)
    }

    /// Makes every following write fail, or succeed again.
    pub fn fail_writes(&self, fail: bool) {
        self.state.lock().fail_writes = fail;
    }

    /// The last successfully written document.
    #[must_use]
    pub fn current(&self) -> Option<T> {
        self.state.lock().current.clone()
    }

    /// Number of successful writes.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.state.lock().writes
    }
}

impl<T: Clone + Send + 'static> SnapshotStorage<T> for MemorySnapshot<T> {
    fn load(&self) -> Result<Option<T>, SnapshotError> {
        let state = self.state.lock();
        if state.malformed {
            return Err(SnapshotError::Malformed {
                location: self.location(),
                message: "expected value at line 1 column 1".to_string(),
            });
        }
        Ok(state.current.clone())
    }

    fn store(&self, snapshot: &T) -> Result<(), SnapshotError> {
        let mut state = self.state.lock();
        if state.fail_writes {
            return Err(SnapshotError::Io {
                location: self.location(),
                message: "disk full".to_string(),
            });
        }
        state.current = Some(snapshot.clone());
        state.malformed = false;
        state.writes += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

/// Scripted reply of a [`MockHttpClient`].
#[derive(Debug, Clone)]
pub struct MockReply {
    /// Delay before the reply resolves.
    pub delay: Duration,
    /// What the call resolves to.
    pub result: Result<HttpResponse, HttpClientError>,
}

impl MockReply {
    /// A successful reply with `status` and a text body.
    #[must_use]
    pub fn status(status: u16, body: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(HttpResponse::new(status, indexmap::IndexMap::new(), body.as_bytes())),
        }
    }

    /// A failing reply.
    #[must_use]
    pub const fn error(error: HttpClientError) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(error),
        }
    }

    /// Delays the reply.
    #[must_use]
    pub const fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// HTTP client that replays scripted replies in order and records requests.
///
/// Once the script runs out the last reply is repeated.
#[derive(Debug, Default)]
pub struct MockHttpClient {
    replies: Mutex<Vec<MockReply>>,
    received: Mutex<Vec<OutboundRequest>>,
}

impl MockHttpClient {
    /// Creates a client with the given script.
    #[must_use]
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Requests seen so far.
    #[must_use]
    pub fn received(&self) -> Vec<OutboundRequest> {
        self.received.lock().clone()
    }

    fn next_reply(&self) -> MockReply {
        let mut replies = self.replies.lock();
        if replies.len() > 1 {
            replies.remove(0)
        } else {
            replies
                .first()
                .cloned()
                .unwrap_or_else(|| MockReply::status(200, ""))
        }
    }
}

impl HttpClient for MockHttpClient {
    fn execute(&self, request: &OutboundRequest) -> HttpFuture<'_> {
        self.received.lock().push(request.clone());
        let reply = self.next_reply();
        Box::pin(delayed(reply))
    }
}

fn delayed(
    reply: MockReply,
) -> impl Future<Output = Result<HttpResponse, HttpClientError>> + Send + 'static {
    async move {
        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply.result
    }
}
