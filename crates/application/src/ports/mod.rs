//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait implemented by an adapter in the infrastructure layer.

mod clock;
mod command_parser;
mod http_client;
mod storage;

pub use clock::{Clock, ManualClock};
pub use command_parser::CommandParser;
pub use http_client::{
    CancellationReceiver, CancellationToken, HttpClient, HttpClientError, HttpFuture,
    OutboundRequest,
};
pub use storage::{SnapshotError, SnapshotStorage};
