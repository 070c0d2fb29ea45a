//! Courier UI - Panel message surface
//!
//! This crate connects a rendered request panel to the application layer.
//! Rendering itself lives in the host; panels talk to their session only
//! through [`PanelCommand`] and [`PanelUpdate`] messages.

pub mod bridge;
pub mod registry;
pub mod session;

pub use bridge::{PanelCommand, PanelUpdate};
pub use registry::{OpenedPanel, PanelHandle, PanelId, PanelRegistry};
pub use session::PanelSession;
