//! Request execution: the per-panel controller, debounce timers and auto-save.

mod autosave;
mod controller;
mod debounce;

pub use autosave::AutoSaver;
pub use controller::{
    CANCELLED_MESSAGE, PrepareError, RequestController, SendOutcome, prepare_request,
};
pub use debounce::DebounceTimer;
