//! Application use cases (business logic orchestration).

mod auto_save_request;
mod import_command;
mod load_request;
mod save_request;

pub use auto_save_request::*;
pub use import_command::*;
pub use load_request::*;
pub use save_request::*;
