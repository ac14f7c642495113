//! Action dispatch - validation and routing of tool calls
//!
//! The dispatcher narrows an untyped argument bag to one catalog tool,
//! validates it against that tool's parameter shapes, and invokes the
//! registered handler. Handler coverage is verified at construction time so
//! a missing handler is a startup failure, not a dispatch-time surprise.

pub mod ports;
pub mod service;

pub use ports::{ArgumentBag, ToolHandler};
pub use service::Dispatcher;
