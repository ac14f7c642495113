//! # FinRelay Core
//!
//! Business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The tool catalog (closed set of schema-described endpoint tools)
//! - The dispatch service that validates argument bags and routes them to
//!   exactly one handler
//! - The response formatter that renders results at the tool boundary
//!
//! ## Architecture Principles
//! - Only depends on `finrelay-common` and `finrelay-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod catalog;
pub mod dispatch;
pub mod format;

// Re-export specific items to avoid ambiguity
pub use catalog::{builtin_catalog, ParamLocation, ParamSpec, ParamType, ToolSpec};
pub use dispatch::ports::{ArgumentBag, ToolHandler};
pub use dispatch::Dispatcher;
pub use format::render;
