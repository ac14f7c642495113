//! # FinRelay Gateway
//!
//! Composition root for the adapter. Builds the shared rate governor, the
//! endpoint client, one handler per catalog tool, and the dispatcher, then
//! exposes the inbound boundary the outer protocol layer calls per tool
//! invocation: a tool name plus an untyped argument bag in, a rendered JSON
//! string out.
//!
//! The outer RPC transport, documentation generators, and catalog diff
//! scripts all live outside this workspace; they consume only
//! [`RelayContext::handle_tool_call`] and [`RelayContext::tools`].

pub mod context;
pub mod logging;

pub use context::RelayContext;
pub use logging::init_tracing;
