//! Port interfaces for tool dispatch
//!
//! These traits define the boundary between the dispatch service and the
//! infrastructure that actually performs endpoint calls.

use async_trait::async_trait;
use serde_json::Value;

/// A validated argument bag, keyed by parameter name.
pub type ArgumentBag = serde_json::Map<String, Value>;

/// One tool's executor, invoked only with arguments that already passed
/// schema validation.
///
/// Handlers report failures through `anyhow`: a classified
/// [`finrelay_domain::RelayError`] inside the chain passes through the
/// dispatcher unchanged, while any other failure is wrapped with the tool
/// name before it reaches the outer boundary.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Execute the tool against its remote endpoint.
    async fn handle(&self, args: ArgumentBag) -> anyhow::Result<Value>;
}
