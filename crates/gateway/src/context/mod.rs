//! Gateway context - dependency wiring and the inbound tool-call boundary

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use finrelay_common::resilience::SlidingWindow;
use finrelay_core::catalog::{builtin_catalog, ToolSpec};
use finrelay_core::dispatch::ports::ToolHandler;
use finrelay_core::{format, Dispatcher};
use finrelay_domain::{RelayConfig, RelayError, Result};
use finrelay_infra::api::{EndpointClient, EndpointHandler};
use finrelay_infra::config::load_from_env;
use serde_json::Value;
use tracing::{info, warn};

/// Holds the wired adapter: one governor, one endpoint client, one handler
/// per catalog tool, and the dispatcher over them.
///
/// Construction fails fast: a missing credential, an invalid rate limit, or
/// a catalog/handler coverage gap never survives to the first call.
pub struct RelayContext {
    dispatcher: Dispatcher,
}

impl RelayContext {
    /// Build a context from `FINRELAY_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::Config` when the environment is incomplete or
    /// invalid.
    pub fn from_env() -> Result<Self> {
        Self::new(load_from_env()?)
    }

    /// Build a context from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::Config` when the configuration is invalid or
    /// handler wiring fails its coverage check.
    pub fn new(config: RelayConfig) -> Result<Self> {
        let governor = SlidingWindow::new(config.rate_limit).map_err(RelayError::Config)?;
        let client = Arc::new(EndpointClient::new(config)?);

        let catalog = builtin_catalog();
        let mut handlers: HashMap<String, Arc<dyn ToolHandler>> =
            HashMap::with_capacity(catalog.len());
        for spec in &catalog {
            handlers.insert(
                spec.name.clone(),
                Arc::new(EndpointHandler::new(
                    spec.clone(),
                    Arc::clone(&client),
                    governor.clone(),
                )),
            );
        }

        let dispatcher = Dispatcher::new(catalog, handlers)?;
        Ok(Self { dispatcher })
    }

    /// Handle one tool invocation from the outer protocol layer.
    ///
    /// Always returns a rendered string: pretty-printed JSON for a
    /// successful payload, or `{"error": "..."}` for any failure. Errors
    /// never escape this boundary.
    pub async fn handle_tool_call(&self, name: &str, args: Value) -> String {
        let started = Instant::now();
        let result = self.dispatcher.dispatch(name, args).await;
        let duration_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(_) => info!(tool = name, duration_ms, "tool_call_success"),
            Err(err) => {
                warn!(tool = name, duration_ms, error = err.label(), "tool_call_failure");
            }
        }

        format::render(result)
    }

    /// The catalog advertised to the outer protocol layer.
    pub fn tools(&self) -> &[ToolSpec] {
        self.dispatcher.specs()
    }
}
