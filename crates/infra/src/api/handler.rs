//! Generic data-driven tool handler
//!
//! Every catalog tool shares this handler: it expands the tool's path
//! template through the path codec, collects query parameters into an
//! ordered bag, waits for the shared rate governor to admit the call, and
//! delegates to the endpoint client. The governor delays outbound calls;
//! it never fails them — only an upstream 429 produces a rate-limit error.

use std::sync::Arc;

use async_trait::async_trait;
use finrelay_common::resilience::{Admission, Clock, SlidingWindow, SystemClock};
use finrelay_core::catalog::ToolSpec;
use finrelay_core::dispatch::ports::{ArgumentBag, ToolHandler};
use finrelay_domain::{QueryParams, QueryValue, Result};
use serde_json::Value;
use tracing::debug;

use super::client::EndpointClient;
use super::params::encode_path_param;

/// Handler backing one catalog tool with a remote endpoint call.
pub struct EndpointHandler<C: Clock = SystemClock> {
    spec: ToolSpec,
    client: Arc<EndpointClient>,
    governor: SlidingWindow<C>,
}

impl<C: Clock> EndpointHandler<C> {
    /// Create a handler for one tool over a shared client and governor.
    pub fn new(spec: ToolSpec, client: Arc<EndpointClient>, governor: SlidingWindow<C>) -> Self {
        Self { spec, client, governor }
    }

    /// Wait until the governor admits one outbound call.
    async fn acquire_slot(&self) {
        loop {
            match self.governor.try_acquire() {
                Admission::Admitted => return,
                Admission::Denied { retry_in } => {
                    debug!(
                        tool = %self.spec.name,
                        wait_ms = retry_in.as_millis() as u64,
                        "outbound call delayed by rate governor"
                    );
                    tokio::time::sleep(retry_in).await;
                }
            }
        }
    }
}

#[async_trait]
impl<C: Clock> ToolHandler for EndpointHandler<C> {
    async fn handle(&self, args: ArgumentBag) -> anyhow::Result<Value> {
        let path = build_path(&self.spec, &args)?;
        let query = build_query(&self.spec, &args);

        self.acquire_slot().await;

        let payload = self.client.fetch(&path, &query).await?;
        Ok(payload)
    }
}

/// Expand the path template, encoding each path parameter.
fn build_path(spec: &ToolSpec, args: &ArgumentBag) -> Result<String> {
    let mut path = spec.path_template.clone();

    for param in spec.path_params() {
        let segment = encode_path_param(&param.name, args.get(&param.name))?;
        path = path.replace(&format!("{{{}}}", param.name), &segment);
    }

    Ok(path)
}

/// Collect present query arguments into an ordered bag, spec order.
fn build_query(spec: &ToolSpec, args: &ArgumentBag) -> QueryParams {
    let mut params = QueryParams::new();

    for param in spec.query_params() {
        if let Some(value) = args.get(&param.name) {
            if let Some(query_value) = QueryValue::from_json(value) {
                params.push(param.name.as_str(), query_value);
            }
        }
    }

    params
}
