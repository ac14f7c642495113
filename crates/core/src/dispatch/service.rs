//! Dispatch service - core routing logic

use std::collections::HashMap;
use std::sync::Arc;

use finrelay_common::validation::ValidationError;
use finrelay_domain::{RelayError, Result};
use serde_json::Value;
use tracing::debug;

use super::ports::{ArgumentBag, ToolHandler};
use crate::catalog::{ParamSpec, ParamType, ToolSpec};

/// Validates tool-call argument bags and routes them to exactly one handler.
pub struct Dispatcher {
    specs: Vec<ToolSpec>,
    index: HashMap<String, usize>,
    handlers: HashMap<String, Arc<dyn ToolHandler>>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("specs", &self.specs)
            .field("index", &self.index)
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Dispatcher {
    /// Build a dispatcher over a catalog and its handler map.
    ///
    /// Verifies up front that tool names are unique and that every catalog
    /// entry has a handler (and vice versa), so coverage gaps fail at
    /// startup rather than during a call.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::Config` on duplicate tool names, a catalog entry
    /// without a handler, or a handler without a catalog entry.
    pub fn new(
        catalog: Vec<ToolSpec>,
        handlers: HashMap<String, Arc<dyn ToolHandler>>,
    ) -> Result<Self> {
        let mut index = HashMap::with_capacity(catalog.len());

        for (position, spec) in catalog.iter().enumerate() {
            if index.insert(spec.name.clone(), position).is_some() {
                return Err(RelayError::Config(format!(
                    "Duplicate tool name in catalog: {}",
                    spec.name
                )));
            }
            if !handlers.contains_key(&spec.name) {
                return Err(RelayError::Config(format!(
                    "No handler registered for tool: {}",
                    spec.name
                )));
            }
        }

        for name in handlers.keys() {
            if !index.contains_key(name) {
                return Err(RelayError::Config(format!(
                    "Handler registered for unknown tool: {name}"
                )));
            }
        }

        Ok(Self { specs: catalog, index, handlers })
    }

    /// Tool specs in catalog order.
    pub fn specs(&self) -> &[ToolSpec] {
        &self.specs
    }

    /// Validate an argument bag and invoke the matched tool's handler.
    ///
    /// # Errors
    ///
    /// - `RelayError::Validation` when the name is unknown or the bag does
    ///   not match the tool's parameter shapes; the message lists every
    ///   complaint.
    /// - `RelayError::UnknownAction` when a validated name has no handler
    ///   (a registry invariant breach, guarded instead of panicking).
    /// - `RelayError::Handler` when the handler fails outside the classified
    ///   taxonomy; classified errors pass through unchanged.
    pub async fn dispatch(&self, name: &str, args: Value) -> Result<Value> {
        let Some(&position) = self.index.get(name) else {
            return Err(RelayError::Validation(
                ValidationError::field(name, "unknown tool").to_string(),
            ));
        };
        let spec = &self.specs[position];

        let bag = match args {
            Value::Null => ArgumentBag::new(),
            Value::Object(map) => map,
            _ => {
                return Err(RelayError::Validation(
                    ValidationError::field("arguments", "expected an object").to_string(),
                ));
            }
        };

        validate_args(spec, &bag)?;
        debug!(tool = name, args = bag.len(), "dispatching tool call");

        let Some(handler) = self.handlers.get(name) else {
            return Err(RelayError::UnknownAction(name.to_string()));
        };

        handler.handle(bag).await.map_err(|err| normalize_handler_error(name, err))
    }
}

/// Validate the whole bag against one tool's parameter shapes, collecting
/// every complaint before failing.
fn validate_args(spec: &ToolSpec, bag: &ArgumentBag) -> Result<()> {
    let mut complaints = ValidationError::new();

    for param in &spec.params {
        match bag.get(&param.name) {
            None | Some(Value::Null) => {
                if param.required {
                    complaints.add_field_error(&param.name, "required parameter is missing");
                }
            }
            Some(value) => check_type(&mut complaints, &param.name, param, value),
        }
    }

    for key in bag.keys() {
        if spec.param(key).is_none() {
            complaints.add_field_error(key, "unexpected parameter");
        }
    }

    if complaints.is_empty() {
        Ok(())
    } else {
        Err(RelayError::Validation(complaints.to_string()))
    }
}

fn check_type(complaints: &mut ValidationError, name: &str, param: &ParamSpec, value: &Value) {
    let matches = match param.ty {
        ParamType::Text => value.is_string(),
        ParamType::Number => value.is_number(),
        ParamType::Flag => value.is_boolean(),
        ParamType::TextList => {
            value.as_array().is_some_and(|items| items.iter().all(Value::is_string))
        }
    };

    if !matches {
        complaints.add_field_error(name, format!("expected {}", param.ty.expected()));
        return;
    }

    if let (Some(allowed), Some(text)) = (&param.allowed, value.as_str()) {
        if !allowed.iter().any(|candidate| candidate == text) {
            complaints.add_field_error(name, format!("must be one of: {}", allowed.join(", ")));
        }
    }
}

/// Classified errors pass through; anything else is wrapped with the tool
/// name so nothing reaches the outer boundary raw.
fn normalize_handler_error(action: &str, err: anyhow::Error) -> RelayError {
    match err.downcast::<RelayError>() {
        Ok(relay) => relay,
        Err(other) => {
            RelayError::Handler { action: action.to_string(), message: other.to_string() }
        }
    }
}
