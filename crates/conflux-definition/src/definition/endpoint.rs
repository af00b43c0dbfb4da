//! Endpoint definitions: the workflow input and the sending nodes.

use serde::{Deserialize, Serialize};

use super::Expression;

/// The source endpoint a workflow consumes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputDefinition {
    /// Endpoint URI (e.g. `jms:queue:orders`).
    pub uri: String,
}

impl InputDefinition {
    /// Creates a new input definition.
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

/// Message exchange pattern used when sending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangePattern {
    /// Fire and forget.
    #[default]
    InOnly,
    /// Request and reply.
    InOut,
}

/// Sends the message to a static endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToDef {
    /// Target endpoint URI.
    pub uri: String,
    /// Overrides the exchange pattern for this send.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<ExchangePattern>,
}

impl ToDef {
    /// Creates a new send definition.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            pattern: None,
        }
    }
}

/// Sends the message to an endpoint whose URI is computed per message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToDynamicDef {
    /// URI template, resolved by the expression language at runtime.
    pub uri: String,
    /// Skips sending instead of failing when the URI does not resolve.
    #[serde(default)]
    pub ignore_invalid_endpoint: bool,
}

/// Sends a copy of the message to an endpoint without waiting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireTapDef {
    /// Target endpoint URI.
    pub uri: String,
}

/// Calls an endpoint and merges its reply into the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichDef {
    /// Expression computing the endpoint URI.
    pub expression: Expression,
    /// Registry name of the strategy merging the reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation_strategy: Option<String>,
}
