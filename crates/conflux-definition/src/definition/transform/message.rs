//! Body and header manipulation definitions.

use serde::{Deserialize, Serialize};

use crate::definition::Expression;

/// Replaces the message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetBodyDef {
    /// Expression producing the new body.
    pub expression: Expression,
}

/// Sets a message header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetHeaderDef {
    /// Header name.
    pub name: String,
    /// Expression producing the header value.
    pub expression: Expression,
}

/// Removes a message header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveHeaderDef {
    /// Header name.
    pub name: String,
}

/// Transforms the message body into the reply body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformDef {
    /// Expression producing the transformed body.
    pub expression: Expression,
}

/// Converts the message body to another type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertBodyDef {
    /// Target type name.
    pub to_type: String,
    /// Charset used for text conversions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
}

/// Sorts the items produced by an expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDef {
    /// Expression producing the items to sort.
    pub expression: Expression,
    /// Registry name of the comparator; natural order when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparator: Option<String>,
}

/// Fails the message unless the predicate holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateDef {
    /// Predicate the message must satisfy.
    pub expression: Expression,
}

/// Severity of a [`LogDef`] message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

/// Logs a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogDef {
    /// Message text, may reference the message via the simple language.
    pub message: String,
    /// Severity.
    #[serde(default)]
    pub level: LogLevel,
    /// Logger name; the workflow id when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_name: Option<String>,
}
