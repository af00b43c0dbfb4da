//! Filtering, fan-out and flow-control definitions.

use serde::{Deserialize, Serialize};

use crate::definition::Expression;

/// Passes a message to its outputs only when the predicate holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDef {
    /// Predicate deciding whether the message continues.
    pub expression: Expression,
    /// Message property that records whether the message was filtered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_property_name: Option<String>,
}

/// Splits a message into parts, each processed by the outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitDef {
    /// Expression producing the parts.
    pub expression: Expression,
    /// Processes parts concurrently.
    #[serde(default)]
    pub parallel_processing: bool,
    /// Stops at the first part that fails.
    #[serde(default)]
    pub stop_on_exception: bool,
    /// Registry name of the strategy merging part results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation_strategy: Option<String>,
}

/// Repeats the outputs a number of times or while a predicate holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopDef {
    /// Iteration count, or the predicate when `do_while` is set.
    pub expression: Expression,
    /// Each iteration starts from a copy of the original message.
    #[serde(default)]
    pub copy: bool,
    /// Treats the expression as a loop-while predicate.
    #[serde(default)]
    pub do_while: bool,
}

/// Sends the same message to every output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MulticastDef {
    /// Sends to outputs concurrently.
    #[serde(default)]
    pub parallel_processing: bool,
    /// Stops at the first output that fails.
    #[serde(default)]
    pub stop_on_exception: bool,
    /// Registry name of the strategy merging replies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation_strategy: Option<String>,
}

/// Groups outputs into an explicit sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineDef {}

/// Limits how many messages pass per time period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrottleDef {
    /// Maximum messages per period.
    pub expression: Expression,
    /// Length of the period in milliseconds.
    #[serde(default = "default_time_period_millis")]
    pub time_period_millis: u64,
}

fn default_time_period_millis() -> u64 {
    1000
}

/// Delays each message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayDef {
    /// Delay in milliseconds.
    pub expression: Expression,
    /// Schedules the delay without blocking the caller.
    #[serde(default)]
    pub async_delayed: bool,
}

/// Stops routing the current message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopDef {}
