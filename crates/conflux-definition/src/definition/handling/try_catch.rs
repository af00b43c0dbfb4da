//! Try/catch/finally definitions.

use serde::{Deserialize, Serialize};

use crate::definition::Expression;

/// Guards its outputs; failures are handled by the [`DoCatchDef`] and
/// [`DoFinallyDef`] outputs that follow them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoTryDef {}

/// Handles failures of the enclosing [`DoTryDef`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoCatchDef {
    /// Exception type names handled by this block; empty means any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exceptions: Vec<String>,
    /// Extra predicate that must hold for this block to handle the failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_when: Option<Expression>,
}

/// Runs after the enclosing [`DoTryDef`] whether or not it failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoFinallyDef {}

/// Fails the message with an exception.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrowExceptionDef {
    /// Exception type name.
    pub exception_type: String,
    /// Exception message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Rolls back the current transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollbackDef {
    /// Message of the rollback exception.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Marks the transaction for rollback without raising.
    #[serde(default)]
    pub mark_rollback_only: bool,
}
