//! Workflow-wide scopes.
//!
//! These nodes configure behavior for the whole workflow. They are only
//! valid as direct children of the workflow root and are abstract: the
//! execution compiler folds them into the stages they affect instead of
//! compiling them into stages of their own.

use serde::{Deserialize, Serialize};

use crate::definition::Expression;

/// Handles failures of the given exception types anywhere in the workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnExceptionDef {
    /// Exception type names handled by this scope.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exceptions: Vec<String>,
    /// Extra predicate that must hold for this scope to apply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_when: Option<Expression>,
    /// Predicate marking the failure as handled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handled: Option<Expression>,
    /// Predicate letting the message continue after handling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continued: Option<Expression>,
    /// Registry name of the redelivery policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redelivery_policy: Option<String>,
    /// Hands the original incoming message to the handler.
    #[serde(default)]
    pub use_original_message: bool,
}

impl OnExceptionDef {
    /// Creates a scope for the given exception types.
    pub fn new<I, S>(exceptions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exceptions: exceptions.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// Runs its outputs once a message has finished the workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnCompletionDef {
    /// Only runs for messages that failed.
    #[serde(default)]
    pub only_on_failure: bool,
    /// Only runs for messages that completed successfully.
    #[serde(default)]
    pub only_on_completion: bool,
    /// Extra predicate that must hold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_when: Option<Expression>,
}

/// Runs its outputs before every step of the workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterceptDef {
    /// Only intercepts messages matching the predicate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_when: Option<Expression>,
}

/// Runs its outputs before messages are sent to matching endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterceptSendToEndpointDef {
    /// Endpoint URI or pattern to intercept.
    pub uri: String,
    /// Skips the original send after the interceptor ran.
    #[serde(default)]
    pub skip_send_to_original_endpoint: bool,
    /// Only intercepts messages matching the predicate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_when: Option<Expression>,
}
