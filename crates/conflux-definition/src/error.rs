//! Workflow definition error types.

use thiserror::Error;

use crate::definition::NodeIndex;
use crate::registry::ReferenceKind;

/// Result type for workflow definition operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Errors that can occur while building, instantiating or validating
/// workflow definitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// A required template parameter has no binding and no default.
    #[error("template '{template}' requires parameter '{parameter}', but it was not bound")]
    MissingParameter {
        /// ID of the template being instantiated.
        template: String,
        /// Name of the unbound parameter.
        parameter: String,
    },

    /// The tree breaks a structural rule (placement, ordering, uniqueness).
    #[error("structural violation at {location}: {message}")]
    StructuralViolation {
        /// Where the violation was found (workflow id and node label).
        location: String,
        /// Description of the violated rule.
        message: String,
    },

    /// A by-name reference could not be resolved by the registry.
    #[error("unresolved {kind} reference '{name}'")]
    UnresolvedReference {
        /// What the reference points at.
        kind: ReferenceKind,
        /// The referenced name.
        name: String,
    },

    /// An arena handle does not name a live node of this workflow.
    #[error("node {0} does not exist in this workflow")]
    UnknownNode(NodeIndex),

    /// Outputs were appended to a node that cannot own any.
    #[error("node {index} ({kind}) does not accept outputs")]
    NotAContainer {
        /// Handle of the offending node.
        index: NodeIndex,
        /// Short name of the node kind.
        kind: &'static str,
    },
}

impl WorkflowError {
    /// Creates a structural violation error.
    pub fn structural(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StructuralViolation {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Creates an unresolved reference error.
    pub fn unresolved(kind: ReferenceKind, name: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            kind,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_message() {
        let err = WorkflowError::MissingParameter {
            template: "throttled".into(),
            parameter: "count".into(),
        };
        assert_eq!(
            err.to_string(),
            "template 'throttled' requires parameter 'count', but it was not bound"
        );
    }

    #[test]
    fn test_unresolved_reference_message() {
        let err = WorkflowError::unresolved(ReferenceKind::AggregationStrategy, "sumAll");
        assert_eq!(
            err.to_string(),
            "unresolved aggregation_strategy reference 'sumAll'"
        );
    }
}
