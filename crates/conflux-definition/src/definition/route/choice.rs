//! Content-based routing definitions.

use serde::{Deserialize, Serialize};

use crate::definition::Expression;

/// A content-based router.
///
/// Outputs are [`WhenDef`] branches evaluated in order, optionally followed
/// by a single [`OtherwiseDef`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceDef {
    /// Evaluates branch predicates once up front instead of per message.
    #[serde(default)]
    pub precondition: bool,
}

/// A guarded branch of a [`ChoiceDef`].
///
/// Setting the id of a `when` that already has outputs relabels its last
/// output instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhenDef {
    /// Predicate selecting this branch.
    pub expression: Expression,
}

impl WhenDef {
    /// Creates a new branch guarded by the predicate.
    pub fn new(expression: Expression) -> Self {
        Self { expression }
    }
}

/// The fallback branch of a [`ChoiceDef`].
///
/// Setting the id of an `otherwise` that already has outputs relabels its
/// last output instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherwiseDef {}
