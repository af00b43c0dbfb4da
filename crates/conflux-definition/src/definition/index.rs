//! Arena handles for nodes in a workflow tree.

use derive_more::{Debug, Display, From, Into};
use serde::{Deserialize, Serialize};

/// Handle of a node inside the arena of one [`Workflow`].
///
/// Handles are only meaningful for the workflow that issued them. A deep
/// copy allocates fresh handles, so a handle never aliases a node of
/// another tree.
///
/// [`Workflow`]: crate::workflow::Workflow
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Debug, Display, From, Into)]
#[debug("#{_0}")]
#[display("#{_0}")]
#[serde(transparent)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Creates a handle from an arena position.
    #[inline]
    pub const fn new(position: usize) -> Self {
        Self(position)
    }

    /// Returns the arena position.
    #[inline]
    pub const fn position(self) -> usize {
        self.0
    }
}

/// The logical or structural parent of a node.
///
/// Top-level outputs hang off the workflow root itself, which has no
/// arena slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Debug)]
pub enum Parent {
    /// The workflow root.
    Workflow,
    /// Another node of the same workflow.
    Node(NodeIndex),
}

impl Parent {
    /// Returns the parent node handle, or `None` for the workflow root.
    #[inline]
    pub const fn node(self) -> Option<NodeIndex> {
        match self {
            Parent::Workflow => None,
            Parent::Node(index) => Some(index),
        }
    }

    /// Returns whether this is the workflow root.
    #[inline]
    pub const fn is_workflow(self) -> bool {
        matches!(self, Parent::Workflow)
    }
}

impl From<NodeIndex> for Parent {
    fn from(index: NodeIndex) -> Self {
        Parent::Node(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_index_display() {
        assert_eq!(NodeIndex::new(7).to_string(), "#7");
        assert_eq!(format!("{:?}", NodeIndex::new(7)), "#7");
    }

    #[test]
    fn test_node_index_keeps_large_positions() {
        assert_eq!(NodeIndex::new(usize::MAX).position(), usize::MAX);
        assert_ne!(NodeIndex::new(1 << 20), NodeIndex::new(0));
    }

    #[test]
    fn test_parent_node() {
        assert_eq!(Parent::Workflow.node(), None);
        assert_eq!(Parent::from(NodeIndex::new(3)).node(), Some(NodeIndex::new(3)));
        assert!(Parent::Workflow.is_workflow());
    }
}
