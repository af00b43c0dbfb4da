//! Pre-order traversal of a workflow tree.

use super::Workflow;
use crate::definition::{Node, NodeIndex, Parent};

/// A node reached during a [`Walk`].
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    /// Handle of the node.
    pub index: NodeIndex,
    /// The node itself.
    pub node: &'a Node,
    /// Containers between the node and the workflow root.
    pub depth: usize,
    /// Container whose output list holds the node.
    pub owner: Parent,
}

/// Pre-order iterator over the nodes of a [`Workflow`].
///
/// Outputs are visited in order, each subtree before its next sibling.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    workflow: &'a Workflow,
    stack: Vec<(NodeIndex, usize, Parent)>,
}

impl<'a> Walk<'a> {
    pub(super) fn new(workflow: &'a Workflow) -> Self {
        let stack = workflow
            .outputs()
            .iter()
            .rev()
            .map(|&index| (index, 0, Parent::Workflow))
            .collect();
        Self { workflow, stack }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, depth, owner) = self.stack.pop()?;
            let Some(node) = self.workflow.node(index) else {
                continue;
            };

            let outputs = self.workflow.outputs_of(index);
            self.stack.extend(
                outputs
                    .iter()
                    .rev()
                    .map(|&output| (output, depth + 1, Parent::Node(index))),
            );

            return Some(Visit {
                index,
                node,
                depth,
                owner,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::definition::{Expression, Node, Parent};
    use crate::workflow::Workflow;

    #[test]
    fn test_walk_reports_depth_and_owner() {
        let mut workflow = Workflow::new("w");
        let filter = workflow.add_output(Node::filter(Expression::simple("${body}")));
        let split = workflow
            .add_output_to(filter, Node::split(Expression::simple("${body}")))
            .unwrap();
        let to = workflow.add_output_to(split, Node::to("mock:parts")).unwrap();
        let stop = workflow.add_output(Node::stop());

        let visits: Vec<_> = workflow
            .walk()
            .map(|visit| (visit.index, visit.depth, visit.owner))
            .collect();
        assert_eq!(
            visits,
            vec![
                (filter, 0, Parent::Workflow),
                (split, 1, Parent::Node(filter)),
                (to, 2, Parent::Node(split)),
                (stop, 0, Parent::Workflow),
            ]
        );
    }

    #[test]
    fn test_walk_empty_workflow() {
        assert_eq!(Workflow::new("empty").walk().count(), 0);
    }
}
