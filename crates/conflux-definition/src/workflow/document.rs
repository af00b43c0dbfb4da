//! Nested document form of a workflow.
//!
//! The arena is an in-memory layout. On the wire a workflow is a nested
//! document where every container carries its own `outputs`, which is the
//! shape document front-ends read and write. Loading a document replays it
//! through [`Workflow::append`], so container links are always rebuilt and
//! outputs on a leaf node are rejected.

use serde::{Deserialize, Serialize};

use super::Workflow;
use crate::definition::{InputDefinition, Node, NodeIndex, Parent};
use crate::error::{WorkflowError, WorkflowResult};

/// Serialized form of a [`Workflow`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowDocument {
    /// Workflow identifier.
    pub id: String,
    /// Description of what this workflow does.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Source endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<InputDefinition>,
    /// Registry name of the error handler factory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_handler: Option<String>,
    /// Whether the workflow starts with its deployment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_startup: Option<bool>,
    /// Top-level outputs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<NodeDocument>,
}

/// Serialized form of a node and its outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDocument {
    /// The node record.
    #[serde(flatten)]
    pub node: Node,
    /// Outputs of the node, if it is a container.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<NodeDocument>,
}

impl NodeDocument {
    /// Creates a document for a node without outputs.
    pub fn new(node: Node) -> Self {
        Self {
            node,
            outputs: Vec::new(),
        }
    }

    /// Appends an output document.
    pub fn with_output(mut self, output: NodeDocument) -> Self {
        self.outputs.push(output);
        self
    }
}

impl Workflow {
    /// Returns the nested document form of this workflow.
    pub fn to_document(&self) -> WorkflowDocument {
        WorkflowDocument {
            id: self.id.clone(),
            description: self.description.clone(),
            input: self.input.clone(),
            error_handler: self.error_handler.clone(),
            auto_startup: self.auto_startup,
            outputs: self.documents(self.outputs()),
        }
    }

    /// Builds a workflow from its nested document form.
    pub fn from_document(document: WorkflowDocument) -> WorkflowResult<Self> {
        let WorkflowDocument {
            id,
            description,
            input,
            error_handler,
            auto_startup,
            outputs,
        } = document;

        let mut workflow = Workflow::new(id);
        workflow.description = description;
        workflow.input = input;
        workflow.error_handler = error_handler;
        workflow.auto_startup = auto_startup;

        for output in outputs {
            workflow.load(Parent::Workflow, output)?;
        }
        Ok(workflow)
    }

    fn documents(&self, roots: &[NodeIndex]) -> Vec<NodeDocument> {
        // Pre-order entries, each with the position of its owner entry.
        let mut order: Vec<(NodeIndex, Option<usize>)> = Vec::with_capacity(self.len());
        let mut pending: Vec<_> = roots.iter().rev().map(|&index| (index, None)).collect();
        while let Some((index, owner)) = pending.pop() {
            let position = order.len();
            order.push((index, owner));
            let outputs = self.outputs_of(index).iter().rev();
            pending.extend(outputs.map(|&output| (output, Some(position))));
        }

        // Children are collected in reverse while unwinding the pre-order.
        let mut outputs: Vec<Vec<NodeDocument>> = order.iter().map(|_| Vec::new()).collect();
        let mut documents = Vec::with_capacity(roots.len());
        for (position, &(index, owner)) in order.iter().enumerate().rev() {
            let Some(node) = self.node(index) else {
                continue;
            };
            let mut children = std::mem::take(&mut outputs[position]);
            children.reverse();
            let document = NodeDocument {
                node: node.clone(),
                outputs: children,
            };
            match owner {
                Some(owner) => outputs[owner].push(document),
                None => documents.push(document),
            }
        }
        documents.reverse();
        documents
    }

    fn load(&mut self, parent: Parent, document: NodeDocument) -> WorkflowResult<NodeIndex> {
        let NodeDocument { node, outputs } = document;
        let root = self.append(parent, node)?;

        let mut pending: Vec<_> = outputs.into_iter().rev().map(|output| (root, output)).collect();
        while let Some((container, NodeDocument { node, outputs })) = pending.pop() {
            let index = self.append(Parent::Node(container), node)?;
            pending.extend(outputs.into_iter().rev().map(|output| (index, output)));
        }
        Ok(root)
    }
}

impl From<Workflow> for WorkflowDocument {
    fn from(workflow: Workflow) -> Self {
        workflow.to_document()
    }
}

impl From<&Workflow> for WorkflowDocument {
    fn from(workflow: &Workflow) -> Self {
        workflow.to_document()
    }
}

impl TryFrom<WorkflowDocument> for Workflow {
    type Error = WorkflowError;

    fn try_from(document: WorkflowDocument) -> Result<Self, Self::Error> {
        Workflow::from_document(document)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::definition::{Expression, NodeKind};

    #[test]
    fn test_round_trip_rebuilds_links() {
        let mut workflow = Workflow::from_uri("orders", "jms:queue:orders")
            .with_description("Routes orders");
        let choice = workflow.add_output(Node::choice());
        let otherwise = workflow.add_output_to(choice, Node::otherwise()).unwrap();
        workflow.add_output_to(otherwise, Node::to("mock:rest")).unwrap();

        let value = serde_json::to_value(&workflow).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "orders",
                "description": "Routes orders",
                "input": { "uri": "jms:queue:orders" },
                "outputs": [{
                    "type": "choice",
                    "precondition": false,
                    "outputs": [{
                        "type": "otherwise",
                        "outputs": [{ "type": "to", "uri": "mock:rest" }]
                    }]
                }]
            })
        );

        let back: Workflow = serde_json::from_value(value).unwrap();
        assert_eq!(back, workflow);

        let to = back.find_first("to").unwrap();
        let branch = back.outputs_of(back.outputs()[0])[0];
        assert_eq!(back.owner(to), Some(Parent::Node(branch)));
        assert_eq!(back.parent(to), Some(Parent::Node(back.outputs()[0])));
    }

    #[test]
    fn test_outputs_on_leaf_are_rejected() {
        let document = WorkflowDocument {
            id: "bad".into(),
            description: None,
            input: None,
            error_handler: None,
            auto_startup: None,
            outputs: vec![
                NodeDocument::new(Node::to("mock:a"))
                    .with_output(NodeDocument::new(Node::log("never"))),
            ],
        };

        let err = Workflow::from_document(document).unwrap_err();
        assert!(matches!(err, WorkflowError::NotAContainer { kind: "to", .. }));
    }

    #[test]
    fn test_deserialize_error_is_reported() {
        let value = json!({
            "id": "bad",
            "outputs": [{ "type": "log", "message": "x", "outputs": [{ "type": "stop" }] }]
        });
        let err = serde_json::from_value::<Workflow>(value).unwrap_err();
        assert!(err.to_string().contains("does not accept outputs"));
    }

    #[test]
    fn test_expression_defaults_when_loading() {
        let value = json!({
            "id": "w",
            "outputs": [{
                "type": "filter",
                "expression": { "language": "simple", "text": "${header.ok}" }
            }]
        });
        let workflow: Workflow = serde_json::from_value(value).unwrap();
        let node = workflow.node(workflow.outputs()[0]).unwrap();
        let NodeKind::Filter(filter) = &node.kind else {
            panic!("expected a filter, got {}", node.short_name());
        };
        assert_eq!(filter.expression, Expression::simple("${header.ok}"));
    }

    impl Workflow {
        fn find_first(&self, short_name: &str) -> Option<NodeIndex> {
            self.walk()
                .find(|visit| visit.node.short_name() == short_name)
                .map(|visit| visit.index)
        }
    }
}
