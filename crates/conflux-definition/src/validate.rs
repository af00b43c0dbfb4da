//! Structural validation of workflow trees.
//!
//! The validator checks placement rules the tree shape alone cannot
//! enforce. It does not judge expressions, endpoints or references; those
//! belong to the execution compiler and the registry.

use std::collections::{HashMap, HashSet};

use crate::definition::{Node, NodeIndex, NodeKind};
use crate::error::{WorkflowError, WorkflowResult};
use crate::workflow::Workflow;

/// Tracing target for structural validation.
pub const TRACING_TARGET: &str = "conflux_definition::validate";

/// Validates the structure of a single workflow.
///
/// Checks that:
/// - top-level-only nodes are direct outputs of the workflow;
/// - only containers have outputs;
/// - a `choice` holds `when` branches and at most one trailing `otherwise`,
///   and branches appear nowhere else;
/// - `do_catch` and `do_finally` only appear under `do_try`, with at most
///   one trailing `do_finally`;
/// - node ids are unique within the workflow.
pub fn validate_workflow(workflow: &Workflow) -> WorkflowResult<()> {
    let mut ids = HashSet::new();

    for visit in workflow.walk() {
        let node = visit.node;
        let location = || format!("{}/{}", workflow.id, node.label());

        if node.is_top_level_only() && !visit.owner.is_workflow() {
            return Err(WorkflowError::structural(
                location(),
                "may only be placed directly under the workflow",
            ));
        }

        let outputs = workflow.outputs_of(visit.index);
        if !node.accepts_outputs() && !outputs.is_empty() {
            return Err(WorkflowError::structural(location(), "does not accept outputs"));
        }

        let owner_kind = visit.owner.node().and_then(|index| workflow.node(index));
        check_placement(node, owner_kind).map_err(|message| {
            WorkflowError::structural(location(), message)
        })?;
        check_outputs(workflow, node, outputs).map_err(|message| {
            WorkflowError::structural(location(), message)
        })?;

        if let Some(id) = node.id.as_deref() {
            if !ids.insert(id) {
                return Err(WorkflowError::structural(
                    location(),
                    format!("duplicate node id '{id}'"),
                ));
            }
        }
    }

    tracing::debug!(
        target: TRACING_TARGET,
        workflow_id = %workflow.id,
        nodes = workflow.len(),
        "Workflow structure is valid"
    );
    Ok(())
}

/// Validates every workflow and rejects duplicate workflow ids.
pub fn validate_workflows<'a, I>(workflows: I) -> WorkflowResult<()>
where
    I: IntoIterator<Item = &'a Workflow>,
{
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (position, workflow) in workflows.into_iter().enumerate() {
        if let Some(first) = seen.insert(workflow.id.as_str(), position) {
            return Err(WorkflowError::structural(
                workflow.id.clone(),
                format!("duplicate workflow id, first declared at position {first}"),
            ));
        }
        validate_workflow(workflow)?;
    }
    Ok(())
}

/// Checks that branch and handler kinds sit under the container they belong to.
fn check_placement(node: &Node, owner: Option<&Node>) -> Result<(), &'static str> {
    let owner_kind = owner.map(|owner| &owner.kind);
    match node.kind {
        NodeKind::When(_) | NodeKind::Otherwise(_)
            if !matches!(owner_kind, Some(NodeKind::Choice(_))) =>
        {
            Err("branches may only be placed under a choice")
        }
        NodeKind::DoCatch(_) | NodeKind::DoFinally(_)
            if !matches!(owner_kind, Some(NodeKind::DoTry(_))) =>
        {
            Err("catch and finally blocks may only be placed under a do_try")
        }
        _ => Ok(()),
    }
}

/// Checks ordering rules among the outputs of routers and try blocks.
fn check_outputs(
    workflow: &Workflow,
    node: &Node,
    outputs: &[NodeIndex],
) -> Result<(), &'static str> {
    let kinds = || outputs.iter().filter_map(|&index| workflow.node(index)).map(|n| &n.kind);

    match node.kind {
        NodeKind::Choice(_) => {
            if kinds().any(|kind| !matches!(kind, NodeKind::When(_) | NodeKind::Otherwise(_))) {
                return Err("a choice may only hold when and otherwise branches");
            }
            trailing_single(kinds(), |kind| matches!(kind, NodeKind::Otherwise(_)))
                .map_err(|_| "a choice may hold one otherwise branch, after every when")
        }
        NodeKind::DoTry(_) => {
            trailing_single(kinds(), |kind| matches!(kind, NodeKind::DoFinally(_)))
                .map_err(|_| "a do_try may hold one do_finally block, as its last output")
        }
        _ => Ok(()),
    }
}

/// Succeeds when at most one item satisfies `is_tail` and, if so, it is last.
fn trailing_single<'a, I, F>(kinds: I, is_tail: F) -> Result<(), ()>
where
    I: Iterator<Item = &'a NodeKind>,
    F: Fn(&NodeKind) -> bool,
{
    let flags: Vec<bool> = kinds.map(|kind| is_tail(kind)).collect();
    match flags.iter().filter(|&&flag| flag).count() {
        0 => Ok(()),
        1 if flags.last() == Some(&true) => Ok(()),
        _ => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::Expression;

    fn violation(result: WorkflowResult<()>) -> String {
        match result {
            Err(WorkflowError::StructuralViolation { location, message }) => {
                format!("{location}: {message}")
            }
            other => panic!("expected a structural violation, got {other:?}"),
        }
    }

    #[test]
    fn test_top_level_only_accepted_at_root() {
        let mut workflow = Workflow::new("w");
        let handler = workflow.add_output(Node::on_exception(["java.io.IOException"]));
        workflow.add_output_to(handler, Node::log("failed")).unwrap();
        workflow.add_output(Node::to("mock:a"));

        assert!(workflow.is_top_level(handler));
        assert_eq!(workflow.validate(), Ok(()));
    }

    #[test]
    fn test_top_level_only_rejected_when_nested() {
        let mut workflow = Workflow::new("w");
        let outer = workflow.add_output(Node::pipeline());
        let inner = workflow.add_output_to(outer, Node::pipeline()).unwrap();
        workflow
            .add_output_to(inner, Node::on_exception(["java.io.IOException"]))
            .unwrap();

        assert_eq!(
            violation(workflow.validate()),
            "w/onException[java.io.IOException]: may only be placed directly under the workflow"
        );
    }

    #[test]
    fn test_choice_rules() {
        let mut workflow = Workflow::new("w");
        let choice = workflow.add_output(Node::choice());
        workflow
            .add_output_to(choice, Node::when(Expression::simple("${header.a}")))
            .unwrap();
        workflow.add_output_to(choice, Node::otherwise()).unwrap();
        assert_eq!(workflow.validate(), Ok(()));

        workflow
            .add_output_to(choice, Node::when(Expression::simple("${header.b}")))
            .unwrap();
        assert_eq!(
            violation(workflow.validate()),
            "w/choice: a choice may hold one otherwise branch, after every when"
        );

        let mut workflow = Workflow::new("w");
        let choice = workflow.add_output(Node::choice());
        workflow.add_output_to(choice, Node::to("mock:a")).unwrap();
        assert_eq!(
            violation(workflow.validate()),
            "w/choice: a choice may only hold when and otherwise branches"
        );
    }

    #[test]
    fn test_branch_outside_choice() {
        let mut workflow = Workflow::new("w");
        workflow.add_output(Node::otherwise());
        assert_eq!(
            violation(workflow.validate()),
            "w/otherwise: branches may only be placed under a choice"
        );
    }

    #[test]
    fn test_try_rules() {
        let mut workflow = Workflow::new("w");
        let block = workflow.add_output(Node::do_try());
        workflow.add_output_to(block, Node::to("mock:a")).unwrap();
        workflow
            .add_output_to(block, Node::do_catch(["java.io.IOException"]))
            .unwrap();
        workflow.add_output_to(block, Node::do_finally()).unwrap();
        assert_eq!(workflow.validate(), Ok(()));

        workflow.add_output_to(block, Node::do_finally()).unwrap();
        assert!(violation(workflow.validate()).starts_with("w/doTry:"));

        let mut workflow = Workflow::new("w");
        workflow.add_output(Node::do_catch(["java.io.IOException"]));
        assert!(violation(workflow.validate()).contains("only be placed under a do_try"));
    }

    #[test]
    fn test_duplicate_node_ids() {
        let mut workflow = Workflow::new("w");
        workflow.add_output(Node::to("mock:a").with_id("send"));
        workflow.add_output(Node::to("mock:b").with_id("send"));
        assert_eq!(
            violation(workflow.validate()),
            "w/to[mock:b]: duplicate node id 'send'"
        );
    }

    #[test]
    fn test_leaf_with_outputs_after_kind_change() {
        let mut workflow = Workflow::new("w");
        let pipeline = workflow.add_output(Node::pipeline());
        workflow.add_output_to(pipeline, Node::to("mock:a")).unwrap();
        workflow.node_mut(pipeline).unwrap().kind = Node::stop().kind;

        assert_eq!(violation(workflow.validate()), "w/stop: does not accept outputs");
    }

    #[test]
    fn test_duplicate_workflow_ids() {
        let a = Workflow::new("orders");
        let b = Workflow::new("billing");
        let c = Workflow::new("orders");

        assert_eq!(validate_workflows([&a, &b]), Ok(()));
        assert_eq!(
            violation(validate_workflows([&a, &b, &c])),
            "orders: duplicate workflow id, first declared at position 0"
        );
    }
}
