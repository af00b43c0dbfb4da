//! The workflow root and its node arena.
//!
//! A [`Workflow`] owns every node of its tree in a flat arena and records,
//! per node, the ordered outputs, the owning container and the logical
//! parent. Nodes never point at each other directly, so the tree cannot
//! form cycles and a deep copy is a walk that allocates fresh slots.

mod document;
mod walk;

use serde::{Deserialize, Serialize};

pub use self::document::{NodeDocument, WorkflowDocument};
pub use self::walk::{Visit, Walk};
use crate::definition::{CopyDefinition, InputDefinition, Node, NodeIndex, Parent, StringFields};
use crate::error::{WorkflowError, WorkflowResult};
use crate::registry::{ReferenceKind, Registry};

/// Tracing target for workflow tree operations.
pub const TRACING_TARGET: &str = "conflux_definition::workflow";

/// Arena entry of one node.
#[derive(Debug, Clone)]
struct Slot {
    node: Node,
    /// Logical parent, as seen by the execution compiler.
    parent: Parent,
    /// Container whose output list holds this node.
    owner: Parent,
    outputs: Vec<NodeIndex>,
}

/// A named workflow: an input endpoint followed by an ordered tree of nodes.
///
/// The workflow is itself the root output container. Nodes are appended
/// with [`add_output`](Self::add_output) or [`append`](Self::append), which
/// wire the container links and propagate inherited configuration. Two
/// workflows compare equal when their metadata and tree shapes are equal,
/// regardless of how their arenas are laid out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "WorkflowDocument", try_from = "WorkflowDocument")]
pub struct Workflow {
    /// Identifier, unique within a deployment.
    pub id: String,
    /// Description of what this workflow does.
    pub description: Option<String>,
    /// Source endpoint the workflow consumes from.
    pub input: Option<InputDefinition>,
    /// Registry name of the error handler factory.
    pub error_handler: Option<String>,
    /// Whether the workflow starts with its deployment.
    pub auto_startup: Option<bool>,
    slots: Vec<Option<Slot>>,
    /// Freed slots, reused by later appends.
    vacant: Vec<NodeIndex>,
    live: usize,
    outputs: Vec<NodeIndex>,
}

impl Workflow {
    /// Creates a new empty workflow.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: None,
            input: None,
            error_handler: None,
            auto_startup: None,
            slots: Vec::new(),
            vacant: Vec::new(),
            live: 0,
            outputs: Vec::new(),
        }
    }

    /// Creates a new empty workflow consuming from the endpoint.
    pub fn from_uri(id: impl Into<String>, uri: impl Into<String>) -> Self {
        Self::new(id).with_input(InputDefinition::new(uri))
    }

    /// Sets the input endpoint.
    pub fn with_input(mut self, input: InputDefinition) -> Self {
        self.input = Some(input);
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the error handler reference.
    pub fn with_error_handler(mut self, reference: impl Into<String>) -> Self {
        self.error_handler = Some(reference.into());
        self
    }

    /// Sets whether the workflow starts with its deployment.
    pub fn with_auto_startup(mut self, auto_startup: bool) -> Self {
        self.auto_startup = Some(auto_startup);
        self
    }

    /// Returns the input endpoint URI.
    pub fn input_uri(&self) -> Option<&str> {
        self.input.as_ref().map(|input| input.uri.as_str())
    }

    /// Returns the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Returns whether the handle names a live node.
    pub fn contains(&self, index: NodeIndex) -> bool {
        self.slot(index).is_some()
    }

    /// Returns the node behind a handle.
    pub fn node(&self, index: NodeIndex) -> Option<&Node> {
        self.slot(index).map(|slot| &slot.node)
    }

    /// Returns the node behind a handle for in-place edits.
    ///
    /// Changing the kind of a container that has outputs into one that
    /// accepts none leaves a tree that fails [`validate`](Self::validate).
    pub fn node_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        self.slot_mut(index).map(|slot| &mut slot.node)
    }

    /// Returns the top-level outputs.
    pub fn outputs(&self) -> &[NodeIndex] {
        &self.outputs
    }

    /// Returns the outputs of a node; empty for leaves and unknown handles.
    pub fn outputs_of(&self, index: NodeIndex) -> &[NodeIndex] {
        self.slot(index)
            .map(|slot| slot.outputs.as_slice())
            .unwrap_or_default()
    }

    /// Returns the outputs held by the workflow root or by a node.
    pub fn children(&self, parent: Parent) -> &[NodeIndex] {
        match parent {
            Parent::Workflow => &self.outputs,
            Parent::Node(index) => self.outputs_of(index),
        }
    }

    /// Returns the logical parent of a node.
    ///
    /// Outputs of a `when` or `otherwise` branch report the branch's own
    /// parent, since the branch defers to the router that holds it.
    pub fn parent(&self, index: NodeIndex) -> Option<Parent> {
        self.slot(index).map(|slot| slot.parent)
    }

    /// Returns the container whose output list holds a node.
    pub fn owner(&self, index: NodeIndex) -> Option<Parent> {
        self.slot(index).map(|slot| slot.owner)
    }

    /// Returns how many containers separate a node from the workflow root.
    ///
    /// Top-level outputs have depth zero.
    pub fn depth(&self, index: NodeIndex) -> Option<usize> {
        let mut owner = self.owner(index)?;
        let mut depth = 0;
        while let Parent::Node(container) = owner {
            owner = self.owner(container)?;
            depth += 1;
        }
        Some(depth)
    }

    /// Returns whether the node sits directly under the workflow root.
    pub fn is_top_level(&self, index: NodeIndex) -> bool {
        self.owner(index) == Some(Parent::Workflow)
    }

    /// Returns the first node, in pre-order, with the given id.
    pub fn find(&self, id: &str) -> Option<NodeIndex> {
        self.walk()
            .find(|visit| visit.node.id.as_deref() == Some(id))
            .map(|visit| visit.index)
    }

    /// Returns a pre-order traversal of the tree.
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(self)
    }

    /// Appends a node to the top-level outputs.
    pub fn add_output(&mut self, node: Node) -> NodeIndex {
        self.insert(Parent::Workflow, node)
    }

    /// Appends a node to the outputs of a container node.
    pub fn add_output_to(&mut self, container: NodeIndex, node: Node) -> WorkflowResult<NodeIndex> {
        self.append(Parent::Node(container), node)
    }

    /// Appends a node to the outputs of the workflow root or a container.
    ///
    /// Fails with [`WorkflowError::UnknownNode`] for stale handles and with
    /// [`WorkflowError::NotAContainer`] when the target owns no outputs.
    pub fn append(&mut self, parent: Parent, node: Node) -> WorkflowResult<NodeIndex> {
        self.check_container(parent)?;
        Ok(self.insert(parent, node))
    }

    /// Replaces the outputs of the workflow root or a container.
    ///
    /// The previous outputs and their subtrees are dropped.
    pub fn set_outputs<I>(&mut self, parent: Parent, nodes: I) -> WorkflowResult<Vec<NodeIndex>>
    where
        I: IntoIterator<Item = Node>,
    {
        self.check_container(parent)?;

        let previous = match parent {
            Parent::Workflow => std::mem::take(&mut self.outputs),
            Parent::Node(index) => self
                .slot_mut(index)
                .map(|slot| std::mem::take(&mut slot.outputs))
                .unwrap_or_default(),
        };
        for index in previous {
            self.free(index);
        }

        Ok(nodes
            .into_iter()
            .map(|node| self.insert(parent, node))
            .collect())
    }

    /// Detaches a node from its container and drops its subtree.
    ///
    /// The freed handles are reissued to nodes appended later.
    pub fn remove(&mut self, index: NodeIndex) -> WorkflowResult<Node> {
        let owner = self.owner(index).ok_or(WorkflowError::UnknownNode(index))?;
        match owner {
            Parent::Workflow => self.outputs.retain(|&output| output != index),
            Parent::Node(container) => {
                if let Some(slot) = self.slot_mut(container) {
                    slot.outputs.retain(|&output| output != index);
                }
            }
        }
        self.free(index).ok_or(WorkflowError::UnknownNode(index))
    }

    /// Sets the id of a node.
    ///
    /// A `when` or `otherwise` branch that already has outputs passes the
    /// id on to its last output, which may itself be such a branch.
    pub fn set_node_id(&mut self, index: NodeIndex, id: impl Into<String>) -> WorkflowResult<()> {
        let mut target = index;
        loop {
            let slot = self.slot(target).ok_or(WorkflowError::UnknownNode(target))?;
            match slot.outputs.last() {
                Some(&last) if slot.node.kind.defers_identity() => target = last,
                _ => break,
            }
        }

        if target != index {
            tracing::trace!(
                target: TRACING_TARGET,
                workflow_id = %self.id,
                branch = %index,
                node = %target,
                "Branch passes its id to its last output"
            );
        }
        if let Some(slot) = self.slot_mut(target) {
            slot.node.id = Some(id.into());
        }
        Ok(())
    }

    /// Deep copies the subtree rooted at `index` into another workflow.
    ///
    /// The copy is appended to `parent` of `target` through the normal
    /// append path and shares nothing with this workflow.
    pub fn copy_subtree_into(
        &self,
        index: NodeIndex,
        target: &mut Workflow,
        parent: Parent,
    ) -> WorkflowResult<NodeIndex> {
        if !self.contains(index) {
            return Err(WorkflowError::UnknownNode(index));
        }
        target.check_container(parent)?;
        let copy = self
            .copy_branch(index, target, parent)
            .ok_or(WorkflowError::UnknownNode(index))?;

        tracing::trace!(
            target: TRACING_TARGET,
            source = %self.id,
            destination = %target.id,
            node = %index,
            copy = %copy,
            "Copied subtree"
        );
        Ok(copy)
    }

    /// Returns every by-name reference of the workflow and its nodes.
    pub fn references(&self) -> Vec<(ReferenceKind, &str)> {
        let mut references = Vec::new();
        if let Some(handler) = self.error_handler.as_deref() {
            references.push((ReferenceKind::ErrorHandler, handler));
        }
        for visit in self.walk() {
            references.extend(visit.node.kind.references());
        }
        references
    }

    /// Checks that every by-name reference is registered.
    ///
    /// Fails on the first reference, in pre-order, the registry lacks.
    pub fn resolve_references<R>(&self, registry: &R) -> WorkflowResult<()>
    where
        R: Registry + ?Sized,
    {
        for (kind, name) in self.references() {
            if !registry.contains(name) {
                return Err(WorkflowError::unresolved(kind, name));
            }
        }
        Ok(())
    }

    /// Checks the structural rules of the tree.
    pub fn validate(&self) -> WorkflowResult<()> {
        crate::validate::validate_workflow(self)
    }

    /// Returns mutable access to every node, in arena order.
    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.slots.iter_mut().flatten().map(|slot| &mut slot.node)
    }

    fn slot(&self, index: NodeIndex) -> Option<&Slot> {
        self.slots.get(index.position())?.as_ref()
    }

    fn slot_mut(&mut self, index: NodeIndex) -> Option<&mut Slot> {
        self.slots.get_mut(index.position())?.as_mut()
    }

    fn check_container(&self, parent: Parent) -> WorkflowResult<()> {
        let Parent::Node(index) = parent else {
            return Ok(());
        };
        let slot = self.slot(index).ok_or(WorkflowError::UnknownNode(index))?;
        if !slot.node.accepts_outputs() {
            return Err(WorkflowError::NotAContainer {
                index,
                kind: slot.node.short_name(),
            });
        }
        Ok(())
    }

    /// Appends to a container known to accept outputs.
    ///
    /// Wires the owner and logical parent links and copies the container's
    /// `inherit_error_handler` onto a child that leaves it unset.
    fn insert(&mut self, owner: Parent, mut node: Node) -> NodeIndex {
        let mut parent = owner;
        if let Some(container) = owner.node().and_then(|index| self.slot(index)) {
            if node.inherit_error_handler.is_none() {
                node.inherit_error_handler = container.node.inherit_error_handler;
            }
            if container.node.kind.defers_identity() {
                parent = container.parent;
            }
        }

        let slot = Slot {
            node,
            parent,
            owner,
            outputs: Vec::new(),
        };
        let index = match self.vacant.pop() {
            Some(index) => {
                self.slots[index.position()] = Some(slot);
                index
            }
            None => {
                self.slots.push(Some(slot));
                NodeIndex::new(self.slots.len() - 1)
            }
        };
        self.live += 1;

        match owner {
            Parent::Workflow => self.outputs.push(index),
            Parent::Node(container) => {
                if let Some(slot) = self.slot_mut(container) {
                    slot.outputs.push(index);
                }
            }
        }
        index
    }

    /// Frees the slots of a subtree and returns its root node.
    fn free(&mut self, index: NodeIndex) -> Option<Node> {
        let slot = self.slots.get_mut(index.position())?.take()?;
        self.release(index);

        let mut pending = slot.outputs;
        while let Some(child) = pending.pop() {
            if let Some(freed) = self.slots.get_mut(child.position()).and_then(Option::take) {
                self.release(child);
                pending.extend(freed.outputs);
            }
        }
        Some(slot.node)
    }

    fn release(&mut self, index: NodeIndex) {
        self.vacant.push(index);
        self.live -= 1;
    }

    /// Copies a subtree into `target`, pairing each source node with its copy.
    fn copy_branch(
        &self,
        index: NodeIndex,
        target: &mut Workflow,
        parent: Parent,
    ) -> Option<NodeIndex> {
        let root = target.insert(parent, self.slot(index)?.node.copy_definition());

        let mut pending = vec![(index, root)];
        while let Some((source, copied)) = pending.pop() {
            for &output in self.outputs_of(source) {
                if let Some(slot) = self.slot(output) {
                    let child = target.insert(Parent::Node(copied), slot.node.copy_definition());
                    pending.push((output, child));
                }
            }
        }
        Some(root)
    }

    fn same_tree(&self, other: &Workflow) -> bool {
        let mut pending = vec![(self.outputs.as_slice(), other.outputs.as_slice())];
        while let Some((ours, theirs)) = pending.pop() {
            if ours.len() != theirs.len() {
                return false;
            }
            for (&a, &b) in ours.iter().zip(theirs) {
                match (self.slot(a), other.slot(b)) {
                    (Some(a), Some(b)) if a.node == b.node => {
                        pending.push((a.outputs.as_slice(), b.outputs.as_slice()));
                    }
                    _ => return false,
                }
            }
        }
        true
    }
}

impl PartialEq for Workflow {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.description == other.description
            && self.input == other.input
            && self.error_handler == other.error_handler
            && self.auto_startup == other.auto_startup
            && self.same_tree(other)
    }
}

impl Eq for Workflow {}

impl CopyDefinition for Workflow {
    fn copy_definition(&self) -> Self {
        let Self {
            id,
            description,
            input,
            error_handler,
            auto_startup,
            slots: _,
            vacant: _,
            live: _,
            outputs,
        } = self;

        let mut copy = Workflow {
            id: id.clone(),
            description: description.clone(),
            input: input.copy_definition(),
            error_handler: error_handler.clone(),
            auto_startup: *auto_startup,
            slots: Vec::with_capacity(self.len()),
            vacant: Vec::new(),
            live: 0,
            outputs: Vec::with_capacity(outputs.len()),
        };
        for &output in outputs {
            self.copy_branch(output, &mut copy, Parent::Workflow);
        }
        copy
    }
}

impl StringFields for Workflow {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        self.id.visit_strings_mut(f);
        self.description.visit_strings_mut(f);
        self.input.visit_strings_mut(f);
        self.error_handler.visit_strings_mut(f);
        for node in self.nodes_mut() {
            node.visit_strings_mut(f);
        }
    }
}
