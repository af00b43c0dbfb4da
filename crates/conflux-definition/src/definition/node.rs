//! Node definition types.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use super::endpoint::{ToDef, ToDynamicDef, WireTapDef};
use super::expression::Expression;
use super::handling::{
    DoCatchDef, DoFinallyDef, DoTryDef, OnExceptionDef, PolicyDef,
};
use super::kind::NodeKind;
use super::route::{
    ChoiceDef, FilterDef, LoadBalanceDef, LoadBalancer, OtherwiseDef, PipelineDef, SplitDef,
    StopDef, WhenDef,
};
use super::transform::{
    BeanDef, LogDef, LogLevel, ProcessDef, SetBodyDef, SetHeaderDef,
};

/// A workflow node definition with common metadata and kind.
///
/// A node is a detached record: it does not own its outputs and holds no
/// link to its container. Both live in the [`Workflow`] arena the node is
/// appended to, which keeps the tree free of shared or cyclic references.
///
/// [`Workflow`]: crate::workflow::Workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(
    name = "NodeBuilder",
    pattern = "owned",
    setter(into, strip_option, prefix = "with")
)]
pub struct Node {
    /// Identifier of the node, unique within its workflow when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub id: Option<String>,
    /// Description of what this node does.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub description: Option<String>,
    /// Whether the node is skipped by the execution compiler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub disabled: Option<bool>,
    /// Whether failures use the workflow error handler; inherited from the
    /// container on append when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub inherit_error_handler: Option<bool>,
    /// The node kind/type.
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl Node {
    /// Creates a new node with the given kind.
    pub fn new(kind: impl Into<NodeKind>) -> Self {
        Self {
            id: None,
            description: None,
            disabled: None,
            inherit_error_handler: None,
            kind: kind.into(),
        }
    }

    /// Returns a builder for creating a node.
    pub fn builder() -> NodeBuilder {
        NodeBuilder::default()
    }

    /// Sets the node id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the node description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the node as disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = Some(true);
        self
    }

    /// Returns whether the node is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled.unwrap_or(false)
    }

    /// Returns the short name of the node kind.
    pub const fn short_name(&self) -> &'static str {
        self.kind.short_name()
    }

    /// Returns whether the node owns an ordered list of outputs.
    pub const fn accepts_outputs(&self) -> bool {
        self.kind.accepts_outputs()
    }

    /// Returns whether the node is resolved away before execution.
    pub const fn is_abstract(&self) -> bool {
        self.kind.is_abstract()
    }

    /// Returns whether the node is only valid directly under a workflow.
    pub const fn is_top_level_only(&self) -> bool {
        self.kind.is_top_level_only()
    }

    /// Returns whether the node wraps what follows in a cross-cutting concern.
    pub const fn is_wrapping_entire_output(&self) -> bool {
        self.kind.is_wrapping_entire_output()
    }

    /// Returns a compact label for logs and diagnostics, e.g. `to[mock:a]`.
    pub fn label(&self) -> String {
        let detail = match &self.kind {
            NodeKind::To(def) => Some(def.uri.clone()),
            NodeKind::ToDynamic(def) => Some(def.uri.clone()),
            NodeKind::WireTap(def) => Some(def.uri.clone()),
            NodeKind::InterceptSendToEndpoint(def) => Some(def.uri.clone()),
            NodeKind::SetHeader(def) => Some(def.name.clone()),
            NodeKind::RemoveHeader(def) => Some(def.name.clone()),
            NodeKind::ConvertBody(def) => Some(def.to_type.clone()),
            NodeKind::Log(def) => Some(def.message.clone()),
            NodeKind::Process(def) => Some(def.reference.clone()),
            NodeKind::Bean(def) => Some(def.reference.clone()),
            NodeKind::Policy(def) => def.reference.clone(),
            NodeKind::LoadBalance(def) => Some(def.balancer.name().to_owned()),
            NodeKind::Marshal(def) => Some(def.data_format.name().to_owned()),
            NodeKind::Unmarshal(def) => Some(def.data_format.name().to_owned()),
            NodeKind::ThrowException(def) => Some(def.exception_type.clone()),
            NodeKind::OnException(def) if !def.exceptions.is_empty() => {
                Some(def.exceptions.join(","))
            }
            NodeKind::DoCatch(def) if !def.exceptions.is_empty() => Some(def.exceptions.join(",")),
            kind => kind.expression().map(ToString::to_string),
        };

        match detail {
            Some(detail) => format!("{}[{detail}]", self.short_name()),
            None => self.short_name().to_owned(),
        }
    }

    /// Creates a node sending to a static endpoint.
    pub fn to(uri: impl Into<String>) -> Self {
        Self::new(ToDef::new(uri))
    }

    /// Creates a node sending to an endpoint computed per message.
    pub fn to_dynamic(uri: impl Into<String>) -> Self {
        Self::new(ToDynamicDef {
            uri: uri.into(),
            ignore_invalid_endpoint: false,
        })
    }

    /// Creates a wire tap to the endpoint.
    pub fn wire_tap(uri: impl Into<String>) -> Self {
        Self::new(WireTapDef { uri: uri.into() })
    }

    /// Creates a node that stops routing the message.
    pub fn stop() -> Self {
        Self::new(StopDef::default())
    }

    /// Creates a content-based router.
    pub fn choice() -> Self {
        Self::new(ChoiceDef::default())
    }

    /// Creates a guarded branch.
    pub fn when(expression: Expression) -> Self {
        Self::new(WhenDef::new(expression))
    }

    /// Creates a fallback branch.
    pub fn otherwise() -> Self {
        Self::new(OtherwiseDef::default())
    }

    /// Creates a filter.
    pub fn filter(expression: Expression) -> Self {
        Self::new(FilterDef {
            expression,
            status_property_name: None,
        })
    }

    /// Creates a sequential splitter.
    pub fn split(expression: Expression) -> Self {
        Self::new(SplitDef {
            expression,
            parallel_processing: false,
            stop_on_exception: false,
            aggregation_strategy: None,
        })
    }

    /// Creates an explicit pipeline.
    pub fn pipeline() -> Self {
        Self::new(PipelineDef::default())
    }

    /// Creates a load balancer.
    pub fn load_balance(balancer: LoadBalancer) -> Self {
        Self::new(LoadBalanceDef::new(balancer))
    }

    /// Creates a node replacing the body.
    pub fn set_body(expression: Expression) -> Self {
        Self::new(SetBodyDef { expression })
    }

    /// Creates a node setting a header.
    pub fn set_header(name: impl Into<String>, expression: Expression) -> Self {
        Self::new(SetHeaderDef {
            name: name.into(),
            expression,
        })
    }

    /// Creates an info level log node.
    pub fn log(message: impl Into<String>) -> Self {
        Self::new(LogDef {
            message: message.into(),
            level: LogLevel::Info,
            log_name: None,
        })
    }

    /// Creates a node invoking a registered processor.
    pub fn process(reference: impl Into<String>) -> Self {
        Self::new(ProcessDef {
            reference: reference.into(),
        })
    }

    /// Creates a node invoking a registered bean.
    pub fn bean(reference: impl Into<String>) -> Self {
        Self::new(BeanDef {
            reference: reference.into(),
            method: None,
        })
    }

    /// Creates a policy boundary for the named policy.
    pub fn policy(reference: impl Into<String>) -> Self {
        Self::new(PolicyDef::new(reference))
    }

    /// Creates a transaction boundary.
    pub fn transacted() -> Self {
        Self::new(PolicyDef::transacted())
    }

    /// Creates a workflow-wide exception handler.
    pub fn on_exception<I, S>(exceptions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(OnExceptionDef::new(exceptions))
    }

    /// Creates a try block.
    pub fn do_try() -> Self {
        Self::new(DoTryDef::default())
    }

    /// Creates a catch block for the given exception types.
    pub fn do_catch<I, S>(exceptions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(DoCatchDef {
            exceptions: exceptions.into_iter().map(Into::into).collect(),
            on_when: None,
        })
    }

    /// Creates a finally block.
    pub fn do_finally() -> Self {
        Self::new(DoFinallyDef::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(Node::to("mock:a").label(), "to[mock:a]");
        assert_eq!(
            Node::filter(Expression::simple("${header.x}")).label(),
            "filter[simple{${header.x}}]"
        );
        assert_eq!(Node::transacted().label(), "transacted");
        assert_eq!(Node::policy("audit").label(), "policy[audit]");
        assert_eq!(Node::otherwise().label(), "otherwise");
    }

    #[test]
    fn test_builder() {
        let node = Node::builder()
            .with_id("send")
            .with_description("Send to the audit queue")
            .with_disabled(true)
            .with_kind(ToDef::new("jms:queue:audit"))
            .build()
            .unwrap();

        assert_eq!(node.id.as_deref(), Some("send"));
        assert!(node.is_disabled());
        assert_eq!(node.inherit_error_handler, None);
        assert_eq!(node.short_name(), "to");
    }

    #[test]
    fn test_builder_requires_kind() {
        assert!(Node::builder().with_id("orphan").build().is_err());
    }

    #[test]
    fn test_serde_flattens_kind() {
        let node = Node::set_header("priority", Expression::constant("high")).with_id("prio");
        let value = serde_json::to_value(&node).unwrap();

        assert_eq!(value["type"], "set_header");
        assert_eq!(value["id"], "prio");
        assert_eq!(value["name"], "priority");
        assert_eq!(value["expression"]["language"], "constant");

        let back: Node = serde_json::from_value(value).unwrap();
        assert_eq!(back, node);
    }
}
