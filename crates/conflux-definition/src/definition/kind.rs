//! Node kinds and their capabilities.

use derive_more::From;
use serde::{Deserialize, Serialize};

use super::endpoint::{EnrichDef, ToDef, ToDynamicDef, WireTapDef};
use super::expression::Expression;
use super::handling::{
    DoCatchDef, DoFinallyDef, DoTryDef, InterceptDef, InterceptSendToEndpointDef,
    OnCompletionDef, OnExceptionDef, PolicyDef, RollbackDef, ThrowExceptionDef,
};
use super::route::{
    ChoiceDef, DelayDef, FilterDef, LoadBalanceDef, LoadBalancer, LoopDef, MulticastDef,
    OtherwiseDef, PipelineDef, SplitDef, StopDef, ThrottleDef, WhenDef,
};
use super::transform::{
    BeanDef, ConvertBodyDef, DataFormat, LogDef, MarshalDef, ProcessDef, RemoveHeaderDef,
    ScriptDef, SetBodyDef, SetHeaderDef, SortDef, TransformDef, UnmarshalDef, ValidateDef,
};
use crate::registry::ReferenceKind;

/// Node kind enum for workflow trees.
///
/// Each variant carries only the fields unique to that kind. Structural
/// behavior is exposed through capability methods rather than through the
/// variant itself, so the compiler and validator never need to match on
/// every kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, From)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    Choice(ChoiceDef),
    When(WhenDef),
    Otherwise(OtherwiseDef),
    Filter(FilterDef),
    Split(SplitDef),
    Loop(LoopDef),
    Multicast(MulticastDef),
    Pipeline(PipelineDef),
    LoadBalance(LoadBalanceDef),
    Throttle(ThrottleDef),
    Delay(DelayDef),
    Stop(StopDef),

    To(ToDef),
    ToDynamic(ToDynamicDef),
    WireTap(WireTapDef),
    Enrich(EnrichDef),

    SetBody(SetBodyDef),
    SetHeader(SetHeaderDef),
    RemoveHeader(RemoveHeaderDef),
    Transform(TransformDef),
    ConvertBody(ConvertBodyDef),
    Sort(SortDef),
    Validate(ValidateDef),
    Log(LogDef),
    Marshal(MarshalDef),
    Unmarshal(UnmarshalDef),

    Process(ProcessDef),
    Bean(BeanDef),
    Script(ScriptDef),

    DoTry(DoTryDef),
    DoCatch(DoCatchDef),
    DoFinally(DoFinallyDef),
    ThrowException(ThrowExceptionDef),
    Rollback(RollbackDef),

    Policy(PolicyDef),

    OnException(OnExceptionDef),
    OnCompletion(OnCompletionDef),
    Intercept(InterceptDef),
    InterceptSendToEndpoint(InterceptSendToEndpointDef),
}

impl NodeKind {
    /// Returns the short name tooling uses for this kind.
    ///
    /// A [`PolicyDef`] reports `transacted` or `policy` depending on
    /// whether it is a transaction boundary.
    pub const fn short_name(&self) -> &'static str {
        match self {
            NodeKind::Choice(_) => "choice",
            NodeKind::When(_) => "when",
            NodeKind::Otherwise(_) => "otherwise",
            NodeKind::Filter(_) => "filter",
            NodeKind::Split(_) => "split",
            NodeKind::Loop(_) => "loop",
            NodeKind::Multicast(_) => "multicast",
            NodeKind::Pipeline(_) => "pipeline",
            NodeKind::LoadBalance(_) => "loadBalance",
            NodeKind::Throttle(_) => "throttle",
            NodeKind::Delay(_) => "delay",
            NodeKind::Stop(_) => "stop",
            NodeKind::To(_) => "to",
            NodeKind::ToDynamic(_) => "toD",
            NodeKind::WireTap(_) => "wireTap",
            NodeKind::Enrich(_) => "enrich",
            NodeKind::SetBody(_) => "setBody",
            NodeKind::SetHeader(_) => "setHeader",
            NodeKind::RemoveHeader(_) => "removeHeader",
            NodeKind::Transform(_) => "transform",
            NodeKind::ConvertBody(_) => "convertBodyTo",
            NodeKind::Sort(_) => "sort",
            NodeKind::Validate(_) => "validate",
            NodeKind::Log(_) => "log",
            NodeKind::Marshal(_) => "marshal",
            NodeKind::Unmarshal(_) => "unmarshal",
            NodeKind::Process(_) => "process",
            NodeKind::Bean(_) => "bean",
            NodeKind::Script(_) => "script",
            NodeKind::DoTry(_) => "doTry",
            NodeKind::DoCatch(_) => "doCatch",
            NodeKind::DoFinally(_) => "doFinally",
            NodeKind::ThrowException(_) => "throwException",
            NodeKind::Rollback(_) => "rollback",
            NodeKind::Policy(def) => def.short_name(),
            NodeKind::OnException(_) => "onException",
            NodeKind::OnCompletion(_) => "onCompletion",
            NodeKind::Intercept(_) => "intercept",
            NodeKind::InterceptSendToEndpoint(_) => "interceptSendToEndpoint",
        }
    }

    /// Returns whether nodes of this kind own an ordered list of outputs.
    pub const fn accepts_outputs(&self) -> bool {
        matches!(
            self,
            NodeKind::Choice(_)
                | NodeKind::When(_)
                | NodeKind::Otherwise(_)
                | NodeKind::Filter(_)
                | NodeKind::Split(_)
                | NodeKind::Loop(_)
                | NodeKind::Multicast(_)
                | NodeKind::Pipeline(_)
                | NodeKind::LoadBalance(_)
                | NodeKind::DoTry(_)
                | NodeKind::DoCatch(_)
                | NodeKind::DoFinally(_)
                | NodeKind::Policy(_)
                | NodeKind::OnException(_)
                | NodeKind::OnCompletion(_)
                | NodeKind::Intercept(_)
                | NodeKind::InterceptSendToEndpoint(_)
        )
    }

    /// Returns whether this kind is a placeholder resolved away before
    /// execution rather than compiled into a stage of its own.
    pub const fn is_abstract(&self) -> bool {
        matches!(
            self,
            NodeKind::OnException(_)
                | NodeKind::OnCompletion(_)
                | NodeKind::Intercept(_)
                | NodeKind::InterceptSendToEndpoint(_)
        )
    }

    /// Returns whether this kind is only valid as a direct child of the
    /// workflow root.
    pub const fn is_top_level_only(&self) -> bool {
        matches!(
            self,
            NodeKind::OnException(_)
                | NodeKind::OnCompletion(_)
                | NodeKind::Intercept(_)
                | NodeKind::InterceptSendToEndpoint(_)
        )
    }

    /// Returns whether this kind wraps the following outputs in a
    /// cross-cutting concern instead of sequencing its children.
    pub const fn is_wrapping_entire_output(&self) -> bool {
        matches!(self, NodeKind::Policy(_))
    }

    /// Returns whether this kind only groups its children.
    pub const fn is_block(&self) -> bool {
        matches!(
            self,
            NodeKind::Otherwise(_) | NodeKind::Pipeline(_) | NodeKind::DoTry(_) | NodeKind::DoFinally(_)
        )
    }

    /// Returns whether setting the id of a node of this kind relabels its
    /// last output once it has any.
    pub const fn defers_identity(&self) -> bool {
        matches!(self, NodeKind::When(_) | NodeKind::Otherwise(_))
    }

    /// Returns the expression held by this kind, if it holds one.
    pub fn expression(&self) -> Option<&Expression> {
        match self {
            NodeKind::When(def) => Some(&def.expression),
            NodeKind::Filter(def) => Some(&def.expression),
            NodeKind::Split(def) => Some(&def.expression),
            NodeKind::Loop(def) => Some(&def.expression),
            NodeKind::Throttle(def) => Some(&def.expression),
            NodeKind::Delay(def) => Some(&def.expression),
            NodeKind::Enrich(def) => Some(&def.expression),
            NodeKind::SetBody(def) => Some(&def.expression),
            NodeKind::SetHeader(def) => Some(&def.expression),
            NodeKind::Transform(def) => Some(&def.expression),
            NodeKind::Sort(def) => Some(&def.expression),
            NodeKind::Validate(def) => Some(&def.expression),
            NodeKind::Script(def) => Some(&def.expression),
            _ => None,
        }
    }

    /// Returns a mutable reference to the expression held by this kind.
    pub fn expression_mut(&mut self) -> Option<&mut Expression> {
        match self {
            NodeKind::When(def) => Some(&mut def.expression),
            NodeKind::Filter(def) => Some(&mut def.expression),
            NodeKind::Split(def) => Some(&mut def.expression),
            NodeKind::Loop(def) => Some(&mut def.expression),
            NodeKind::Throttle(def) => Some(&mut def.expression),
            NodeKind::Delay(def) => Some(&mut def.expression),
            NodeKind::Enrich(def) => Some(&mut def.expression),
            NodeKind::SetBody(def) => Some(&mut def.expression),
            NodeKind::SetHeader(def) => Some(&mut def.expression),
            NodeKind::Transform(def) => Some(&mut def.expression),
            NodeKind::Sort(def) => Some(&mut def.expression),
            NodeKind::Validate(def) => Some(&mut def.expression),
            NodeKind::Script(def) => Some(&mut def.expression),
            _ => None,
        }
    }

    /// Returns every by-name registry reference held by this kind.
    pub fn references(&self) -> Vec<(ReferenceKind, &str)> {
        let mut refs = Vec::new();
        match self {
            NodeKind::Split(SplitDef {
                aggregation_strategy: Some(name),
                ..
            })
            | NodeKind::Multicast(MulticastDef {
                aggregation_strategy: Some(name),
                ..
            })
            | NodeKind::Enrich(EnrichDef {
                aggregation_strategy: Some(name),
                ..
            }) => refs.push((ReferenceKind::AggregationStrategy, name.as_str())),
            NodeKind::LoadBalance(LoadBalanceDef {
                balancer: LoadBalancer::Custom { reference },
            }) => refs.push((ReferenceKind::LoadBalancer, reference.as_str())),
            NodeKind::Sort(SortDef {
                comparator: Some(name),
                ..
            }) => refs.push((ReferenceKind::Comparator, name.as_str())),
            NodeKind::Marshal(MarshalDef {
                data_format: DataFormat::Custom { reference },
            })
            | NodeKind::Unmarshal(UnmarshalDef {
                data_format: DataFormat::Custom { reference },
            }) => refs.push((ReferenceKind::DataFormat, reference.as_str())),
            NodeKind::Process(def) => refs.push((ReferenceKind::Processor, def.reference.as_str())),
            NodeKind::Bean(def) => refs.push((ReferenceKind::Bean, def.reference.as_str())),
            NodeKind::Policy(PolicyDef {
                reference: Some(name),
                ..
            }) => refs.push((ReferenceKind::Policy, name.as_str())),
            NodeKind::OnException(OnExceptionDef {
                redelivery_policy: Some(name),
                ..
            }) => refs.push((ReferenceKind::RedeliveryPolicy, name.as_str())),
            _ => {}
        }
        refs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_only_kinds_are_abstract_containers() {
        let kinds = [
            NodeKind::from(OnExceptionDef::new(["java.io.IOException"])),
            NodeKind::from(OnCompletionDef::default()),
            NodeKind::from(InterceptDef::default()),
        ];
        for kind in kinds {
            assert!(kind.is_top_level_only(), "{}", kind.short_name());
            assert!(kind.is_abstract(), "{}", kind.short_name());
            assert!(kind.accepts_outputs(), "{}", kind.short_name());
        }
    }

    #[test]
    fn test_leaf_kinds_reject_outputs() {
        let to = NodeKind::from(ToDef::new("mock:a"));
        assert!(!to.accepts_outputs());
        assert!(!to.is_abstract());
        assert!(to.expression().is_none());
    }

    #[test]
    fn test_policy_wraps_and_reports_dual_name() {
        let policy = NodeKind::from(PolicyDef::new("audit"));
        let transacted = NodeKind::from(PolicyDef::transacted());
        assert!(policy.is_wrapping_entire_output());
        assert!(transacted.is_wrapping_entire_output());
        assert_eq!(policy.short_name(), "policy");
        assert_eq!(transacted.short_name(), "transacted");
    }

    #[test]
    fn test_expression_holders() {
        let mut kind = NodeKind::from(FilterDef {
            expression: Expression::simple("${header.ok}"),
            status_property_name: None,
        });
        assert_eq!(kind.expression().map(|e| e.text.as_str()), Some("${header.ok}"));

        if let Some(expr) = kind.expression_mut() {
            expr.text = "${header.fine}".into();
        }
        assert_eq!(kind.expression().map(|e| e.text.as_str()), Some("${header.fine}"));
    }

    #[test]
    fn test_references() {
        let kind = NodeKind::from(SplitDef {
            expression: Expression::simple("${body}"),
            parallel_processing: true,
            stop_on_exception: false,
            aggregation_strategy: Some("collect".into()),
        });
        assert_eq!(
            kind.references(),
            vec![(ReferenceKind::AggregationStrategy, "collect")]
        );

        let transacted = NodeKind::from(PolicyDef::transacted());
        assert!(transacted.references().is_empty());
    }

    #[test]
    fn test_only_branches_defer_identity() {
        assert!(NodeKind::from(OtherwiseDef::default()).defers_identity());
        assert!(NodeKind::from(WhenDef::new(Expression::simple("true"))).defers_identity());
        assert!(!NodeKind::from(PipelineDef::default()).defers_identity());
    }
}
