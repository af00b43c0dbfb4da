//! Visiting the string fields of definitions.
//!
//! Template substitution rewrites every string-valued field of a freshly
//! copied workflow. Like the copy impls, every impl here names each field of
//! its record, so a new string field cannot be silently skipped.

use super::endpoint::{EnrichDef, InputDefinition, ToDef, ToDynamicDef, WireTapDef};
use super::expression::Expression;
use super::handling::{
    DoCatchDef, DoFinallyDef, DoTryDef, InterceptDef, InterceptSendToEndpointDef,
    OnCompletionDef, OnExceptionDef, PolicyDef, RollbackDef, ThrowExceptionDef,
};
use super::kind::NodeKind;
use super::node::Node;
use super::route::{
    ChoiceDef, DelayDef, FilterDef, LoadBalanceDef, LoadBalancer, LoopDef, MulticastDef,
    OtherwiseDef, PipelineDef, SplitDef, StopDef, ThrottleDef, WhenDef,
};
use super::transform::{
    BeanDef, ConvertBodyDef, DataFormat, LogDef, MarshalDef, ProcessDef, RemoveHeaderDef,
    ScriptDef, SetBodyDef, SetHeaderDef, SortDef, TransformDef, UnmarshalDef, ValidateDef,
};

/// Calls `f` on every string-valued field, recursing into nested definitions.
pub(crate) trait StringFields {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String));
}

impl StringFields for String {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        f(self);
    }
}

impl<T: StringFields> StringFields for Option<T> {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        if let Some(value) = self {
            value.visit_strings_mut(f);
        }
    }
}

impl<T: StringFields> StringFields for Vec<T> {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        for value in self {
            value.visit_strings_mut(f);
        }
    }
}

impl StringFields for Expression {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        // The language name is a keyword, not content.
        let Self {
            language: _,
            text,
            result_type,
            trim: _,
        } = self;
        text.visit_strings_mut(f);
        result_type.visit_strings_mut(f);
    }
}

impl StringFields for InputDefinition {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self { uri } = self;
        uri.visit_strings_mut(f);
    }
}

impl StringFields for Node {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self {
            id,
            description,
            disabled: _,
            inherit_error_handler: _,
            kind,
        } = self;
        id.visit_strings_mut(f);
        description.visit_strings_mut(f);
        kind.visit_strings_mut(f);
    }
}

impl StringFields for NodeKind {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        match self {
            NodeKind::Choice(def) => def.visit_strings_mut(f),
            NodeKind::When(def) => def.visit_strings_mut(f),
            NodeKind::Otherwise(def) => def.visit_strings_mut(f),
            NodeKind::Filter(def) => def.visit_strings_mut(f),
            NodeKind::Split(def) => def.visit_strings_mut(f),
            NodeKind::Loop(def) => def.visit_strings_mut(f),
            NodeKind::Multicast(def) => def.visit_strings_mut(f),
            NodeKind::Pipeline(def) => def.visit_strings_mut(f),
            NodeKind::LoadBalance(def) => def.visit_strings_mut(f),
            NodeKind::Throttle(def) => def.visit_strings_mut(f),
            NodeKind::Delay(def) => def.visit_strings_mut(f),
            NodeKind::Stop(def) => def.visit_strings_mut(f),
            NodeKind::To(def) => def.visit_strings_mut(f),
            NodeKind::ToDynamic(def) => def.visit_strings_mut(f),
            NodeKind::WireTap(def) => def.visit_strings_mut(f),
            NodeKind::Enrich(def) => def.visit_strings_mut(f),
            NodeKind::SetBody(def) => def.visit_strings_mut(f),
            NodeKind::SetHeader(def) => def.visit_strings_mut(f),
            NodeKind::RemoveHeader(def) => def.visit_strings_mut(f),
            NodeKind::Transform(def) => def.visit_strings_mut(f),
            NodeKind::ConvertBody(def) => def.visit_strings_mut(f),
            NodeKind::Sort(def) => def.visit_strings_mut(f),
            NodeKind::Validate(def) => def.visit_strings_mut(f),
            NodeKind::Log(def) => def.visit_strings_mut(f),
            NodeKind::Marshal(def) => def.visit_strings_mut(f),
            NodeKind::Unmarshal(def) => def.visit_strings_mut(f),
            NodeKind::Process(def) => def.visit_strings_mut(f),
            NodeKind::Bean(def) => def.visit_strings_mut(f),
            NodeKind::Script(def) => def.visit_strings_mut(f),
            NodeKind::DoTry(def) => def.visit_strings_mut(f),
            NodeKind::DoCatch(def) => def.visit_strings_mut(f),
            NodeKind::DoFinally(def) => def.visit_strings_mut(f),
            NodeKind::ThrowException(def) => def.visit_strings_mut(f),
            NodeKind::Rollback(def) => def.visit_strings_mut(f),
            NodeKind::Policy(def) => def.visit_strings_mut(f),
            NodeKind::OnException(def) => def.visit_strings_mut(f),
            NodeKind::OnCompletion(def) => def.visit_strings_mut(f),
            NodeKind::Intercept(def) => def.visit_strings_mut(f),
            NodeKind::InterceptSendToEndpoint(def) => def.visit_strings_mut(f),
        }
    }
}

impl StringFields for ChoiceDef {
    fn visit_strings_mut(&mut self, _f: &mut dyn FnMut(&mut String)) {
        let Self { precondition: _ } = self;
    }
}

impl StringFields for WhenDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self { expression } = self;
        expression.visit_strings_mut(f);
    }
}

impl StringFields for OtherwiseDef {
    fn visit_strings_mut(&mut self, _f: &mut dyn FnMut(&mut String)) {}
}

impl StringFields for FilterDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self {
            expression,
            status_property_name,
        } = self;
        expression.visit_strings_mut(f);
        status_property_name.visit_strings_mut(f);
    }
}

impl StringFields for SplitDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self {
            expression,
            parallel_processing: _,
            stop_on_exception: _,
            aggregation_strategy,
        } = self;
        expression.visit_strings_mut(f);
        aggregation_strategy.visit_strings_mut(f);
    }
}

impl StringFields for LoopDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self {
            expression,
            copy: _,
            do_while: _,
        } = self;
        expression.visit_strings_mut(f);
    }
}

impl StringFields for MulticastDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self {
            parallel_processing: _,
            stop_on_exception: _,
            aggregation_strategy,
        } = self;
        aggregation_strategy.visit_strings_mut(f);
    }
}

impl StringFields for PipelineDef {
    fn visit_strings_mut(&mut self, _f: &mut dyn FnMut(&mut String)) {}
}

impl StringFields for LoadBalanceDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self { balancer } = self;
        balancer.visit_strings_mut(f);
    }
}

impl StringFields for LoadBalancer {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        match self {
            LoadBalancer::RoundRobin | LoadBalancer::Random => {}
            LoadBalancer::Failover {
                exceptions,
                maximum_failover_attempts: _,
                round_robin: _,
            } => exceptions.visit_strings_mut(f),
            LoadBalancer::Weighted {
                distribution_ratio,
                round_robin: _,
            } => distribution_ratio.visit_strings_mut(f),
            LoadBalancer::Sticky { correlation } => correlation.visit_strings_mut(f),
            LoadBalancer::Custom { reference } => reference.visit_strings_mut(f),
        }
    }
}

impl StringFields for ThrottleDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self {
            expression,
            time_period_millis: _,
        } = self;
        expression.visit_strings_mut(f);
    }
}

impl StringFields for DelayDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self {
            expression,
            async_delayed: _,
        } = self;
        expression.visit_strings_mut(f);
    }
}

impl StringFields for StopDef {
    fn visit_strings_mut(&mut self, _f: &mut dyn FnMut(&mut String)) {}
}

impl StringFields for ToDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self { uri, pattern: _ } = self;
        uri.visit_strings_mut(f);
    }
}

impl StringFields for ToDynamicDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self {
            uri,
            ignore_invalid_endpoint: _,
        } = self;
        uri.visit_strings_mut(f);
    }
}

impl StringFields for WireTapDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self { uri } = self;
        uri.visit_strings_mut(f);
    }
}

impl StringFields for EnrichDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self {
            expression,
            aggregation_strategy,
        } = self;
        expression.visit_strings_mut(f);
        aggregation_strategy.visit_strings_mut(f);
    }
}

impl StringFields for SetBodyDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self { expression } = self;
        expression.visit_strings_mut(f);
    }
}

impl StringFields for SetHeaderDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self { name, expression } = self;
        name.visit_strings_mut(f);
        expression.visit_strings_mut(f);
    }
}

impl StringFields for RemoveHeaderDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self { name } = self;
        name.visit_strings_mut(f);
    }
}

impl StringFields for TransformDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self { expression } = self;
        expression.visit_strings_mut(f);
    }
}

impl StringFields for ConvertBodyDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self { to_type, charset } = self;
        to_type.visit_strings_mut(f);
        charset.visit_strings_mut(f);
    }
}

impl StringFields for SortDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self {
            expression,
            comparator,
        } = self;
        expression.visit_strings_mut(f);
        comparator.visit_strings_mut(f);
    }
}

impl StringFields for ValidateDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self { expression } = self;
        expression.visit_strings_mut(f);
    }
}

impl StringFields for LogDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self {
            message,
            level: _,
            log_name,
        } = self;
        message.visit_strings_mut(f);
        log_name.visit_strings_mut(f);
    }
}

impl StringFields for DataFormat {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        match self {
            DataFormat::Json {
                library,
                pretty_print: _,
                unmarshal_type,
            } => {
                library.visit_strings_mut(f);
                unmarshal_type.visit_strings_mut(f);
            }
            DataFormat::Csv { delimiter, header } => {
                delimiter.visit_strings_mut(f);
                header.visit_strings_mut(f);
            }
            DataFormat::Base64 { line_length: _ } => {}
            DataFormat::Custom { reference } => reference.visit_strings_mut(f),
        }
    }
}

impl StringFields for MarshalDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self { data_format } = self;
        data_format.visit_strings_mut(f);
    }
}

impl StringFields for UnmarshalDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self { data_format } = self;
        data_format.visit_strings_mut(f);
    }
}

impl StringFields for ProcessDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self { reference } = self;
        reference.visit_strings_mut(f);
    }
}

impl StringFields for BeanDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self { reference, method } = self;
        reference.visit_strings_mut(f);
        method.visit_strings_mut(f);
    }
}

impl StringFields for ScriptDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self { expression } = self;
        expression.visit_strings_mut(f);
    }
}

impl StringFields for DoTryDef {
    fn visit_strings_mut(&mut self, _f: &mut dyn FnMut(&mut String)) {}
}

impl StringFields for DoCatchDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self {
            exceptions,
            on_when,
        } = self;
        exceptions.visit_strings_mut(f);
        on_when.visit_strings_mut(f);
    }
}

impl StringFields for DoFinallyDef {
    fn visit_strings_mut(&mut self, _f: &mut dyn FnMut(&mut String)) {}
}

impl StringFields for ThrowExceptionDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self {
            exception_type,
            message,
        } = self;
        exception_type.visit_strings_mut(f);
        message.visit_strings_mut(f);
    }
}

impl StringFields for RollbackDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self {
            message,
            mark_rollback_only: _,
        } = self;
        message.visit_strings_mut(f);
    }
}

impl StringFields for PolicyDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self {
            reference,
            transacted: _,
        } = self;
        reference.visit_strings_mut(f);
    }
}

impl StringFields for OnExceptionDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self {
            exceptions,
            on_when,
            handled,
            continued,
            redelivery_policy,
            use_original_message: _,
        } = self;
        exceptions.visit_strings_mut(f);
        on_when.visit_strings_mut(f);
        handled.visit_strings_mut(f);
        continued.visit_strings_mut(f);
        redelivery_policy.visit_strings_mut(f);
    }
}

impl StringFields for OnCompletionDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self {
            only_on_failure: _,
            only_on_completion: _,
            on_when,
        } = self;
        on_when.visit_strings_mut(f);
    }
}

impl StringFields for InterceptDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self { on_when } = self;
        on_when.visit_strings_mut(f);
    }
}

impl StringFields for InterceptSendToEndpointDef {
    fn visit_strings_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        let Self {
            uri,
            skip_send_to_original_endpoint: _,
            on_when,
        } = self;
        uri.visit_strings_mut(f);
        on_when.visit_strings_mut(f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(node: &mut Node) -> Vec<String> {
        let mut seen = Vec::new();
        node.visit_strings_mut(&mut |s| seen.push(s.clone()));
        seen
    }

    #[test]
    fn test_visits_common_and_kind_fields() {
        let mut node = Node::set_header("x-count", Expression::constant("{{count}}"))
            .with_id("header")
            .with_description("sets the count");

        assert_eq!(
            collect(&mut node),
            vec!["header", "sets the count", "x-count", "{{count}}"]
        );
    }

    #[test]
    fn test_skips_expression_language() {
        let mut node = Node::filter(Expression::simple("${body} > 1"));
        assert_eq!(collect(&mut node), vec!["${body} > 1"]);
    }

    #[test]
    fn test_rewrites_in_place() {
        let mut node = Node::to("jms:queue:{{queue}}");
        node.visit_strings_mut(&mut |s| *s = s.replace("{{queue}}", "orders"));
        assert_eq!(node, Node::to("jms:queue:orders"));
    }
}
