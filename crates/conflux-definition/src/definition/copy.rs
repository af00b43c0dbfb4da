//! Deep copy of definitions.
//!
//! Every definition type implements [`CopyDefinition`] here, in one place.
//! Each impl destructures its value without a rest pattern, so adding a
//! field to a record fails to compile until its copy is written. Scalars are
//! copied by value and nested definitions through their own
//! `copy_definition`.

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

/// Produces an independent deep copy of a definition.
///
/// The copy shares nothing with the original: mutating either never
/// affects the other. Copies of nodes are detached; the workflow that
/// receives them wires their container links.
pub trait CopyDefinition: Sized {
    /// Returns a deep copy of `self`.
    fn copy_definition(&self) -> Self;
}

impl<T: CopyDefinition> CopyDefinition for Option<T> {
    fn copy_definition(&self) -> Self {
        self.as_ref().map(CopyDefinition::copy_definition)
    }
}

impl<T: CopyDefinition> CopyDefinition for Vec<T> {
    fn copy_definition(&self) -> Self {
        self.iter().map(CopyDefinition::copy_definition).collect()
    }
}

impl CopyDefinition for Expression {
    fn copy_definition(&self) -> Self {
        let Self {
            language,
            text,
            result_type,
            trim,
        } = self;
        Self {
            language: language.clone(),
            text: text.clone(),
            result_type: result_type.clone(),
            trim: *trim,
        }
    }
}

impl CopyDefinition for InputDefinition {
    fn copy_definition(&self) -> Self {
        let Self { uri } = self;
        Self { uri: uri.clone() }
    }
}

impl CopyDefinition for Node {
    fn copy_definition(&self) -> Self {
        let Self {
            id,
            description,
            disabled,
            inherit_error_handler,
            kind,
        } = self;
        Self {
            id: id.clone(),
            description: description.clone(),
            disabled: *disabled,
            inherit_error_handler: *inherit_error_handler,
            kind: kind.copy_definition(),
        }
    }
}

impl CopyDefinition for NodeKind {
    fn copy_definition(&self) -> Self {
        match self {
            NodeKind::Choice(def) => NodeKind::Choice(def.copy_definition()),
            NodeKind::When(def) => NodeKind::When(def.copy_definition()),
            NodeKind::Otherwise(def) => NodeKind::Otherwise(def.copy_definition()),
            NodeKind::Filter(def) => NodeKind::Filter(def.copy_definition()),
            NodeKind::Split(def) => NodeKind::Split(def.copy_definition()),
            NodeKind::Loop(def) => NodeKind::Loop(def.copy_definition()),
            NodeKind::Multicast(def) => NodeKind::Multicast(def.copy_definition()),
            NodeKind::Pipeline(def) => NodeKind::Pipeline(def.copy_definition()),
            NodeKind::LoadBalance(def) => NodeKind::LoadBalance(def.copy_definition()),
            NodeKind::Throttle(def) => NodeKind::Throttle(def.copy_definition()),
            NodeKind::Delay(def) => NodeKind::Delay(def.copy_definition()),
            NodeKind::Stop(def) => NodeKind::Stop(def.copy_definition()),
            NodeKind::To(def) => NodeKind::To(def.copy_definition()),
            NodeKind::ToDynamic(def) => NodeKind::ToDynamic(def.copy_definition()),
            NodeKind::WireTap(def) => NodeKind::WireTap(def.copy_definition()),
            NodeKind::Enrich(def) => NodeKind::Enrich(def.copy_definition()),
            NodeKind::SetBody(def) => NodeKind::SetBody(def.copy_definition()),
            NodeKind::SetHeader(def) => NodeKind::SetHeader(def.copy_definition()),
            NodeKind::RemoveHeader(def) => NodeKind::RemoveHeader(def.copy_definition()),
            NodeKind::Transform(def) => NodeKind::Transform(def.copy_definition()),
            NodeKind::ConvertBody(def) => NodeKind::ConvertBody(def.copy_definition()),
            NodeKind::Sort(def) => NodeKind::Sort(def.copy_definition()),
            NodeKind::Validate(def) => NodeKind::Validate(def.copy_definition()),
            NodeKind::Log(def) => NodeKind::Log(def.copy_definition()),
            NodeKind::Marshal(def) => NodeKind::Marshal(def.copy_definition()),
            NodeKind::Unmarshal(def) => NodeKind::Unmarshal(def.copy_definition()),
            NodeKind::Process(def) => NodeKind::Process(def.copy_definition()),
            NodeKind::Bean(def) => NodeKind::Bean(def.copy_definition()),
            NodeKind::Script(def) => NodeKind::Script(def.copy_definition()),
            NodeKind::DoTry(def) => NodeKind::DoTry(def.copy_definition()),
            NodeKind::DoCatch(def) => NodeKind::DoCatch(def.copy_definition()),
            NodeKind::DoFinally(def) => NodeKind::DoFinally(def.copy_definition()),
            NodeKind::ThrowException(def) => NodeKind::ThrowException(def.copy_definition()),
            NodeKind::Rollback(def) => NodeKind::Rollback(def.copy_definition()),
            NodeKind::Policy(def) => NodeKind::Policy(def.copy_definition()),
            NodeKind::OnException(def) => NodeKind::OnException(def.copy_definition()),
            NodeKind::OnCompletion(def) => NodeKind::OnCompletion(def.copy_definition()),
            NodeKind::Intercept(def) => NodeKind::Intercept(def.copy_definition()),
            NodeKind::InterceptSendToEndpoint(def) => {
                NodeKind::InterceptSendToEndpoint(def.copy_definition())
            }
        }
    }
}

// Routing.

impl CopyDefinition for ChoiceDef {
    fn copy_definition(&self) -> Self {
        let Self { precondition } = self;
        Self {
            precondition: *precondition,
        }
    }
}

impl CopyDefinition for WhenDef {
    fn copy_definition(&self) -> Self {
        let Self { expression } = self;
        Self {
            expression: expression.copy_definition(),
        }
    }
}

impl CopyDefinition for OtherwiseDef {
    fn copy_definition(&self) -> Self {
        let Self {} = self;
        Self {}
    }
}

impl CopyDefinition for FilterDef {
    fn copy_definition(&self) -> Self {
        let Self {
            expression,
            status_property_name,
        } = self;
        Self {
            expression: expression.copy_definition(),
            status_property_name: status_property_name.clone(),
        }
    }
}

impl CopyDefinition for SplitDef {
    fn copy_definition(&self) -> Self {
        let Self {
            expression,
            parallel_processing,
            stop_on_exception,
            aggregation_strategy,
        } = self;
        Self {
            expression: expression.copy_definition(),
            parallel_processing: *parallel_processing,
            stop_on_exception: *stop_on_exception,
            aggregation_strategy: aggregation_strategy.clone(),
        }
    }
}

impl CopyDefinition for LoopDef {
    fn copy_definition(&self) -> Self {
        let Self {
            expression,
            copy,
            do_while,
        } = self;
        Self {
            expression: expression.copy_definition(),
            copy: *copy,
            do_while: *do_while,
        }
    }
}

impl CopyDefinition for MulticastDef {
    fn copy_definition(&self) -> Self {
        let Self {
            parallel_processing,
            stop_on_exception,
            aggregation_strategy,
        } = self;
        Self {
            parallel_processing: *parallel_processing,
            stop_on_exception: *stop_on_exception,
            aggregation_strategy: aggregation_strategy.clone(),
        }
    }
}

impl CopyDefinition for PipelineDef {
    fn copy_definition(&self) -> Self {
        let Self {} = self;
        Self {}
    }
}

impl CopyDefinition for LoadBalanceDef {
    fn copy_definition(&self) -> Self {
        let Self { balancer } = self;
        Self {
            balancer: balancer.copy_definition(),
        }
    }
}

impl CopyDefinition for LoadBalancer {
    fn copy_definition(&self) -> Self {
        match self {
            LoadBalancer::RoundRobin => LoadBalancer::RoundRobin,
            LoadBalancer::Random => LoadBalancer::Random,
            LoadBalancer::Failover {
                exceptions,
                maximum_failover_attempts,
                round_robin,
            } => LoadBalancer::Failover {
                exceptions: exceptions.clone(),
                maximum_failover_attempts: *maximum_failover_attempts,
                round_robin: *round_robin,
            },
            LoadBalancer::Weighted {
                distribution_ratio,
                round_robin,
            } => LoadBalancer::Weighted {
                distribution_ratio: distribution_ratio.clone(),
                round_robin: *round_robin,
            },
            LoadBalancer::Sticky { correlation } => LoadBalancer::Sticky {
                correlation: correlation.copy_definition(),
            },
            LoadBalancer::Custom { reference } => LoadBalancer::Custom {
                reference: reference.clone(),
            },
        }
    }
}

impl CopyDefinition for ThrottleDef {
    fn copy_definition(&self) -> Self {
        let Self {
            expression,
            time_period_millis,
        } = self;
        Self {
            expression: expression.copy_definition(),
            time_period_millis: *time_period_millis,
        }
    }
}

impl CopyDefinition for DelayDef {
    fn copy_definition(&self) -> Self {
        let Self {
            expression,
            async_delayed,
        } = self;
        Self {
            expression: expression.copy_definition(),
            async_delayed: *async_delayed,
        }
    }
}

impl CopyDefinition for StopDef {
    fn copy_definition(&self) -> Self {
        let Self {} = self;
        Self {}
    }
}

// Endpoints.

impl CopyDefinition for ToDef {
    fn copy_definition(&self) -> Self {
        let Self { uri, pattern } = self;
        Self {
            uri: uri.clone(),
            pattern: *pattern,
        }
    }
}

impl CopyDefinition for ToDynamicDef {
    fn copy_definition(&self) -> Self {
        let Self {
            uri,
            ignore_invalid_endpoint,
        } = self;
        Self {
            uri: uri.clone(),
            ignore_invalid_endpoint: *ignore_invalid_endpoint,
        }
    }
}

impl CopyDefinition for WireTapDef {
    fn copy_definition(&self) -> Self {
        let Self { uri } = self;
        Self { uri: uri.clone() }
    }
}

impl CopyDefinition for EnrichDef {
    fn copy_definition(&self) -> Self {
        let Self {
            expression,
            aggregation_strategy,
        } = self;
        Self {
            expression: expression.copy_definition(),
            aggregation_strategy: aggregation_strategy.clone(),
        }
    }
}

// Message transformation.

impl CopyDefinition for SetBodyDef {
    fn copy_definition(&self) -> Self {
        let Self { expression } = self;
        Self {
            expression: expression.copy_definition(),
        }
    }
}

impl CopyDefinition for SetHeaderDef {
    fn copy_definition(&self) -> Self {
        let Self { name, expression } = self;
        Self {
            name: name.clone(),
            expression: expression.copy_definition(),
        }
    }
}

impl CopyDefinition for RemoveHeaderDef {
    fn copy_definition(&self) -> Self {
        let Self { name } = self;
        Self { name: name.clone() }
    }
}

impl CopyDefinition for TransformDef {
    fn copy_definition(&self) -> Self {
        let Self { expression } = self;
        Self {
            expression: expression.copy_definition(),
        }
    }
}

impl CopyDefinition for ConvertBodyDef {
    fn copy_definition(&self) -> Self {
        let Self { to_type, charset } = self;
        Self {
            to_type: to_type.clone(),
            charset: charset.clone(),
        }
    }
}

impl CopyDefinition for SortDef {
    fn copy_definition(&self) -> Self {
        let Self {
            expression,
            comparator,
        } = self;
        Self {
            expression: expression.copy_definition(),
            comparator: comparator.clone(),
        }
    }
}

impl CopyDefinition for ValidateDef {
    fn copy_definition(&self) -> Self {
        let Self { expression } = self;
        Self {
            expression: expression.copy_definition(),
        }
    }
}

impl CopyDefinition for LogDef {
    fn copy_definition(&self) -> Self {
        let Self {
            message,
            level,
            log_name,
        } = self;
        Self {
            message: message.clone(),
            level: *level,
            log_name: log_name.clone(),
        }
    }
}

impl CopyDefinition for DataFormat {
    fn copy_definition(&self) -> Self {
        match self {
            DataFormat::Json {
                library,
                pretty_print,
                unmarshal_type,
            } => DataFormat::Json {
                library: library.clone(),
                pretty_print: *pretty_print,
                unmarshal_type: unmarshal_type.clone(),
            },
            DataFormat::Csv { delimiter, header } => DataFormat::Csv {
                delimiter: delimiter.clone(),
                header: header.clone(),
            },
            DataFormat::Base64 { line_length } => DataFormat::Base64 {
                line_length: *line_length,
            },
            DataFormat::Custom { reference } => DataFormat::Custom {
                reference: reference.clone(),
            },
        }
    }
}

impl CopyDefinition for MarshalDef {
    fn copy_definition(&self) -> Self {
        let Self { data_format } = self;
        Self {
            data_format: data_format.copy_definition(),
        }
    }
}

impl CopyDefinition for UnmarshalDef {
    fn copy_definition(&self) -> Self {
        let Self { data_format } = self;
        Self {
            data_format: data_format.copy_definition(),
        }
    }
}

// Invocation.

impl CopyDefinition for ProcessDef {
    fn copy_definition(&self) -> Self {
        let Self { reference } = self;
        Self {
            reference: reference.clone(),
        }
    }
}

impl CopyDefinition for BeanDef {
    fn copy_definition(&self) -> Self {
        let Self { reference, method } = self;
        Self {
            reference: reference.clone(),
            method: method.clone(),
        }
    }
}

impl CopyDefinition for ScriptDef {
    fn copy_definition(&self) -> Self {
        let Self { expression } = self;
        Self {
            expression: expression.copy_definition(),
        }
    }
}

// Error handling.

impl CopyDefinition for DoTryDef {
    fn copy_definition(&self) -> Self {
        let Self {} = self;
        Self {}
    }
}

impl CopyDefinition for DoCatchDef {
    fn copy_definition(&self) -> Self {
        let Self {
            exceptions,
            on_when,
        } = self;
        Self {
            exceptions: exceptions.clone(),
            on_when: on_when.copy_definition(),
        }
    }
}

impl CopyDefinition for DoFinallyDef {
    fn copy_definition(&self) -> Self {
        let Self {} = self;
        Self {}
    }
}

impl CopyDefinition for ThrowExceptionDef {
    fn copy_definition(&self) -> Self {
        let Self {
            exception_type,
            message,
        } = self;
        Self {
            exception_type: exception_type.clone(),
            message: message.clone(),
        }
    }
}

impl CopyDefinition for RollbackDef {
    fn copy_definition(&self) -> Self {
        let Self {
            message,
            mark_rollback_only,
        } = self;
        Self {
            message: message.clone(),
            mark_rollback_only: *mark_rollback_only,
        }
    }
}

impl CopyDefinition for PolicyDef {
    fn copy_definition(&self) -> Self {
        let Self {
            reference,
            transacted,
        } = self;
        Self {
            reference: reference.clone(),
            transacted: *transacted,
        }
    }
}

impl CopyDefinition for OnExceptionDef {
    fn copy_definition(&self) -> Self {
        let Self {
            exceptions,
            on_when,
            handled,
            continued,
            redelivery_policy,
            use_original_message,
        } = self;
        Self {
            exceptions: exceptions.clone(),
            on_when: on_when.copy_definition(),
            handled: handled.copy_definition(),
            continued: continued.copy_definition(),
            redelivery_policy: redelivery_policy.clone(),
            use_original_message: *use_original_message,
        }
    }
}

impl CopyDefinition for OnCompletionDef {
    fn copy_definition(&self) -> Self {
        let Self {
            only_on_failure,
            only_on_completion,
            on_when,
        } = self;
        Self {
            only_on_failure: *only_on_failure,
            only_on_completion: *only_on_completion,
            on_when: on_when.copy_definition(),
        }
    }
}

impl CopyDefinition for InterceptDef {
    fn copy_definition(&self) -> Self {
        let Self { on_when } = self;
        Self {
            on_when: on_when.copy_definition(),
        }
    }
}

impl CopyDefinition for InterceptSendToEndpointDef {
    fn copy_definition(&self) -> Self {
        let Self {
            uri,
            skip_send_to_original_endpoint,
            on_when,
        } = self;
        Self {
            uri: uri.clone(),
            skip_send_to_original_endpoint: *skip_send_to_original_endpoint,
            on_when: on_when.copy_definition(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_is_equal_but_independent() {
        let original = Node::new(OnExceptionDef {
            exceptions: vec!["java.io.IOException".into()],
            on_when: Some(Expression::simple("${header.retry}")),
            handled: Some(Expression::constant("true")),
            continued: None,
            redelivery_policy: Some("backoff".into()),
            use_original_message: true,
        })
        .with_id("io");

        let mut copy = original.copy_definition();
        assert_eq!(copy, original);

        if let NodeKind::OnException(def) = &mut copy.kind {
            def.exceptions.push("java.net.SocketException".into());
            if let Some(on_when) = def.on_when.as_mut() {
                on_when.text = "${header.never}".into();
            }
        }
        copy.id = Some("net".into());

        let NodeKind::OnException(def) = &original.kind else {
            panic!("kind changed");
        };
        assert_eq!(def.exceptions, vec!["java.io.IOException".to_string()]);
        assert_eq!(
            def.on_when.as_ref().map(|e| e.text.as_str()),
            Some("${header.retry}")
        );
        assert_eq!(original.id.as_deref(), Some("io"));
    }

    #[test]
    fn test_copy_nested_formats_and_balancers() {
        let marshal = Node::new(MarshalDef {
            data_format: DataFormat::Csv {
                delimiter: Some(";".into()),
                header: vec!["id".into(), "amount".into()],
            },
        });
        assert_eq!(marshal.copy_definition(), marshal);

        let sticky = Node::load_balance(LoadBalancer::Sticky {
            correlation: Expression::header("customer"),
        });
        assert_eq!(sticky.copy_definition(), sticky);
    }

    #[test]
    fn test_copy_of_copy_is_stable() {
        let node = Node::split(Expression::simple("${body}")).with_id("parts");
        let once = node.copy_definition();
        assert_eq!(once.copy_definition(), once);
    }
}
