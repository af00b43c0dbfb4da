//! Parameterized, reusable workflows.
//!
//! A [`WorkflowTemplate`] declares parameters and a body workflow. A
//! [`TemplatedWorkflow`] request binds values to those parameters; the
//! template answers it with a deep copy of its body in which `{{name}}`
//! placeholders were replaced. The template itself is never mutated, so a
//! shared template can serve any number of concurrent requests.

mod catalog;
mod placeholder;

use std::collections::BTreeMap;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

pub use self::catalog::TemplateCatalog;
use crate::definition::{CopyDefinition, StringFields};
use crate::error::{WorkflowError, WorkflowResult};
use crate::registry::ReferenceKind;
use crate::workflow::Workflow;

/// Tracing target for template instantiation.
pub const TRACING_TARGET: &str = "conflux_definition::template";

/// A parameter declared by a [`WorkflowTemplate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(
    name = "TemplateParameterBuilder",
    pattern = "owned",
    setter(into, strip_option, prefix = "with")
)]
pub struct TemplateParameter {
    /// Parameter name, as used in `{{name}}` placeholders.
    pub name: String,
    /// Explicit requiredness; see [`is_required`](Self::is_required).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub required: Option<bool>,
    /// Value used when the request does not bind the parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub default_value: Option<String>,
    /// Description of the parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub description: Option<String>,
}

impl TemplateParameter {
    /// Creates a parameter with no default, required unless stated otherwise.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: None,
            default_value: None,
            description: None,
        }
    }

    /// Returns a builder for creating a parameter.
    pub fn builder() -> TemplateParameterBuilder {
        TemplateParameterBuilder::default()
    }

    /// Sets the default value.
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Marks the parameter as optional.
    pub fn optional(mut self) -> Self {
        self.required = Some(false);
        self
    }

    /// Returns whether a request must bind this parameter.
    ///
    /// A parameter is required unless it is explicitly marked as not
    /// required or has a default value. An explicit `required: true` is
    /// satisfied by a default as well.
    pub fn is_required(&self) -> bool {
        self.required != Some(false) && self.default_value.is_none()
    }
}

/// A parameterized workflow body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowTemplate {
    /// Template identifier.
    pub id: String,
    /// Description of the template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared parameters, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<TemplateParameter>,
    /// The body, copied on every instantiation and never executed itself.
    pub body: Workflow,
}

impl WorkflowTemplate {
    /// Creates a new template without parameters.
    pub fn new(id: impl Into<String>, body: Workflow) -> Self {
        Self {
            id: id.into(),
            description: None,
            parameters: Vec::new(),
            body,
        }
    }

    /// Declares a parameter.
    pub fn with_parameter(mut self, parameter: TemplateParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Returns the declared parameter with the given name.
    pub fn parameter(&self, name: &str) -> Option<&TemplateParameter> {
        self.parameters.iter().find(|parameter| parameter.name == name)
    }

    /// Instantiates the template for a request.
    ///
    /// Fails with [`WorkflowError::MissingParameter`] when a required
    /// parameter is unbound, before anything is copied.
    pub fn instantiate(&self, request: &TemplatedWorkflow) -> WorkflowResult<Workflow> {
        if request.template_ref != self.id {
            return Err(WorkflowError::unresolved(
                ReferenceKind::Template,
                request.template_ref.clone(),
            ));
        }

        let bindings = self.bindings(request)?;

        let mut workflow = self.body.copy_definition();
        let mut substituted = 0_usize;
        workflow.visit_strings_mut(&mut |text| {
            if placeholder::substitute(text, &bindings) {
                substituted += 1;
            }
        });

        workflow.id = request
            .workflow_id
            .clone()
            .unwrap_or_else(|| self.id.clone());

        if let Some(prefix) = request.prefix_id.as_deref() {
            for node in workflow.nodes_mut() {
                if let Some(id) = node.id.as_mut() {
                    id.insert_str(0, prefix);
                }
            }
        }

        tracing::debug!(
            target: TRACING_TARGET,
            template_id = %self.id,
            workflow_id = %workflow.id,
            nodes = workflow.len(),
            substituted,
            "Instantiated workflow template"
        );

        Ok(workflow)
    }

    /// Returns the effective bindings: defaults overridden by the request.
    fn bindings(&self, request: &TemplatedWorkflow) -> WorkflowResult<BTreeMap<String, String>> {
        let mut bindings = BTreeMap::new();

        for parameter in &self.parameters {
            if parameter.is_required() && !request.parameters.contains_key(&parameter.name) {
                return Err(WorkflowError::MissingParameter {
                    template: self.id.clone(),
                    parameter: parameter.name.clone(),
                });
            }
            if let Some(value) = &parameter.default_value {
                bindings.insert(parameter.name.clone(), value.clone());
            }
        }

        for (name, value) in &request.parameters {
            if self.parameter(name).is_none() {
                tracing::warn!(
                    target: TRACING_TARGET,
                    template_id = %self.id,
                    parameter = %name,
                    "Binding names no declared template parameter"
                );
            }
            bindings.insert(name.clone(), value.clone());
        }

        Ok(bindings)
    }
}

/// A request to instantiate a template with concrete parameter values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplatedWorkflow {
    /// Id of the template to instantiate.
    pub template_ref: String,
    /// Parameter values by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, String>,
    /// Id of the resulting workflow; the template id when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,
    /// Prefix applied to every node id of the resulting workflow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix_id: Option<String>,
}

impl TemplatedWorkflow {
    /// Creates a request for the given template.
    pub fn new(template_ref: impl Into<String>) -> Self {
        Self {
            template_ref: template_ref.into(),
            ..Self::default()
        }
    }

    /// Binds a parameter value.
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Sets the id of the resulting workflow.
    pub fn with_workflow_id(mut self, workflow_id: impl Into<String>) -> Self {
        self.workflow_id = Some(workflow_id.into());
        self
    }

    /// Sets the node id prefix.
    pub fn with_prefix_id(mut self, prefix: impl Into<String>) -> Self {
        self.prefix_id = Some(prefix.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::definition::{Expression, Node, NodeKind, ThrottleDef};

    /// from(direct:{{source}}) -> throttle({{count}}) -> to(mock:out) [id: send]
    fn throttled() -> WorkflowTemplate {
        let mut body = Workflow::from_uri("body", "direct:{{source:in}}");
        body.add_output(Node::new(ThrottleDef {
            expression: Expression::constant("{{count}}"),
            time_period_millis: 1000,
        }));
        body.add_output(Node::to("mock:out").with_id("send"));

        WorkflowTemplate::new("throttled", body).with_parameter(TemplateParameter::new("count"))
    }

    fn throttle_count(workflow: &Workflow) -> String {
        match &workflow.node(workflow.outputs()[0]).unwrap().kind {
            NodeKind::Throttle(def) => def.expression.text.clone(),
            other => panic!("expected throttle, got {}", other.short_name()),
        }
    }

    #[test]
    fn test_is_required() {
        assert!(TemplateParameter::new("name").is_required());
        assert!(!TemplateParameter::new("name").optional().is_required());
        assert!(!TemplateParameter::new("name").with_default("x").is_required());

        let explicit = TemplateParameter::builder()
            .with_name("name")
            .with_required(true)
            .with_default_value("x")
            .build()
            .unwrap();
        assert!(!explicit.is_required());
    }

    #[test]
    fn test_instantiation_isolation() {
        let template = throttled();
        let four = template
            .instantiate(&TemplatedWorkflow::new("throttled").with_parameter("count", "4"))
            .unwrap();
        let mut eight = template
            .instantiate(&TemplatedWorkflow::new("throttled").with_parameter("count", "8"))
            .unwrap();

        assert_eq!(throttle_count(&four), "4");
        assert_eq!(throttle_count(&eight), "8");
        assert_eq!(throttle_count(&template.body), "{{count}}");

        // Only the substituted field differs.
        let mut aligned = four.copy_definition();
        if let Some(expr) = aligned
            .node_mut(aligned.outputs()[0])
            .and_then(|node| node.kind.expression_mut())
        {
            expr.text = "8".into();
        }
        assert_eq!(aligned, eight);

        let send = eight.find("send").unwrap();
        eight.node_mut(send).unwrap().description = Some("changed".into());
        assert_eq!(four.node(four.find("send").unwrap()).unwrap().description, None);
    }

    #[test]
    fn test_missing_required_parameter() {
        let err = throttled()
            .instantiate(&TemplatedWorkflow::new("throttled"))
            .unwrap_err();
        assert_eq!(
            err,
            WorkflowError::MissingParameter {
                template: "throttled".into(),
                parameter: "count".into(),
            }
        );
    }

    #[test]
    fn test_default_value_is_substituted() {
        let mut template = throttled();
        template.parameters = vec![TemplateParameter::new("count").with_default("x")];

        let workflow = template
            .instantiate(&TemplatedWorkflow::new("throttled"))
            .unwrap();
        assert_eq!(throttle_count(&workflow), "x");
    }

    #[test]
    fn test_inline_fallback_and_workflow_id() {
        let template = throttled();
        let request = TemplatedWorkflow::new("throttled").with_parameter("count", "2");

        let workflow = template.instantiate(&request).unwrap();
        assert_eq!(workflow.id, "throttled");
        assert_eq!(workflow.input_uri(), Some("direct:in"));

        let named = template
            .instantiate(&request.clone().with_workflow_id("slow").with_parameter("source", "a"))
            .unwrap();
        assert_eq!(named.id, "slow");
        assert_eq!(named.input_uri(), Some("direct:a"));
    }

    #[test]
    fn test_prefix_id() {
        let workflow = throttled()
            .instantiate(
                &TemplatedWorkflow::new("throttled")
                    .with_parameter("count", "1")
                    .with_prefix_id("tenantA-"),
            )
            .unwrap();
        assert!(workflow.find("tenantA-send").is_some());
        assert!(workflow.find("send").is_none());
    }

    #[test]
    fn test_template_ref_must_match() {
        let err = throttled()
            .instantiate(&TemplatedWorkflow::new("other").with_parameter("count", "1"))
            .unwrap_err();
        assert_eq!(err, WorkflowError::unresolved(ReferenceKind::Template, "other"));
    }

    #[test]
    fn test_concurrent_instantiation() {
        let template = throttled();
        let results: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|n| {
                    let template = &template;
                    scope.spawn(move || {
                        let request = TemplatedWorkflow::new("throttled")
                            .with_parameter("count", n.to_string())
                            .with_workflow_id(format!("w{n}"));
                        template.instantiate(&request)
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap().unwrap())
                .collect()
        });

        for (n, workflow) in results.iter().enumerate() {
            assert_eq!(workflow.id, format!("w{n}"));
            assert_eq!(throttle_count(workflow), n.to_string());
        }
        assert_eq!(throttle_count(&template.body), "{{count}}");
    }

    #[test]
    fn test_template_serde() {
        let template = throttled();
        let value = serde_json::to_value(&template).unwrap();
        assert_eq!(value["parameters"][0]["name"], "count");
        assert_eq!(value["body"]["outputs"][0]["type"], "throttle");

        let back: WorkflowTemplate = serde_json::from_value(value).unwrap();
        assert_eq!(back, template);
    }
}
