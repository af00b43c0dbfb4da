//! Templates addressed by id.

use std::collections::BTreeMap;

use super::{TemplatedWorkflow, WorkflowTemplate};
use crate::error::{WorkflowError, WorkflowResult};
use crate::registry::ReferenceKind;
use crate::workflow::Workflow;

/// In-memory collection of templates, keyed by template id.
///
/// Resolves the `template_ref` of instantiation requests.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: BTreeMap<String, WorkflowTemplate>,
}

impl TemplateCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a template, returning the one it replaces.
    pub fn insert(&mut self, template: WorkflowTemplate) -> Option<WorkflowTemplate> {
        self.templates.insert(template.id.clone(), template)
    }

    /// Removes a template by id.
    pub fn remove(&mut self, id: &str) -> Option<WorkflowTemplate> {
        self.templates.remove(id)
    }

    /// Retrieves a template by id.
    pub fn get(&self, id: &str) -> WorkflowResult<&WorkflowTemplate> {
        self.templates
            .get(id)
            .ok_or_else(|| WorkflowError::unresolved(ReferenceKind::Template, id))
    }

    /// Returns the number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Returns an iterator over the templates, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &WorkflowTemplate> {
        self.templates.values()
    }

    /// Instantiates the template named by the request.
    pub fn instantiate(&self, request: &TemplatedWorkflow) -> WorkflowResult<Workflow> {
        self.get(&request.template_ref)?.instantiate(request)
    }

    /// Instantiates every request, stopping at the first failure.
    pub fn instantiate_all<'a, I>(&self, requests: I) -> WorkflowResult<Vec<Workflow>>
    where
        I: IntoIterator<Item = &'a TemplatedWorkflow>,
    {
        requests
            .into_iter()
            .map(|request| self.instantiate(request))
            .collect()
    }
}

impl FromIterator<WorkflowTemplate> for TemplateCatalog {
    fn from_iter<I: IntoIterator<Item = WorkflowTemplate>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for template in iter {
            catalog.insert(template);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::Node;
    use crate::template::TemplateParameter;

    fn catalog() -> TemplateCatalog {
        let mut body = Workflow::from_uri("body", "timer:{{name}}");
        body.add_output(Node::log("tick from {{name}}"));
        let ticker = WorkflowTemplate::new("ticker", body)
            .with_parameter(TemplateParameter::new("name"));

        let echo = WorkflowTemplate::new("echo", Workflow::from_uri("body", "direct:echo"));

        [ticker, echo].into_iter().collect()
    }

    #[test]
    fn test_instantiate_by_reference() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 2);

        let workflow = catalog
            .instantiate(&TemplatedWorkflow::new("ticker").with_parameter("name", "fast"))
            .unwrap();
        assert_eq!(workflow.id, "ticker");
        assert_eq!(workflow.input_uri(), Some("timer:fast"));
        assert_eq!(workflow.node(workflow.outputs()[0]).unwrap().label(), "log[tick from fast]");
    }

    #[test]
    fn test_unknown_template() {
        let err = catalog()
            .instantiate(&TemplatedWorkflow::new("missing"))
            .unwrap_err();
        assert_eq!(err, WorkflowError::unresolved(ReferenceKind::Template, "missing"));
    }

    #[test]
    fn test_instantiate_all_stops_at_first_failure() {
        let catalog = catalog();
        let requests = [
            TemplatedWorkflow::new("echo").with_workflow_id("e1"),
            TemplatedWorkflow::new("ticker"),
            TemplatedWorkflow::new("echo").with_workflow_id("e2"),
        ];

        let err = catalog.instantiate_all(&requests).unwrap_err();
        assert!(matches!(err, WorkflowError::MissingParameter { .. }));

        let workflows = catalog.instantiate_all(&requests[..1]).unwrap();
        assert_eq!(workflows.len(), 1);
        assert_eq!(workflows[0].id, "e1");
    }
}
