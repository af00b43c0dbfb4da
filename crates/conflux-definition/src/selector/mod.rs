//! Include/exclude selection of workflows.
//!
//! A [`WorkflowSelector`] decides, per workflow, whether it participates in
//! a deployment. Both the workflow id and its input URI are matched against
//! the configured [`Pattern`]s. Exclusion always wins over inclusion, and
//! an empty include list includes everything not excluded.

mod config;
mod pattern;

use std::borrow::Borrow;

pub use self::config::SelectorConfig;
pub use self::pattern::Pattern;
use crate::workflow::Workflow;

/// Tracing target for workflow selection.
pub const TRACING_TARGET: &str = "conflux_definition::selector";

/// Include/exclude filter over workflow ids and input URIs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowSelector {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl WorkflowSelector {
    /// Creates a selector from already split pattern lists.
    pub fn new<I, E>(include: I, exclude: E) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        Self {
            include: include.into_iter().map(Pattern::new).collect(),
            exclude: exclude.into_iter().map(Pattern::new).collect(),
        }
    }

    /// Returns the include patterns.
    pub fn include(&self) -> &[Pattern] {
        &self.include
    }

    /// Returns the exclude patterns.
    pub fn exclude(&self) -> &[Pattern] {
        &self.exclude
    }

    /// Returns whether the selector can reject anything.
    pub fn is_selective(&self) -> bool {
        !self.include.is_empty() || !self.exclude.is_empty()
    }

    /// Returns whether the workflow with this id and input URI is selected.
    pub fn select(&self, id: &str, source_uri: Option<&str>) -> bool {
        if let Some(pattern) = Self::first_match(&self.exclude, id, source_uri) {
            tracing::debug!(
                target: TRACING_TARGET,
                workflow_id = %id,
                source_uri = ?source_uri,
                pattern = %pattern,
                "Workflow excluded"
            );
            return false;
        }

        if self.include.is_empty() {
            return true;
        }

        match Self::first_match(&self.include, id, source_uri) {
            Some(pattern) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    workflow_id = %id,
                    source_uri = ?source_uri,
                    pattern = %pattern,
                    "Workflow included"
                );
                true
            }
            None => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    workflow_id = %id,
                    source_uri = ?source_uri,
                    "Workflow matches no include pattern"
                );
                false
            }
        }
    }

    /// Returns whether a workflow is selected, by its id and input URI.
    pub fn select_workflow(&self, workflow: &Workflow) -> bool {
        self.select(&workflow.id, workflow.input_uri())
    }

    /// Keeps the selected workflows, preserving their order.
    pub fn select_workflows<W, I>(&self, workflows: I) -> Vec<W>
    where
        W: Borrow<Workflow>,
        I: IntoIterator<Item = W>,
    {
        workflows
            .into_iter()
            .filter(|workflow| {
                let workflow: &Workflow = workflow.borrow();
                self.select_workflow(workflow)
            })
            .collect()
    }

    fn first_match<'p>(
        patterns: &'p [Pattern],
        id: &str,
        source_uri: Option<&str>,
    ) -> Option<&'p Pattern> {
        patterns.iter().find(|pattern| {
            pattern.matches(id) || source_uri.is_some_and(|uri| pattern.matches(uri))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn test_exclude_wins_over_include() {
        let selector = WorkflowSelector::new(["foo*"], ["jms:*"]);
        assert!(!selector.select("fooWorkflow", Some("jms:queue:a")));
        assert!(selector.select("fooWorkflow", Some("direct:a")));
    }

    #[test]
    fn test_no_include_means_everything_not_excluded() {
        let selector = WorkflowSelector::new(NONE, ["foo*"]);
        assert!(selector.select("barWorkflow", Some("direct:x")));
        assert!(!selector.select("fooWorkflow", Some("direct:x")));
    }

    #[test]
    fn test_include_matches_id_or_uri() {
        let selector = WorkflowSelector::new(["timer:*", "billing"], NONE);
        assert!(selector.select("tick", Some("timer:fast")));
        assert!(selector.select("BILLING", None));
        assert!(!selector.select("orders", Some("direct:orders")));
        assert!(!selector.select("orders", None));
    }

    #[test]
    fn test_only_exact_include_ignores_case() {
        let selector = WorkflowSelector::new(["foo*", "order-[0-9]+", "Billing"], NONE);
        assert!(selector.select("fooWorkflow", None));
        assert!(!selector.select("FOOWorkflow", None));
        assert!(selector.select("order-42", None));
        assert!(!selector.select("ORDER-42", None));
        assert!(selector.select("billing", None));
    }

    #[test]
    fn test_empty_selector_selects_everything() {
        let selector = WorkflowSelector::default();
        assert!(!selector.is_selective());
        assert!(selector.select("anything", None));
    }

    #[test]
    fn test_select_workflows() {
        let workflows = vec![
            Workflow::from_uri("a", "jms:queue:a"),
            Workflow::from_uri("b", "direct:b"),
            Workflow::new("c"),
        ];
        let selector = WorkflowSelector::new(NONE, ["jms:*", "c"]);

        let selected = selector.select_workflows(&workflows);
        let ids: Vec<_> = selected.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, ["b"]);

        let owned = selector.select_workflows(workflows);
        assert_eq!(owned.len(), 1);
    }
}
