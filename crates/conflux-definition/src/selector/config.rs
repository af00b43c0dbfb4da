//! Selector configuration.

use serde::{Deserialize, Serialize};

use super::WorkflowSelector;

/// Workflow selection as it appears in external configuration.
///
/// Each list is a single comma separated string, e.g.
/// `include = "orders*,billing"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Comma separated include patterns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
    /// Comma separated exclude patterns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
}

impl SelectorConfig {
    /// Creates a configuration that selects every workflow.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the include patterns.
    #[must_use]
    pub fn with_include(mut self, patterns: impl Into<String>) -> Self {
        self.include = Some(patterns.into());
        self
    }

    /// Sets the exclude patterns.
    #[must_use]
    pub fn with_exclude(mut self, patterns: impl Into<String>) -> Self {
        self.exclude = Some(patterns.into());
        self
    }

    /// Returns the include patterns, split and trimmed.
    pub fn include_patterns(&self) -> Vec<&str> {
        split(self.include.as_deref())
    }

    /// Returns the exclude patterns, split and trimmed.
    pub fn exclude_patterns(&self) -> Vec<&str> {
        split(self.exclude.as_deref())
    }

    /// Compiles the configuration into a selector.
    pub fn build(&self) -> WorkflowSelector {
        WorkflowSelector::new(self.include_patterns(), self.exclude_patterns())
    }
}

fn split(patterns: Option<&str>) -> Vec<&str> {
    patterns
        .into_iter()
        .flat_map(|patterns| patterns.split(','))
        .map(str::trim)
        .filter(|pattern| !pattern.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_patterns() {
        let config = SelectorConfig::new()
            .with_include(" foo* , ,bar ")
            .with_exclude("jms:*");
        assert_eq!(config.include_patterns(), ["foo*", "bar"]);
        assert_eq!(config.exclude_patterns(), ["jms:*"]);
        assert!(SelectorConfig::new().include_patterns().is_empty());
    }

    #[test]
    fn test_build() {
        let selector = SelectorConfig::new()
            .with_include("foo*")
            .with_exclude("jms:*")
            .build();
        assert!(!selector.select("fooWorkflow", Some("jms:queue:a")));
        assert!(selector.select("fooWorkflow", Some("seda:a")));
    }

    #[test]
    fn test_deserialize() {
        let config: SelectorConfig =
            serde_json::from_str(r#"{ "exclude": "foo*,bar*" }"#).unwrap();
        assert_eq!(config.include, None);
        assert_eq!(config.build().exclude().len(), 2);
    }
}
