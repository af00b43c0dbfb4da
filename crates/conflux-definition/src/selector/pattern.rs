//! Name patterns used by the workflow selector.

use std::fmt;

use regex::Regex;

use super::TRACING_TARGET;

/// A compiled include or exclude pattern.
///
/// Matching tries three tiers in order and succeeds on the first hit:
/// 1. case-insensitive equality;
/// 2. a trailing `*` wildcard, matching names that start with the text
///    before the `*`;
/// 3. a regular expression that must match the whole name.
///
/// Only the first tier ignores case. The tiers are independent, so
/// `foo*` also matches `fo` through the regex tier, where `*` repeats the
/// preceding `o`. A pattern that is not a valid regular expression still
/// matches through the first two tiers.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Option<Regex>,
}

impl Pattern {
    /// Compiles a pattern.
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let regex = match Regex::new(&format!("^(?:{source})$")) {
            Ok(regex) => Some(regex),
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    pattern = %source,
                    error = %error,
                    "Pattern is not a valid regular expression"
                );
                None
            }
        };
        Self { source, regex }
    }

    /// Returns the pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns whether the pattern has a regular expression tier.
    pub fn is_regex(&self) -> bool {
        self.regex.is_some()
    }

    /// Returns whether `name` matches the pattern.
    pub fn matches(&self, name: &str) -> bool {
        if name.to_lowercase() == self.source.to_lowercase() {
            return true;
        }

        if let Some(prefix) = self.source.strip_suffix('*') {
            if name.starts_with(prefix) {
                return true;
            }
        }

        self.regex.as_ref().is_some_and(|regex| regex.is_match(name))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_is_case_insensitive() {
        let pattern = Pattern::new("OrderWorkflow");
        assert!(pattern.matches("orderworkflow"));
        assert!(!pattern.matches("orderworkflow2"));
    }

    #[test]
    fn test_exact_folds_non_ascii_case() {
        let pattern = Pattern::new("ÄB(");
        assert!(!pattern.is_regex());
        assert!(pattern.matches("äb("));
    }

    #[test]
    fn test_trailing_wildcard() {
        let pattern = Pattern::new("foo*");
        assert!(pattern.matches("fooWorkflow"));
        assert!(pattern.matches("FOO*"));
        assert!(!pattern.matches("fx"));
        assert!(!pattern.matches("barfoo"));

        assert!(Pattern::new("jms:*").matches("jms:queue:a"));
        assert!(Pattern::new("*").matches("anything"));
    }

    #[test]
    fn test_wildcard_is_case_sensitive() {
        let pattern = Pattern::new("foo*");
        assert!(!pattern.matches("FOOWorkflow"));
        assert!(!pattern.matches("Foo"));
    }

    #[test]
    fn test_tiers_are_tried_independently() {
        // `o*` in the regex tier accepts zero or more `o`.
        let pattern = Pattern::new("foo*");
        assert!(pattern.matches("fo"));
        assert!(pattern.matches("fooo"));
    }

    #[test]
    fn test_regex_requires_full_match() {
        let pattern = Pattern::new("order-[0-9]+");
        assert!(pattern.is_regex());
        assert!(pattern.matches("order-42"));
        assert!(!pattern.matches("ORDER-42"));
        assert!(!pattern.matches("order-42-retry"));
        assert!(!pattern.matches("my-order-42"));
    }

    #[test]
    fn test_invalid_regex_only_uses_literal_tiers() {
        let pattern = Pattern::new("orders(");
        assert!(!pattern.is_regex());
        assert!(pattern.matches("ORDERS("));
        assert!(!pattern.matches("orders"));
    }

    #[test]
    fn test_non_ascii_names_do_not_panic() {
        let pattern = Pattern::new("ab*");
        assert!(!pattern.matches("é"));
        assert!(pattern.matches("abé"));
    }
}
