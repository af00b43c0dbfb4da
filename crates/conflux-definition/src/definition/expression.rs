//! Expression and predicate definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An expression or predicate in some external language.
///
/// The model only stores the source text and the language name. Parsing
/// and evaluation belong to the language implementations used by the
/// execution compiler.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Expression {
    /// Language name (e.g. `simple`, `constant`, `header`, `jsonpath`).
    pub language: String,
    /// Expression source text.
    pub text: String,
    /// Optional type the result is converted to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_type: Option<String>,
    /// Whether surrounding whitespace is trimmed before evaluation.
    #[serde(default = "default_trim")]
    pub trim: bool,
}

fn default_trim() -> bool {
    true
}

impl Expression {
    /// Creates an expression in the given language.
    pub fn new(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            text: text.into(),
            result_type: None,
            trim: true,
        }
    }

    /// Creates a `simple` language expression.
    pub fn simple(text: impl Into<String>) -> Self {
        Self::new("simple", text)
    }

    /// Creates a constant expression.
    pub fn constant(text: impl Into<String>) -> Self {
        Self::new("constant", text)
    }

    /// Creates an expression reading a message header.
    pub fn header(name: impl Into<String>) -> Self {
        Self::new("header", name)
    }

    /// Sets the result type.
    pub fn with_result_type(mut self, result_type: impl Into<String>) -> Self {
        self.result_type = Some(result_type.into());
        self
    }

    /// Disables whitespace trimming.
    pub fn untrimmed(mut self) -> Self {
        self.trim = false;
        self
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{{}}}", self.language, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Expression::simple("${body}").to_string(), "simple{${body}}");
        assert_eq!(Expression::header("x").to_string(), "header{x}");
    }

    #[test]
    fn test_trim_defaults_on_deserialize() {
        let expr: Expression =
            serde_json::from_str(r#"{"language":"constant","text":" 4 "}"#).unwrap();
        assert!(expr.trim);
        assert_eq!(expr.result_type, None);
    }
}
