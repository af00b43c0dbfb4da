//! Policy and transaction boundaries.

use serde::{Deserialize, Serialize};

/// Wraps the outputs that follow it in a policy.
///
/// A transacted boundary is a policy in disguise: the record is the same,
/// only [`transacted`](Self::transacted) differs, and with it the short name
/// reported to tooling (`transacted` instead of `policy`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDef {
    /// Registry name of the policy; the runtime default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Whether this boundary is a transaction.
    #[serde(default)]
    pub transacted: bool,
}

impl PolicyDef {
    /// Creates a policy boundary for the named policy.
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: Some(reference.into()),
            transacted: false,
        }
    }

    /// Creates a transaction boundary using the default transaction policy.
    pub fn transacted() -> Self {
        Self {
            reference: None,
            transacted: true,
        }
    }

    /// Sets the policy reference.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Returns the short name: `transacted` for transactions, else `policy`.
    pub const fn short_name(&self) -> &'static str {
        if self.transacted {
            "transacted"
        } else {
            "policy"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_follows_transacted_flag() {
        assert_eq!(PolicyDef::new("audit").short_name(), "policy");
        assert_eq!(PolicyDef::transacted().short_name(), "transacted");
        assert_eq!(
            PolicyDef::transacted().with_reference("required").short_name(),
            "transacted"
        );
    }
}
