//! Definitions that invoke user supplied code.

use serde::{Deserialize, Serialize};

use crate::definition::Expression;

/// Invokes a processor registered under a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDef {
    /// Registry name of the processor.
    pub reference: String,
}

/// Invokes a method on a registered bean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeanDef {
    /// Registry name of the bean.
    pub reference: String,
    /// Method to call; chosen by the runtime when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

/// Runs a script for its side effects, leaving the body unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptDef {
    /// The script.
    pub expression: Expression,
}
