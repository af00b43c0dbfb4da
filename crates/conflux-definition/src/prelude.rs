//! Prelude module for convenient imports.
//!
//! This module re-exports commonly used types for ergonomic imports:
//!
//! ```rust
//! use conflux_definition::prelude::*;
//! ```

pub use crate::definition::{
    CopyDefinition, Expression, InputDefinition, Node, NodeIndex, NodeKind, Parent,
};
pub use crate::error::{WorkflowError, WorkflowResult};
pub use crate::registry::{MapRegistry, ReferenceKind, Registry};
pub use crate::selector::{SelectorConfig, WorkflowSelector};
pub use crate::template::{
    TemplateCatalog, TemplateParameter, TemplatedWorkflow, WorkflowTemplate,
};
pub use crate::workflow::Workflow;
