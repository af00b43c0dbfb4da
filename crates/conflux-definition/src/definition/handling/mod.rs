//! Error handling definitions.
//!
//! - [`DoTryDef`], [`DoCatchDef`], [`DoFinallyDef`]: try/catch/finally blocks
//! - [`PolicyDef`]: wraps the following outputs in a policy or transaction
//! - [`OnExceptionDef`], [`OnCompletionDef`], [`InterceptDef`],
//!   [`InterceptSendToEndpointDef`]: workflow-wide scopes that are only
//!   valid at the top level and are resolved away before execution

mod policy;
mod scope;
mod try_catch;

pub use policy::PolicyDef;
pub use scope::{InterceptDef, InterceptSendToEndpointDef, OnCompletionDef, OnExceptionDef};
pub use try_catch::{DoCatchDef, DoFinallyDef, DoTryDef, RollbackDef, ThrowExceptionDef};
